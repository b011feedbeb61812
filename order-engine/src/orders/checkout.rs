//! Checkout Aggregator
//!
//! Collects a table's open orders and settles them with one payment each.

use super::error::OrderError;
use super::lifecycle;
use super::types::{
    CheckoutOrder, CheckoutPolicy, OrderItemView, OrderTotals, TableCheckout, TableClosure,
};
use crate::db::repository::{RepoError, order as order_repo, order_item, payment};
use shared::models::{DiningTable, Order, OrderItem, PaymentMethod};
use shared::order::{ItemStatus, Money, OrderStatus};
use sqlx::SqliteConnection;

fn checkout_order(order: &Order, items: &[OrderItem]) -> CheckoutOrder {
    CheckoutOrder {
        order_id: order.id,
        order_number: order.order_number,
        status: order.status,
        totals: OrderTotals::from(order),
        items: items
            .iter()
            .filter(|i| i.order_id == order.id)
            .map(OrderItemView::from)
            .collect(),
    }
}

/// Open orders of the table with their lines; `NoOpenOrders` when empty
pub async fn load_open(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    table: &DiningTable,
) -> Result<(Vec<Order>, Vec<OrderItem>), OrderError> {
    let orders = order_repo::find_open_by_table(&mut *conn, tenant_id, table.id).await?;
    if orders.is_empty() {
        return Err(OrderError::NoOpenOrders(table.id));
    }
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let items = order_item::find_by_orders(&mut *conn, &ids).await?;
    Ok((orders, items))
}

/// Sum of the order totals; `Validation` if it leaves the `i64` cent range
pub fn combined_total(orders: &[Order]) -> Result<Money, OrderError> {
    orders
        .iter()
        .try_fold(Money::ZERO, |acc, o| acc.checked_add(o.total))
        .ok_or_else(|| OrderError::Validation("combined total out of range".into()))
}

pub fn preview(
    table: &DiningTable,
    orders: &[Order],
    items: &[OrderItem],
) -> Result<TableCheckout, OrderError> {
    Ok(TableCheckout {
        table_id: table.id,
        table_number: table.number,
        orders: orders.iter().map(|o| checkout_order(o, items)).collect(),
        combined_total: combined_total(orders)?,
    })
}

/// Orders whose items include never-started ones are not resolved
pub fn check_resolved(
    orders: &[Order],
    items: &[OrderItem],
    policy: CheckoutPolicy,
) -> Result<(), OrderError> {
    if policy.allow_pending_items {
        return Ok(());
    }
    for order in orders {
        let pending = items
            .iter()
            .filter(|i| i.order_id == order.id && i.status == ItemStatus::Pending)
            .count();
        if pending > 0 {
            return Err(OrderError::UnresolvedItems {
                order_id: order.id,
                pending,
            });
        }
    }
    Ok(())
}

/// Record one COMPLETED payment per open order and move each order to PAID.
///
/// Runs inside the caller's write transaction; item statuses are untouched.
pub async fn close(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    table: &DiningTable,
    method: PaymentMethod,
    actor: Option<&str>,
    policy: CheckoutPolicy,
    now: i64,
) -> Result<TableClosure, OrderError> {
    let (orders, items) = load_open(&mut *conn, tenant_id, table).await?;
    check_resolved(&orders, &items, policy)?;
    let combined_total = combined_total(&orders)?;

    let mut payments = Vec::with_capacity(orders.len());
    for order in &orders {
        let recorded = payment::insert_completed(&mut *conn, order.id, method, order.total, now)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => OrderError::PaymentAlreadyRecorded(order.id),
                other => other.into(),
            })?;
        lifecycle::walk_to_paid(&mut *conn, order, actor, now).await?;
        payments.push(recorded);
    }

    tracing::info!(
        table_id = table.id,
        orders = orders.len(),
        method = %method,
        combined_total = %combined_total,
        "Table closed"
    );

    Ok(TableClosure {
        table_id: table.id,
        orders: orders
            .iter()
            .map(|o| CheckoutOrder {
                status: OrderStatus::Paid,
                ..checkout_order(o, &items)
            })
            .collect(),
        payments,
        combined_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64, total: i64) -> Order {
        Order {
            id,
            tenant_id: 1,
            table_id: 1,
            order_number: id,
            status: OrderStatus::Delivered,
            subtotal: Money::from_minor(total),
            vat_amount: Money::ZERO,
            tip_amount: Money::ZERO,
            total: Money::from_minor(total),
            customer_notes: None,
            created_by: None,
            closed_by: None,
            created_at: 0,
            updated_at: 0,
            closed_at: None,
        }
    }

    fn item(id: i64, order_id: i64, status: ItemStatus) -> OrderItem {
        OrderItem {
            id,
            order_id,
            dish_id: 1,
            prep_sector_id: 1,
            dish_name: "Croquetas".into(),
            quantity: 1,
            unit_price: Money::from_minor(500),
            notes: None,
            status,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_check_resolved() {
        let orders = vec![order(1, 2000), order(2, 1550)];
        let items = vec![
            item(1, 1, ItemStatus::Served),
            item(2, 2, ItemStatus::Cancelled),
            item(3, 2, ItemStatus::Pending),
        ];

        let err = check_resolved(&orders, &items, CheckoutPolicy::default()).unwrap_err();
        assert!(matches!(err, OrderError::UnresolvedItems { order_id: 2, pending: 1 }));

        let lenient = CheckoutPolicy {
            allow_pending_items: true,
        };
        assert!(check_resolved(&orders, &items, lenient).is_ok());
    }

    #[test]
    fn test_preview_combines_totals() {
        let table = DiningTable {
            id: 1,
            tenant_id: 1,
            number: 7,
            name: None,
            access_code: "T-07".into(),
            status: Default::default(),
            is_active: true,
        };
        let orders = vec![order(1, 2000), order(2, 1550)];
        let items = vec![item(1, 1, ItemStatus::Served), item(2, 2, ItemStatus::Ready)];

        let view = preview(&table, &orders, &items).unwrap();
        assert_eq!(view.combined_total, Money::from_minor(3550));
        assert_eq!(view.orders.len(), 2);
        assert_eq!(view.orders[1].items.len(), 1);
        assert_eq!(view.orders[1].items[0].id, 2);
    }

    #[test]
    fn test_combined_total_overflow() {
        let orders = vec![order(1, i64::MAX), order(2, 1)];
        let err = combined_total(&orders).unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));

        assert_eq!(
            combined_total(&[order(1, 2000), order(2, 1550)]).unwrap(),
            Money::from_minor(3550)
        );
    }
}
