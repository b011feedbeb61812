//! Order Lifecycle Machine
//!
//! Creation and status transitions of order headers. Every function here
//! runs on a connection that is inside a write transaction
//! ([`crate::db::begin_write`]); committing is the caller's job.

use super::dispatch;
use super::error::{OrderError, TransitionSubject};
use super::numbering;
use super::types::{CreateOrderRequest, OrderCreated, OrderTotals};
use crate::db::repository::order::{self as order_repo, NewOrder};
use crate::db::repository::order_item::{self as item_repo, NewOrderItem};
use crate::db::repository::{catalog, dining_table, history};
use crate::utils::validation::{
    MAX_ITEMS_PER_ORDER, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, normalize_optional,
    validate_optional_text, validate_quantity, validate_required_text,
};
use rust_decimal::Decimal;
use shared::models::{Dish, Order, Tenant};
use shared::order::{Money, OrderStatus};
use sqlx::SqliteConnection;

/// Notes written on history rows produced by checkout
pub const TABLE_CLOSURE_NOTE: &str = "table closure";

/// Reject malformed submissions before touching the database
pub fn validate_create_request(req: &CreateOrderRequest) -> Result<(), OrderError> {
    validate_required_text(&req.table_code, "tableCode", MAX_SHORT_TEXT_LEN)?;
    if req.items.is_empty() {
        return Err(OrderError::Validation(
            "Order must contain at least one item".into(),
        ));
    }
    if req.items.len() > MAX_ITEMS_PER_ORDER {
        return Err(OrderError::Validation(format!(
            "Order has too many items ({}, max {MAX_ITEMS_PER_ORDER})",
            req.items.len()
        )));
    }
    for (i, item) in req.items.iter().enumerate() {
        validate_quantity(item.quantity, &format!("items[{i}].quantity"))?;
        validate_optional_text(item.notes.as_deref(), &format!("items[{i}].notes"), MAX_NOTE_LEN)?;
    }
    validate_optional_text(req.customer_notes.as_deref(), "customerNotes", MAX_NOTE_LEN)?;
    validate_optional_text(req.created_by.as_deref(), "createdBy", MAX_SHORT_TEXT_LEN)?;
    if let Some(pct) = req.tip_percentage
        && (pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED)
    {
        return Err(OrderError::Validation(format!(
            "tipPercentage must be between 0 and 100, got {pct}"
        )));
    }
    Ok(())
}

/// Compute subtotal, VAT and tip for priced lines `(unit_price, quantity)`
pub fn compute_totals(
    lines: &[(Money, i64)],
    vat_rate_bps: i64,
    tip_percentage: Option<Decimal>,
) -> Result<OrderTotals, OrderError> {
    let overflow = || OrderError::Validation("Order amount is too large".into());
    let mut subtotal = Money::ZERO;
    for (price, quantity) in lines {
        let line = price.checked_mul(*quantity).ok_or_else(overflow)?;
        subtotal = subtotal.checked_add(line).ok_or_else(overflow)?;
    }
    let vat = subtotal.apply_bps(vat_rate_bps).ok_or_else(overflow)?;
    let tip = match tip_percentage {
        Some(pct) => subtotal.apply_percent(pct).ok_or_else(overflow)?,
        None => Money::ZERO,
    };
    OrderTotals::new(subtotal, vat, tip).ok_or_else(overflow)
}

struct PricedLine {
    dish: Dish,
    sector_id: i64,
    quantity: i64,
    notes: Option<String>,
}

/// Insert a PENDING order with its items, its number and the initial
/// history row.
///
/// Any failure leaves the transaction to be rolled back, counter included.
pub async fn create(
    conn: &mut SqliteConnection,
    tenant: &Tenant,
    req: CreateOrderRequest,
    now: i64,
) -> Result<OrderCreated, OrderError> {
    validate_create_request(&req)?;

    let table_code = req.table_code.trim();
    let table = dining_table::find_by_access_code(&mut *conn, tenant.id, table_code)
        .await?
        .ok_or_else(|| OrderError::TableNotFound(table_code.to_string()))?;

    let mut lines = Vec::with_capacity(req.items.len());
    for item in req.items {
        let dish = catalog::find_dish(&mut *conn, tenant.id, item.dish_id)
            .await?
            .ok_or(OrderError::DishNotFound(item.dish_id))?;
        if !dish.can_be_ordered() {
            return Err(OrderError::DishUnavailable(dish.name));
        }
        let sector_id = dispatch::resolve_sector(&mut *conn, tenant.id, &dish).await?;
        lines.push(PricedLine {
            dish,
            sector_id,
            quantity: item.quantity,
            notes: normalize_optional(item.notes),
        });
    }

    let priced: Vec<(Money, i64)> = lines.iter().map(|l| (l.dish.price, l.quantity)).collect();
    let totals = compute_totals(&priced, tenant.vat_rate_bps, req.tip_percentage)?;

    let order_number = numbering::next_order_number(&mut *conn, tenant.id).await?;
    let customer_notes = normalize_optional(req.customer_notes);
    let created_by = normalize_optional(req.created_by);

    let order_id = order_repo::insert(
        &mut *conn,
        &NewOrder {
            tenant_id: tenant.id,
            table_id: table.id,
            order_number,
            subtotal: totals.subtotal,
            vat_amount: totals.vat_amount,
            tip_amount: totals.tip_amount,
            total: totals.total,
            customer_notes: customer_notes.as_deref(),
            created_by: created_by.as_deref(),
            now,
        },
    )
    .await?;

    for line in &lines {
        item_repo::insert(
            &mut *conn,
            &NewOrderItem {
                order_id,
                dish_id: line.dish.id,
                prep_sector_id: line.sector_id,
                dish_name: &line.dish.name,
                quantity: line.quantity,
                unit_price: line.dish.price,
                notes: line.notes.as_deref(),
                now,
            },
        )
        .await?;
    }

    history::append(
        &mut *conn,
        order_id,
        None,
        OrderStatus::Pending,
        created_by.as_deref(),
        None,
        now,
    )
    .await?;

    tracing::info!(
        tenant = %tenant.slug,
        order_id,
        order_number,
        table = table.number,
        items = lines.len(),
        total = %totals.total,
        "Order created"
    );

    Ok(OrderCreated {
        order_id,
        order_number,
        totals,
    })
}

/// Apply one legal transition to `order` and record it.
///
/// Cancelling also cancels every item that is not SERVED or CANCELLED.
/// Returns the new status.
pub async fn transition(
    conn: &mut SqliteConnection,
    order: &Order,
    target: OrderStatus,
    actor: Option<&str>,
    notes: Option<&str>,
    now: i64,
) -> Result<OrderStatus, OrderError> {
    let subject = TransitionSubject::Order(order.id);
    if !order.status.can_transition_to(target) {
        return Err(OrderError::invalid_transition(subject, order.status, target));
    }

    let updated =
        order_repo::update_status_if(&mut *conn, order.id, order.status, target, actor, now).await?;
    if !updated {
        // Status changed after it was read
        return Err(OrderError::invalid_transition(subject, order.status, target));
    }

    history::append(&mut *conn, order.id, Some(order.status), target, actor, notes, now).await?;

    if target == OrderStatus::Cancelled {
        let cancelled = item_repo::cancel_open_items(&mut *conn, order.id, now).await?;
        tracing::info!(order_id = order.id, cancelled_items = cancelled, "Order items cancelled");
    }

    tracing::info!(
        order_id = order.id,
        order_number = order.order_number,
        from = %order.status,
        to = %target,
        actor = ?actor,
        "Order status changed"
    );
    Ok(target)
}

/// Walk an open order forward to PAID, one legal step at a time
pub async fn walk_to_paid(
    conn: &mut SqliteConnection,
    order: &Order,
    actor: Option<&str>,
    now: i64,
) -> Result<(), OrderError> {
    let subject = TransitionSubject::Order(order.id);
    let steps = order.status.path_to(OrderStatus::Paid).ok_or_else(|| {
        OrderError::invalid_transition(subject, order.status, OrderStatus::Paid)
    })?;

    let mut current = order.clone();
    for step in steps {
        current.status =
            transition(&mut *conn, &current, step, actor, Some(TABLE_CLOSURE_NOTE), now).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::types::NewItem;
    use std::str::FromStr;

    fn request(items: Vec<NewItem>) -> CreateOrderRequest {
        CreateOrderRequest {
            table_code: "T-01".into(),
            items,
            customer_notes: None,
            tip_percentage: None,
            created_by: None,
        }
    }

    fn item(quantity: i64) -> NewItem {
        NewItem {
            dish_id: 1,
            quantity,
            notes: None,
        }
    }

    #[test]
    fn test_validate_rejects_empty_and_bad_quantity() {
        assert!(matches!(
            validate_create_request(&request(vec![])),
            Err(OrderError::Validation(_))
        ));
        assert!(validate_create_request(&request(vec![item(0)])).is_err());
        assert!(validate_create_request(&request(vec![item(2)])).is_ok());
    }

    #[test]
    fn test_validate_tip_range() {
        let mut req = request(vec![item(1)]);
        req.tip_percentage = Some(Decimal::from(101));
        assert!(validate_create_request(&req).is_err());
        req.tip_percentage = Some(Decimal::from(-1));
        assert!(validate_create_request(&req).is_err());
        req.tip_percentage = Some(Decimal::from_str("12.5").unwrap());
        assert!(validate_create_request(&req).is_ok());
    }

    #[test]
    fn test_compute_totals() {
        // 2 × 9.50 + 1 × 16.50 = 35.50, VAT 10 %, tip 10 %
        let lines = [(Money::from_minor(950), 2), (Money::from_minor(1650), 1)];
        let totals = compute_totals(&lines, 1000, Some(Decimal::from(10))).unwrap();
        assert_eq!(totals.subtotal, Money::from_minor(3550));
        assert_eq!(totals.vat_amount, Money::from_minor(355));
        assert_eq!(totals.tip_amount, Money::from_minor(355));
        assert_eq!(totals.total, Money::from_minor(4260));
        assert_eq!(
            Some(totals.total),
            Money::checked_sum([totals.subtotal, totals.vat_amount, totals.tip_amount])
        );
    }

    #[test]
    fn test_compute_totals_overflow_is_validation_error() {
        let lines = [(Money::from_minor(i64::MAX / 2), 3)];
        assert!(matches!(
            compute_totals(&lines, 0, None),
            Err(OrderError::Validation(_))
        ));
    }
}
