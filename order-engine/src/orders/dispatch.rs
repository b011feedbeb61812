//! Sector Dispatcher
//!
//! Routes each line item to a prep sector at order creation and serves the
//! per-sector work queue that consoles poll.

use super::error::OrderError;
use super::types::{SectorTicket, SectorTicketItem, SectorView};
use crate::db::repository::catalog;
use crate::db::repository::order_item::SectorQueueRow;
use shared::models::Dish;
use shared::order::ItemStatus;
use shared::util::split_list;
use sqlx::SqliteConnection;

/// Resolve dish → category → prep sector.
///
/// Any gap in that chain (no category, category without sector, sector
/// missing or inactive) is `UnresolvedSector`; the caller rolls back.
pub async fn resolve_sector(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    dish: &Dish,
) -> Result<i64, OrderError> {
    let unresolved = |reason: &str| OrderError::UnresolvedSector {
        dish_id: dish.id,
        reason: reason.to_string(),
    };

    let category_id = dish
        .category_id
        .ok_or_else(|| unresolved("dish has no category"))?;
    let category = catalog::find_category(&mut *conn, tenant_id, category_id)
        .await?
        .ok_or_else(|| unresolved("category not found"))?;
    let sector_id = category
        .prep_sector_id
        .ok_or_else(|| unresolved("category has no prep sector"))?;
    let sector = catalog::find_sector(&mut *conn, tenant_id, sector_id)
        .await?
        .ok_or_else(|| unresolved("prep sector not found"))?;
    if !sector.is_active {
        return Err(unresolved("prep sector is inactive"));
    }
    Ok(sector.id)
}

/// Statuses a sector view may ask for.
///
/// Empty means every in-flight status. SERVED and CANCELLED have no bucket.
pub fn normalize_statuses(statuses: &[ItemStatus]) -> Result<Vec<ItemStatus>, OrderError> {
    if statuses.is_empty() {
        return Ok(ItemStatus::IN_FLIGHT.to_vec());
    }
    let mut wanted = Vec::with_capacity(3);
    for status in statuses {
        if !ItemStatus::IN_FLIGHT.contains(status) {
            return Err(OrderError::Validation(format!(
                "Sector view has no bucket for {status}"
            )));
        }
        if !wanted.contains(status) {
            wanted.push(*status);
        }
    }
    Ok(wanted)
}

/// Group queue rows (already sorted oldest order first) into buckets.
///
/// An order with items in several statuses gets one ticket per bucket,
/// each holding only that bucket's items.
pub fn group_into_buckets(rows: Vec<SectorQueueRow>) -> SectorView {
    let mut view = SectorView::default();
    for row in rows {
        let bucket = match row.status {
            ItemStatus::Pending => &mut view.pending,
            ItemStatus::InProgress => &mut view.in_progress,
            ItemStatus::Ready => &mut view.ready,
            ItemStatus::Served | ItemStatus::Cancelled => continue,
        };
        let item = SectorTicketItem {
            item_id: row.item_id,
            dish_name: row.dish_name,
            quantity: row.quantity,
            notes: row.notes,
            allergens: split_list(row.allergens.as_deref()),
            status: row.status,
        };
        match bucket.last_mut() {
            Some(ticket) if ticket.order_id == row.order_id => ticket.items.push(item),
            _ => bucket.push(SectorTicket {
                order_id: row.order_id,
                order_number: row.order_number,
                table_number: row.table_number,
                table_name: row.table_name,
                created_at: row.order_created_at,
                customer_notes: row.customer_notes,
                items: vec![item],
            }),
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(item_id: i64, order_id: i64, created_at: i64, status: ItemStatus) -> SectorQueueRow {
        SectorQueueRow {
            item_id,
            order_id,
            order_number: order_id,
            order_created_at: created_at,
            customer_notes: None,
            table_number: 4,
            table_name: Some("Terrace 4".into()),
            dish_name: format!("dish-{item_id}"),
            quantity: 1,
            notes: None,
            allergens: Some("gluten,milk".into()),
            status,
        }
    }

    #[test]
    fn test_normalize_statuses() {
        assert_eq!(normalize_statuses(&[]).unwrap(), ItemStatus::IN_FLIGHT.to_vec());
        assert_eq!(
            normalize_statuses(&[ItemStatus::Ready, ItemStatus::Ready]).unwrap(),
            vec![ItemStatus::Ready]
        );
        assert!(matches!(
            normalize_statuses(&[ItemStatus::Pending, ItemStatus::Served]),
            Err(OrderError::Validation(_))
        ));
    }

    #[test]
    fn test_group_keeps_order_and_splits_buckets() {
        // Rows arrive sorted by order creation time, then item id
        let rows = vec![
            row(1, 10, 100, ItemStatus::Pending),
            row(2, 10, 100, ItemStatus::InProgress),
            row(3, 10, 100, ItemStatus::Pending),
            row(4, 11, 200, ItemStatus::Pending),
            row(5, 11, 200, ItemStatus::Ready),
        ];
        let view = group_into_buckets(rows);

        assert_eq!(view.pending.len(), 2);
        assert_eq!(view.pending[0].order_id, 10);
        assert_eq!(
            view.pending[0].items.iter().map(|i| i.item_id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(view.pending[1].order_id, 11);

        assert_eq!(view.in_progress.len(), 1);
        assert_eq!(view.in_progress[0].items[0].item_id, 2);

        assert_eq!(view.ready.len(), 1);
        assert_eq!(view.ready[0].order_id, 11);
        assert_eq!(view.ready[0].items[0].allergens, vec!["gluten", "milk"]);
    }
}
