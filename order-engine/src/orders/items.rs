//! Item Lifecycle Machine
//!
//! Bulk item transitions are all-or-nothing: every item is checked before
//! the first write, and a failed conditional write aborts the transaction.

use super::error::{OrderError, TransitionSubject};
use crate::db::repository::order_item;
use shared::order::ItemStatus;
use sqlx::SqliteConnection;

/// Collapse duplicates while keeping first-seen order
pub fn dedup_ids(item_ids: &[i64]) -> Vec<i64> {
    let mut ids = Vec::with_capacity(item_ids.len());
    for id in item_ids {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }
    ids
}

/// Move every listed item to `target`; returns the number updated.
///
/// Fails with `ItemNotFound` for an id outside the tenant and with
/// `InvalidTransition` for the first ineligible item, including items whose
/// order is already PAID or CANCELLED.
pub async fn bulk_transition(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    item_ids: &[i64],
    target: ItemStatus,
    now: i64,
) -> Result<usize, OrderError> {
    let ids = dedup_ids(item_ids);
    if ids.is_empty() {
        return Err(OrderError::Validation("itemIds must not be empty".into()));
    }

    let found = order_item::find_with_order_status(&mut *conn, tenant_id, &ids).await?;
    if let Some(missing) = ids.iter().find(|id| !found.iter().any(|f| f.id == **id)) {
        return Err(OrderError::ItemNotFound(*missing));
    }

    for item in &found {
        let subject = TransitionSubject::Item(item.id);
        if item.order_status.is_terminal() || !item.status.can_transition_to(target) {
            return Err(OrderError::invalid_transition(subject, item.status, target));
        }
    }

    for item in &found {
        let updated =
            order_item::update_status_if(&mut *conn, item.id, item.status, target, now).await?;
        if !updated {
            return Err(OrderError::invalid_transition(
                TransitionSubject::Item(item.id),
                item.status,
                target,
            ));
        }
    }

    tracing::info!(
        count = found.len(),
        to = %target,
        "Item statuses updated"
    );
    Ok(found.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_ids() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_ids(&[]).is_empty());
    }
}
