//! Sector work queues and bulk item updates

mod common;

use common::*;
use order_engine::orders::OrderError;
use shared::order::{ItemStatus, OrderStatus};

#[tokio::test]
async fn test_kitchen_ticket_moves_from_pending_to_in_progress() {
    let t = TestDb::new().await;
    let manager = t.manager();
    let created = manager
        .create_order(TRATTORIA, order_request("T-01", &[(MARGHERITA, 1), (LASAGNA, 2)]))
        .await
        .unwrap();
    let ids = t.item_ids(created.order_id).await;

    let view = manager
        .get_items_by_sector(TRATTORIA, "KITCHEN", &[ItemStatus::Pending])
        .await
        .unwrap();
    assert_eq!(view.pending.len(), 1);
    assert!(view.in_progress.is_empty());
    let ticket = &view.pending[0];
    assert_eq!(ticket.order_id, created.order_id);
    assert_eq!(ticket.order_number, 1);
    assert_eq!(ticket.table_number, 1);
    assert_eq!(ticket.table_name.as_deref(), Some("Window"));
    assert_eq!(ticket.items.len(), 2);
    assert_eq!(ticket.items[0].allergens, vec!["gluten", "milk"]);
    assert_eq!(ticket.items[1].quantity, 2);

    let updated = manager
        .bulk_update_item_status(TRATTORIA, &ids, ItemStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(updated, 2);

    let view = manager
        .get_items_by_sector(TRATTORIA, "KITCHEN", &[])
        .await
        .unwrap();
    assert!(view.pending.is_empty());
    assert_eq!(view.in_progress.len(), 1);
    assert_eq!(view.in_progress[0].items.len(), 2);
    assert!(view.ready.is_empty());
}

#[tokio::test]
async fn test_sector_view_routes_by_category_and_orders_oldest_first() {
    let t = TestDb::new().await;
    let manager = t.manager();
    let first = manager
        .create_order(TRATTORIA, order_request("T-02", &[(MARGHERITA, 1), (HOUSE_WINE, 2)]))
        .await
        .unwrap();
    let second = manager
        .create_order(TRATTORIA, order_request("T-03", &[(LASAGNA, 1)]))
        .await
        .unwrap();

    let kitchen = manager
        .get_items_by_sector(TRATTORIA, "kitchen", &[])
        .await
        .unwrap();
    let order_ids: Vec<i64> = kitchen.pending.iter().map(|t| t.order_id).collect();
    assert_eq!(order_ids, vec![first.order_id, second.order_id]);
    assert!(kitchen.pending.iter().flat_map(|t| &t.items).all(|i| i.dish_name != "House wine"));

    let bar = manager
        .get_items_by_sector(TRATTORIA, "BAR", &[])
        .await
        .unwrap();
    assert_eq!(bar.pending.len(), 1);
    assert_eq!(bar.pending[0].items[0].dish_name, "House wine");
    assert_eq!(bar.pending[0].items[0].quantity, 2);
}

#[tokio::test]
async fn test_sector_view_splits_order_across_buckets_and_hides_closed_orders() {
    let t = TestDb::new().await;
    let manager = t.manager();
    let open = manager
        .create_order(TRATTORIA, order_request("T-01", &[(MARGHERITA, 1), (LASAGNA, 1)]))
        .await
        .unwrap();
    let cancelled = manager
        .create_order(TRATTORIA, order_request("T-02", &[(LASAGNA, 1)]))
        .await
        .unwrap();
    let ids = t.item_ids(open.order_id).await;

    for status in [ItemStatus::InProgress, ItemStatus::Ready] {
        manager
            .bulk_update_item_status(TRATTORIA, &ids[..1], status)
            .await
            .unwrap();
    }
    manager
        .transition_order(TRATTORIA, cancelled.order_id, OrderStatus::Cancelled, None, None)
        .await
        .unwrap();

    let view = manager
        .get_items_by_sector(TRATTORIA, "KITCHEN", &[])
        .await
        .unwrap();
    assert_eq!(view.pending.len(), 1);
    assert_eq!(view.pending[0].order_id, open.order_id);
    assert_eq!(view.pending[0].items[0].item_id, ids[1]);
    assert!(view.in_progress.is_empty());
    assert_eq!(view.ready.len(), 1);
    assert_eq!(view.ready[0].items[0].item_id, ids[0]);

    let ready_only = manager
        .get_items_by_sector(TRATTORIA, "KITCHEN", &[ItemStatus::Ready])
        .await
        .unwrap();
    assert!(ready_only.pending.is_empty());
    assert_eq!(ready_only.ready.len(), 1);
}

#[tokio::test]
async fn test_sector_view_rejections() {
    let t = TestDb::new().await;
    let manager = t.manager();

    let err = manager
        .get_items_by_sector(TRATTORIA, "PASTRY", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::SectorNotFound(_)));

    let err = manager
        .get_items_by_sector(TRATTORIA, "KITCHEN", &[ItemStatus::Served])
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));

    // Empty kitchen is an empty view, not an error
    let view = manager
        .get_items_by_sector(TRATTORIA, "KITCHEN", &[])
        .await
        .unwrap();
    assert!(view.pending.is_empty() && view.in_progress.is_empty() && view.ready.is_empty());
}

#[tokio::test]
async fn test_bulk_update_is_all_or_nothing() {
    let t = TestDb::new().await;
    let manager = t.manager();
    let created = manager
        .create_order(
            TRATTORIA,
            order_request("T-01", &[(MARGHERITA, 1), (LASAGNA, 1), (HOUSE_WINE, 1)]),
        )
        .await
        .unwrap();
    let ids = t.item_ids(created.order_id).await;

    // One SERVED, the rest READY
    for status in [ItemStatus::InProgress, ItemStatus::Ready] {
        manager
            .bulk_update_item_status(TRATTORIA, &ids, status)
            .await
            .unwrap();
    }
    manager
        .bulk_update_item_status(TRATTORIA, &ids[..1], ItemStatus::Served)
        .await
        .unwrap();

    let err = manager
        .bulk_update_item_status(TRATTORIA, &ids, ItemStatus::Served)
        .await
        .unwrap_err();
    match err {
        OrderError::InvalidTransition { from, to, .. } => {
            assert_eq!(from, "SERVED");
            assert_eq!(to, "SERVED");
        }
        other => panic!("unexpected error: {other}"),
    }

    let view = manager.get_order_status(TRATTORIA, "T-01", 1).await.unwrap();
    let statuses: Vec<_> = view.items.iter().map(|i| i.status).collect();
    assert_eq!(
        statuses,
        vec![ItemStatus::Served, ItemStatus::Ready, ItemStatus::Ready]
    );
}

#[tokio::test]
async fn test_bulk_update_rejections() {
    let t = TestDb::new().await;
    let manager = t.manager();
    let created = manager
        .create_order(TRATTORIA, order_request("T-01", &[(MARGHERITA, 1)]))
        .await
        .unwrap();
    let ids = t.item_ids(created.order_id).await;

    let err = manager
        .bulk_update_item_status(TRATTORIA, &[], ItemStatus::InProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));

    let err = manager
        .bulk_update_item_status(TRATTORIA, &[ids[0], 4242], ItemStatus::InProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::ItemNotFound(4242)));

    // Skipping IN_PROGRESS is not a legal step
    let err = manager
        .bulk_update_item_status(TRATTORIA, &ids, ItemStatus::Ready)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));

    // Duplicates count once
    let updated = manager
        .bulk_update_item_status(TRATTORIA, &[ids[0], ids[0]], ItemStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(updated, 1);

    let updated = manager
        .bulk_update_item_status(TRATTORIA, &ids, ItemStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(updated, 1);
}
