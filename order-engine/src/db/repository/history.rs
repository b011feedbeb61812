//! Order Status History Repository (append-only)

use super::RepoResult;
use shared::models::OrderStatusHistory;
use shared::order::OrderStatus;
use sqlx::SqliteConnection;

pub async fn append(
    conn: &mut SqliteConnection,
    order_id: i64,
    from: Option<OrderStatus>,
    to: OrderStatus,
    actor: Option<&str>,
    notes: Option<&str>,
    now: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO order_status_history (order_id, from_status, to_status, actor, notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(order_id)
    .bind(from)
    .bind(to)
    .bind(actor)
    .bind(notes)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// History of one order in the order it was written
pub async fn find_by_order(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> RepoResult<Vec<OrderStatusHistory>> {
    let rows = sqlx::query_as::<_, OrderStatusHistory>(
        "SELECT id, order_id, from_status, to_status, actor, notes, created_at FROM order_status_history WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}
