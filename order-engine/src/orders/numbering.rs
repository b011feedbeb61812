//! Order Numbering Service
//!
//! One counter row per tenant, bumped by a single upsert inside the
//! order-creation transaction. A rolled-back creation rolls its increment
//! back too; a committed number is never handed out again.

use crate::db::repository::RepoResult;
use sqlx::SqliteConnection;

/// Next order number for the tenant (1 for the first order)
pub async fn next_order_number(conn: &mut SqliteConnection, tenant_id: i64) -> RepoResult<i64> {
    let number = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO order_counter (tenant_id, last_number)
        VALUES (?, 1)
        ON CONFLICT (tenant_id) DO UPDATE SET
            last_number = order_counter.last_number + 1
        RETURNING last_number
        "#,
    )
    .bind(tenant_id)
    .fetch_one(conn)
    .await?;
    Ok(number)
}
