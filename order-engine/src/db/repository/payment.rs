//! Payment Repository
//!
//! `order_id` is UNIQUE: a second payment for the same order is a
//! `RepoError::Duplicate`.

use super::RepoResult;
use shared::models::{Payment, PaymentMethod, PaymentStatus};
use shared::order::Money;
use sqlx::SqliteConnection;

pub async fn insert_completed(
    conn: &mut SqliteConnection,
    order_id: i64,
    method: PaymentMethod,
    amount: Money,
    now: i64,
) -> RepoResult<Payment> {
    let payment = sqlx::query_as::<_, Payment>(
        "INSERT INTO payment (order_id, method, status, amount, paid_at, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) RETURNING id, order_id, method, status, amount, paid_at, created_at",
    )
    .bind(order_id)
    .bind(method)
    .bind(PaymentStatus::Completed)
    .bind(amount)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(payment)
}

pub async fn find_by_order(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> RepoResult<Option<Payment>> {
    let payment = sqlx::query_as::<_, Payment>(
        "SELECT id, order_id, method, status, amount, paid_at, created_at FROM payment WHERE order_id = ?",
    )
    .bind(order_id)
    .fetch_optional(conn)
    .await?;
    Ok(payment)
}
