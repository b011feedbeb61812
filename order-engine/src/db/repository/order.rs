//! Order Repository
//!
//! Status writes are conditional on the status the caller read, so a change
//! that slipped in between read and write is reported instead of overwritten.

use super::RepoResult;
use shared::models::Order;
use shared::order::{Money, OrderStatus};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, tenant_id, table_id, order_number, status, subtotal, vat_amount, tip_amount, total, customer_notes, created_by, closed_by, created_at, updated_at, closed_at";

/// Insert payload for a new order header
#[derive(Debug, Clone)]
pub struct NewOrder<'a> {
    pub tenant_id: i64,
    pub table_id: i64,
    pub order_number: i64,
    pub subtotal: Money,
    pub vat_amount: Money,
    pub tip_amount: Money,
    pub total: Money,
    pub customer_notes: Option<&'a str>,
    pub created_by: Option<&'a str>,
    pub now: i64,
}

/// Insert a PENDING order and return its id
pub async fn insert(conn: &mut SqliteConnection, data: &NewOrder<'_>) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (tenant_id, table_id, order_number, status, subtotal, vat_amount, tip_amount, total, customer_notes, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11) RETURNING id",
    )
    .bind(data.tenant_id)
    .bind(data.table_id)
    .bind(data.order_number)
    .bind(OrderStatus::Pending)
    .bind(data.subtotal)
    .bind(data.vat_amount)
    .bind(data.tip_amount)
    .bind(data.total)
    .bind(data.customer_notes)
    .bind(data.created_by)
    .bind(data.now)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    id: i64,
) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {COLUMNS} FROM orders WHERE tenant_id = ? AND id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

pub async fn find_by_table_and_number(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    table_id: i64,
    order_number: i64,
) -> RepoResult<Option<Order>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM orders WHERE tenant_id = ? AND table_id = ? AND order_number = ?"
    );
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(tenant_id)
        .bind(table_id)
        .bind(order_number)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Orders of a table that are neither PAID nor CANCELLED, oldest first
pub async fn find_open_by_table(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    table_id: i64,
) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM orders WHERE tenant_id = ? AND table_id = ? AND status NOT IN ('PAID', 'CANCELLED') ORDER BY created_at, id"
    );
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(tenant_id)
        .bind(table_id)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

/// Move an order from `from` to `to`.
///
/// Returns `false` when the stored status is no longer `from`. Terminal
/// targets also stamp `closed_at` / `closed_by`.
pub async fn update_status_if(
    conn: &mut SqliteConnection,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
    actor: Option<&str>,
    now: i64,
) -> RepoResult<bool> {
    let result = if to.is_terminal() {
        sqlx::query(
            "UPDATE orders SET status = ?1, updated_at = ?2, closed_at = ?2, closed_by = ?3 WHERE id = ?4 AND status = ?5",
        )
        .bind(to)
        .bind(now)
        .bind(actor)
        .bind(id)
        .bind(from)
        .execute(conn)
        .await?
    } else {
        sqlx::query("UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4")
            .bind(to)
            .bind(now)
            .bind(id)
            .bind(from)
            .execute(conn)
            .await?
    };
    Ok(result.rows_affected() == 1)
}

/// Replace the tip and total of an open order.
///
/// Returns `false` when the order is already PAID or CANCELLED.
pub async fn update_tip(
    conn: &mut SqliteConnection,
    id: i64,
    tip_amount: Money,
    total: Money,
    now: i64,
) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE orders SET tip_amount = ?1, total = ?2, updated_at = ?3 WHERE id = ?4 AND status NOT IN ('PAID', 'CANCELLED')",
    )
    .bind(tip_amount)
    .bind(total)
    .bind(now)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}
