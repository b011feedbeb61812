//! Order Item Repository

use super::{RepoResult, in_placeholders};
use shared::models::OrderItem;
use shared::order::{ItemStatus, Money, OrderStatus};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, order_id, dish_id, prep_sector_id, dish_name, quantity, unit_price, notes, status, created_at, updated_at";

/// Insert payload for a line item
#[derive(Debug, Clone)]
pub struct NewOrderItem<'a> {
    pub order_id: i64,
    pub dish_id: i64,
    pub prep_sector_id: i64,
    pub dish_name: &'a str,
    pub quantity: i64,
    pub unit_price: Money,
    pub notes: Option<&'a str>,
    pub now: i64,
}

/// Item joined with its parent order's status, used by bulk transitions
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemWithOrder {
    pub id: i64,
    pub order_id: i64,
    pub status: ItemStatus,
    pub order_status: OrderStatus,
}

/// One row of a prep sector queue, denormalized for the console
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SectorQueueRow {
    pub item_id: i64,
    pub order_id: i64,
    pub order_number: i64,
    pub order_created_at: i64,
    pub customer_notes: Option<String>,
    pub table_number: i64,
    pub table_name: Option<String>,
    pub dish_name: String,
    pub quantity: i64,
    pub notes: Option<String>,
    pub allergens: Option<String>,
    pub status: ItemStatus,
}

pub async fn insert(conn: &mut SqliteConnection, data: &NewOrderItem<'_>) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO order_item (order_id, dish_id, prep_sector_id, dish_name, quantity, unit_price, notes, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9) RETURNING id",
    )
    .bind(data.order_id)
    .bind(data.dish_id)
    .bind(data.prep_sector_id)
    .bind(data.dish_name)
    .bind(data.quantity)
    .bind(data.unit_price)
    .bind(data.notes)
    .bind(ItemStatus::Pending)
    .bind(data.now)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn find_by_order(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("SELECT {COLUMNS} FROM order_item WHERE order_id = ? ORDER BY id");
    let items = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(conn)
        .await?;
    Ok(items)
}

/// Items of several orders, grouped by order then id
pub async fn find_by_orders(
    conn: &mut SqliteConnection,
    order_ids: &[i64],
) -> RepoResult<Vec<OrderItem>> {
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {COLUMNS} FROM order_item WHERE order_id IN {} ORDER BY order_id, id",
        in_placeholders(order_ids.len())
    );
    let mut query = sqlx::query_as::<_, OrderItem>(&sql);
    for id in order_ids {
        query = query.bind(*id);
    }
    Ok(query.fetch_all(conn).await?)
}

/// Look up items by id, restricted to the tenant's orders
pub async fn find_with_order_status(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    item_ids: &[i64],
) -> RepoResult<Vec<ItemWithOrder>> {
    if item_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT oi.id, oi.order_id, oi.status, o.status AS order_status FROM order_item oi JOIN orders o ON o.id = oi.order_id WHERE o.tenant_id = ? AND oi.id IN {} ORDER BY oi.id",
        in_placeholders(item_ids.len())
    );
    let mut query = sqlx::query_as::<_, ItemWithOrder>(&sql).bind(tenant_id);
    for id in item_ids {
        query = query.bind(*id);
    }
    Ok(query.fetch_all(conn).await?)
}

/// Move an item from `from` to `to`; `false` when it is no longer at `from`
pub async fn update_status_if(
    conn: &mut SqliteConnection,
    id: i64,
    from: ItemStatus,
    to: ItemStatus,
    now: i64,
) -> RepoResult<bool> {
    let result =
        sqlx::query("UPDATE order_item SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4")
            .bind(to)
            .bind(now)
            .bind(id)
            .bind(from)
            .execute(conn)
            .await?;
    Ok(result.rows_affected() == 1)
}

/// Cancel every item of the order that is not SERVED or CANCELLED yet
pub async fn cancel_open_items(
    conn: &mut SqliteConnection,
    order_id: i64,
    now: i64,
) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE order_item SET status = 'CANCELLED', updated_at = ?1 WHERE order_id = ?2 AND status NOT IN ('SERVED', 'CANCELLED')",
    )
    .bind(now)
    .bind(order_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

/// Items of one sector in the given statuses, oldest order first.
///
/// Items of PAID or CANCELLED orders are left out.
pub async fn sector_queue(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    sector_id: i64,
    statuses: &[ItemStatus],
) -> RepoResult<Vec<SectorQueueRow>> {
    if statuses.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT oi.id AS item_id, o.id AS order_id, o.order_number, o.created_at AS order_created_at, o.customer_notes, t.number AS table_number, t.name AS table_name, oi.dish_name, oi.quantity, oi.notes, d.allergens, oi.status \
         FROM order_item oi \
         JOIN orders o ON o.id = oi.order_id \
         JOIN dining_table t ON t.id = o.table_id \
         LEFT JOIN dish d ON d.id = oi.dish_id \
         WHERE o.tenant_id = ? AND oi.prep_sector_id = ? AND o.status NOT IN ('PAID', 'CANCELLED') AND oi.status IN {} \
         ORDER BY o.created_at, o.id, oi.id",
        in_placeholders(statuses.len())
    );
    let mut query = sqlx::query_as::<_, SectorQueueRow>(&sql)
        .bind(tenant_id)
        .bind(sector_id);
    for status in statuses {
        query = query.bind(*status);
    }
    Ok(query.fetch_all(conn).await?)
}
