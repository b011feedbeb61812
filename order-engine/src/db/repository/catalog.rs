//! Catalog Repository (dishes, categories, prep sectors)
//!
//! Read-only: menu maintenance lives outside the order engine.

use super::RepoResult;
use shared::models::{Category, Dish, PrepSector};
use sqlx::SqliteConnection;

pub async fn find_dish(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    dish_id: i64,
) -> RepoResult<Option<Dish>> {
    let dish = sqlx::query_as::<_, Dish>(
        "SELECT id, tenant_id, category_id, name, price, allergens, is_available, is_in_stock FROM dish WHERE tenant_id = ? AND id = ?",
    )
    .bind(tenant_id)
    .bind(dish_id)
    .fetch_optional(conn)
    .await?;
    Ok(dish)
}

pub async fn find_category(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    category_id: i64,
) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, tenant_id, name, prep_sector_id FROM category WHERE tenant_id = ? AND id = ?",
    )
    .bind(tenant_id)
    .bind(category_id)
    .fetch_optional(conn)
    .await?;
    Ok(category)
}

pub async fn find_sector(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    sector_id: i64,
) -> RepoResult<Option<PrepSector>> {
    let sector = sqlx::query_as::<_, PrepSector>(
        "SELECT id, tenant_id, code, name, is_active FROM prep_sector WHERE tenant_id = ? AND id = ?",
    )
    .bind(tenant_id)
    .bind(sector_id)
    .fetch_optional(conn)
    .await?;
    Ok(sector)
}

/// Sector codes are matched case-insensitively ("kitchen" == "KITCHEN")
pub async fn find_sector_by_code(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    code: &str,
) -> RepoResult<Option<PrepSector>> {
    let sector = sqlx::query_as::<_, PrepSector>(
        "SELECT id, tenant_id, code, name, is_active FROM prep_sector WHERE tenant_id = ? AND code = ? COLLATE NOCASE",
    )
    .bind(tenant_id)
    .bind(code)
    .fetch_optional(conn)
    .await?;
    Ok(sector)
}
