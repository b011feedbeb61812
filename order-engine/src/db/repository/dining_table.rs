//! Dining Table Repository

use super::RepoResult;
use shared::models::DiningTable;
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, tenant_id, number, name, access_code, status, is_active";

/// Find an active table by its QR access code
pub async fn find_by_access_code(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    access_code: &str,
) -> RepoResult<Option<DiningTable>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM dining_table WHERE tenant_id = ? AND access_code = ? AND is_active = 1"
    );
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(tenant_id)
        .bind(access_code)
        .fetch_optional(conn)
        .await?;
    Ok(table)
}

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    id: i64,
) -> RepoResult<Option<DiningTable>> {
    let sql = format!("SELECT {COLUMNS} FROM dining_table WHERE tenant_id = ? AND id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(table)
}
