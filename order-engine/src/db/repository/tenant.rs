//! Tenant Repository

use super::RepoResult;
use shared::models::Tenant;
use sqlx::SqliteConnection;

pub async fn find_active_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
) -> RepoResult<Option<Tenant>> {
    let tenant = sqlx::query_as::<_, Tenant>(
        "SELECT id, slug, name, vat_rate_bps, currency, is_active FROM tenant WHERE slug = ? AND is_active = 1",
    )
    .bind(slug)
    .fetch_optional(conn)
    .await?;
    Ok(tenant)
}
