//! Shared fixtures for integration tests
//!
//! Every test gets its own SQLite file in a temp dir with this menu:
//!
//! | tenant | vat | sectors | tables |
//! |--------|-----|---------|--------|
//! | trattoria (1) | 10 % | KITCHEN, BAR, GRILL (inactive) | T-01, T-02, T-03 |
//! | bistro (2) | 0 % | KITCHEN | B-01 |
//! | closed (3, inactive) | 0 % | - | - |
#![allow(dead_code)]

use order_engine::orders::{CheckoutPolicy, CreateOrderRequest, NewItem, OrdersManager};
use order_engine::{Config, DbOptions, DbService, ServerState};
use std::time::Duration;
use tempfile::TempDir;

pub const TRATTORIA: &str = "trattoria";
pub const BISTRO: &str = "bistro";
pub const CLOSED_TENANT: &str = "closed";

// trattoria dishes
pub const MARGHERITA: i64 = 1; // 9.50, KITCHEN
pub const LASAGNA: i64 = 2; // 16.50, KITCHEN
pub const HOUSE_WINE: i64 = 3; // 4.50, BAR
pub const CHEF_SPECIAL: i64 = 4; // category without sector
pub const TIRAMISU: i64 = 5; // not available
pub const RIBEYE: i64 = 6; // inactive GRILL sector
pub const MINESTRONE: i64 = 7; // out of stock
pub const UNCATEGORIZED: i64 = 8; // no category

// bistro dishes
pub const BISTRO_MENU: i64 = 20; // 20.00
pub const BISTRO_BURGER: i64 = 21; // 15.50

pub const T01: i64 = 1;
pub const T02: i64 = 2;
pub const T03: i64 = 3;
pub const B01: i64 = 10;

const SEED: &str = r#"
INSERT INTO tenant (id, slug, name, vat_rate_bps, currency, is_active) VALUES
    (1, 'trattoria', 'Trattoria da Nino', 1000, 'EUR', 1),
    (2, 'bistro', 'Petit Bistro', 0, 'EUR', 1),
    (3, 'closed', 'Closed Place', 0, 'EUR', 0);

INSERT INTO dining_table (id, tenant_id, number, name, access_code, status, is_active) VALUES
    (1, 1, 1, 'Window', 'T-01', 'AVAILABLE', 1),
    (2, 1, 2, NULL, 'T-02', 'AVAILABLE', 1),
    (3, 1, 3, 'Terrace', 'T-03', 'AVAILABLE', 1),
    (4, 1, 4, NULL, 'T-04', 'AVAILABLE', 0),
    (10, 2, 1, NULL, 'B-01', 'AVAILABLE', 1);

INSERT INTO prep_sector (id, tenant_id, code, name, is_active) VALUES
    (1, 1, 'KITCHEN', 'Kitchen', 1),
    (2, 1, 'BAR', 'Bar', 1),
    (3, 1, 'GRILL', 'Grill', 0),
    (10, 2, 'KITCHEN', 'Kitchen', 1);

INSERT INTO category (id, tenant_id, name, prep_sector_id) VALUES
    (1, 1, 'Mains', 1),
    (2, 1, 'Drinks', 2),
    (3, 1, 'Specials', NULL),
    (4, 1, 'Grill', 3),
    (10, 2, 'Menu', 10);

INSERT INTO dish (id, tenant_id, category_id, name, price, allergens, is_available, is_in_stock) VALUES
    (1, 1, 1, 'Margherita', 950, 'gluten,milk', 1, 1),
    (2, 1, 1, 'Lasagna', 1650, 'gluten,milk,egg', 1, 1),
    (3, 1, 2, 'House wine', 450, 'sulphites', 1, 1),
    (4, 1, 3, 'Chef special', 2200, NULL, 1, 1),
    (5, 1, 1, 'Tiramisu', 600, 'egg,milk', 0, 1),
    (6, 1, 4, 'Ribeye', 2800, NULL, 1, 1),
    (7, 1, 1, 'Minestrone', 800, 'celery', 1, 0),
    (8, 1, NULL, 'Bread basket', 200, 'gluten', 1, 1),
    (20, 2, 10, 'Menu du jour', 2000, NULL, 1, 1),
    (21, 2, 10, 'Burger', 1550, 'gluten', 1, 1);
"#;

/// Temp database, removed when dropped
pub struct TestDb {
    pub dir: TempDir,
    pub db: DbService,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("orders.db");
        let opts = DbOptions {
            max_connections: 5,
            busy_timeout: Duration::from_secs(30),
        };
        let db = DbService::new(path.to_str().expect("utf-8 path"), &opts)
            .await
            .expect("open database");
        sqlx::raw_sql(SEED).execute(&db.pool).await.expect("seed");
        Self { dir, db }
    }

    pub fn manager(&self) -> OrdersManager {
        OrdersManager::new(self.db.pool.clone(), CheckoutPolicy::default())
    }

    pub fn lenient_manager(&self) -> OrdersManager {
        OrdersManager::new(
            self.db.pool.clone(),
            CheckoutPolicy {
                allow_pending_items: true,
            },
        )
    }

    pub fn state(&self) -> ServerState {
        let path = self.dir.path().join("orders.db");
        let config = Config::with_overrides(path.to_string_lossy(), 0);
        ServerState::new(config, self.db.clone())
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.db.pool)
            .await
            .expect("count")
    }

    pub async fn item_ids(&self, order_id: i64) -> Vec<i64> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM order_item WHERE order_id = ? ORDER BY id")
            .bind(order_id)
            .fetch_all(&self.db.pool)
            .await
            .expect("item ids")
    }
}

pub fn order_request(table_code: &str, items: &[(i64, i64)]) -> CreateOrderRequest {
    CreateOrderRequest {
        table_code: table_code.to_string(),
        items: items
            .iter()
            .map(|(dish_id, quantity)| NewItem {
                dish_id: *dish_id,
                quantity: *quantity,
                notes: None,
            })
            .collect(),
        customer_notes: None,
        tip_percentage: None,
        created_by: None,
    }
}
