use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrdersManager;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (连接池内部为 Arc)，可直接作为 axum State 使用。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | orders | OrdersManager | 订单引擎入口 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务配置
    pub config: Config,
    /// SQLite 数据库服务
    pub db: DbService,
    /// 订单引擎
    pub orders: OrdersManager,
}

impl ServerState {
    /// 手动构造 (测试中使用已初始化的数据库)
    pub fn new(config: Config, db: DbService) -> Self {
        let orders = OrdersManager::new(db.pool.clone(), config.checkout_policy());
        Self { config, db, orders }
    }

    /// 初始化服务器状态
    ///
    /// 1. 打开数据库并执行迁移
    /// 2. 按配置创建订单引擎
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path, &config.db_options()).await?;
        let state = Self::new(config.clone(), db);
        tracing::info!(
            environment = %config.environment,
            allow_pending_items = config.checkout_allow_pending_items,
            "Server state initialized"
        );
        Ok(state)
    }
}
