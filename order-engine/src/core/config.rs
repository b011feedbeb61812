use crate::db::DbOptions;
use crate::orders::CheckoutPolicy;
use std::time::Duration;

/// 服务配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_PATH | ./data/orders.db | SQLite 数据库文件 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 默认日志级别 |
/// | LOG_DIR | (未设置) | 滚动日志目录 |
/// | DB_MAX_CONNECTIONS | 5 | 连接池大小 |
/// | DB_BUSY_TIMEOUT_MS | 5000 | SQLite busy timeout(毫秒) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | CHECKOUT_ALLOW_PENDING_ITEMS | false | 结账时允许未开始制作的菜品 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_PATH=/data/orders.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 默认日志级别 (RUST_LOG 优先)
    pub log_level: String,
    /// 日志目录，未设置时输出到 stdout
    pub log_dir: Option<String>,
    /// 连接池最大连接数
    pub db_max_connections: u32,
    /// 写锁等待时间 (毫秒)
    pub db_busy_timeout_ms: u64,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 结账时是否允许仍为 PENDING 的菜品
    pub checkout_allow_pending_items: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/orders.db".into()),
            http_port: env_parse("HTTP_PORT").unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS").unwrap_or(5),
            db_busy_timeout_ms: env_parse("DB_BUSY_TIMEOUT_MS").unwrap_or(5000),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS").unwrap_or(30000),
            checkout_allow_pending_items: env_parse("CHECKOUT_ALLOW_PENDING_ITEMS")
                .unwrap_or(false),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn db_options(&self) -> DbOptions {
        DbOptions {
            max_connections: self.db_max_connections.max(1),
            busy_timeout: Duration::from_millis(self.db_busy_timeout_ms),
        }
    }

    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            allow_pending_items: self.checkout_allow_pending_items,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
