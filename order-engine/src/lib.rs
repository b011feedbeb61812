//! Order Engine - 餐厅点单到付款的工作流引擎
//!
//! # 架构概述
//!
//! - **订单** (`orders`): 订单/菜品状态机、出品部门分单、结账聚合、订单编号
//! - **数据库** (`db`): SQLite (WAL) 连接池、迁移、仓储函数
//! - **HTTP API** (`api`): 按租户划分的 RESTful 接口
//! - **核心** (`core`): 配置、共享状态、服务器
//!
//! # 模块结构
//!
//! ```text
//! order-engine/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── server/        # 中间件
//! ├── utils/         # 日志、校验
//! ├── db/            # 数据库层
//! └── orders/        # 订单引擎
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod server;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use db::{DbOptions, DbService};
pub use orders::{CheckoutPolicy, OrderError, OrdersManager};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

