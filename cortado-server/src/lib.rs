//! Cortado - 单店咖啡馆订单与台账引擎
//!
//! # 架构概述
//!
//! 本模块是引擎的主入口，提供以下核心功能：
//!
//! - **订单聚合** (`orders`): 开单合并、条目生命周期、乐观并发
//! - **定价** (`pricing`): 行价解析与 Decimal 金额运算
//! - **台账** (`ledgers`): 场馆注册、月度收入折叠、库存流水
//! - **报表** (`reports`): 月度库存报表调度与投递
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! cortado-server/src/
//! ├── core/          # 配置、状态、错误、后台任务
//! ├── orders/        # 订单合并与条目生命周期
//! ├── pricing/       # 金额运算
//! ├── ledgers/       # 收入与库存台账
//! ├── reports/       # 月度报表
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod ledgers;
pub mod orders;
pub mod pricing;
pub mod reports;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use ledgers::{EarningsLedger, InventoryLedger, VenueRegistry};
pub use orders::{OrderStorage, OrdersManager};
pub use reports::{LogNotifier, ReportNotifier, ReportScheduler};
pub use utils::{AppError, AppResult, EngineError, EngineResult};

// Re-export logger functions
pub use utils::logger::init_logger;

pub fn print_banner() {
    println!(
        r#"
   ______           __            __
  / ____/___  _____/ /_____ _____/ /___
 / /   / __ \/ ___/ __/ __ `/ __  / __ \
/ /___/ /_/ / /  / /_/ /_/ / /_/ / /_/ /
\____/\____/_/   \__/\__,_/\__,_/\____/
    "#
    );
}
