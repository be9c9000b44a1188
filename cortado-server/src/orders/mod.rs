//! 订单模块 — 合并聚合、条目生命周期、持久化

pub mod manager;
pub mod storage;

pub use manager::OrdersManager;
pub use storage::{OrderStorage, StorageError, StorageResult};
