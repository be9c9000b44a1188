//! 台账模块 — 场馆注册、收入折叠、库存流水

pub mod earnings;
pub mod inventory;
pub mod storage;
pub mod venues;

pub use earnings::{ClosedOrder, EarningsLedger};
pub use inventory::InventoryLedger;
pub use storage::LedgerStorage;
pub use venues::VenueRegistry;
