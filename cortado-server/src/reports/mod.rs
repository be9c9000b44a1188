//! 报表模块 — 月度库存报表编制与投递

pub mod notifier;
pub mod scheduler;

pub use notifier::{LogNotifier, NotifyError, ReportNotifier};
pub use scheduler::ReportScheduler;
