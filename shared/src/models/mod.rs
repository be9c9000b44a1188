//! Persisted ledger models
//!
//! | 模型 | 键 | 说明 |
//! |------|----|------|
//! | [`EarningsEntry`] | (venue, month) | 月度营收汇总 (append-only) |
//! | [`InventoryBucket`] | (venue, month) | 月度库存条目桶 |
//! | [`VenueProfile`] | venue id | 门店档案 (报表收件人) |

pub mod earnings;
pub mod inventory;
pub mod venue;

pub use earnings::{CloseOutcome, EarningsEntry, ParseCloseOutcomeError, ParsePaymentMethodError, PaymentMethod};
pub use inventory::{InventoryBucket, InventoryRow, InventoryRowInput};
pub use venue::VenueProfile;
