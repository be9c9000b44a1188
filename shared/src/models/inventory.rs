//! Monthly inventory bucket
//!
//! One bucket per (venue, month label). Rows append in submission
//! order and never overwrite; deletion is by row identity only.

use serde::{Deserialize, Serialize};

/// One dated inventory entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRow {
    /// Snowflake ID assigned at append time
    pub id: i64,
    pub item: String,
    pub quantity: f64,
    pub unit: String,
    /// Amount before tax
    pub amount: f64,
    pub tax_percent: f64,
    pub total: f64,
    /// Free-form entry date as written by staff
    pub date: String,
    pub entered_by: String,
}

/// Row as submitted by the client (ID assigned server-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRowInput {
    pub item: String,
    pub quantity: f64,
    pub unit: String,
    pub amount: f64,
    pub tax_percent: f64,
    pub total: f64,
    pub date: String,
    pub entered_by: String,
}

/// Per-venue monthly inventory ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryBucket {
    pub venue_id: String,
    /// Human month label, e.g. "March 2025" — the same label the
    /// monthly report job resolves
    pub month: String,
    pub rows: Vec<InventoryRow>,
}

impl InventoryBucket {
    pub fn new(venue_id: impl Into<String>, month: impl Into<String>) -> Self {
        Self {
            venue_id: venue_id.into(),
            month: month.into(),
            rows: Vec::new(),
        }
    }
}
