//! Monthly earnings ledger record
//!
//! One entry per (venue, month). Entries accumulate additively and are
//! never deleted. Invariant: `total_amount >= cash + upi + card` —
//! cancelled orders touch `cancelled_count` only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Per-venue monthly earnings summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EarningsEntry {
    /// Human label, e.g. "March 2025"
    pub month_label: String,
    pub total_amount: f64,
    pub cash: f64,
    pub upi: f64,
    pub card: f64,
    pub paid_count: u64,
    pub cancelled_count: u64,
}

impl EarningsEntry {
    /// Fresh zeroed entry for a month (created lazily on first closure)
    pub fn new(month_label: impl Into<String>) -> Self {
        Self {
            month_label: month_label.into(),
            total_amount: 0.0,
            cash: 0.0,
            upi: 0.0,
            card: 0.0,
            paid_count: 0,
            cancelled_count: 0,
        }
    }
}

/// How an order leaves the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseOutcome {
    Paid,
    Cancelled,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown close outcome: {0}")]
pub struct ParseCloseOutcomeError(pub String);

impl FromStr for CloseOutcome {
    type Err = ParseCloseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(CloseOutcome::Paid),
            "cancelled" => Ok(CloseOutcome::Cancelled),
            other => Err(ParseCloseOutcomeError(other.to_string())),
        }
    }
}

impl fmt::Display for CloseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CloseOutcome::Paid => "paid",
            CloseOutcome::Cancelled => "cancelled",
        })
    }
}

/// Settlement method for a paid order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Upi,
    Card,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct ParsePaymentMethodError(pub String);

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "upi" => Ok(PaymentMethod::Upi),
            "card" => Ok(PaymentMethod::Card),
            other => Err(ParsePaymentMethodError(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
        })
    }
}
