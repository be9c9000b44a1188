//! Line-item status machine
//!
//! ```text
//! Pending ──► Preparing ──► Delivered ──► Paid
//!    │            │             │
//!    └────────────┴─────────────┴──► Cancelled
//! ```
//!
//! Forward moves may skip intermediate states (a runner can mark a
//! pending item delivered directly). `Paid` and `Cancelled` are
//! terminal. Re-asserting the current status is an accepted no-op.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Preparation lifecycle state of one line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Preparing,
    Delivered,
    Paid,
    Cancelled,
}

/// Returned when parsing an unknown status string
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown item status: {0}")]
pub struct ParseItemStatusError(pub String);

impl ItemStatus {
    /// Position on the forward path (Cancelled is off-path)
    fn rank(&self) -> u8 {
        match self {
            ItemStatus::Pending => 0,
            ItemStatus::Preparing => 1,
            ItemStatus::Delivered => 2,
            ItemStatus::Paid => 3,
            ItemStatus::Cancelled => 4,
        }
    }

    /// No further transitions are allowed out of a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemStatus::Paid | ItemStatus::Cancelled)
    }

    /// The item still occupies the kitchen pipeline
    pub fn is_live(&self) -> bool {
        matches!(self, ItemStatus::Pending | ItemStatus::Preparing)
    }

    /// Whether `self -> next` is a legal transition
    ///
    /// Same-status is allowed (idempotent retry). Cancellation is
    /// reachable from any pre-paid state. Otherwise only forward moves
    /// are accepted.
    pub fn can_transition_to(&self, next: ItemStatus) -> bool {
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        if next == ItemStatus::Cancelled {
            return true;
        }
        next != ItemStatus::Cancelled && next.rank() > self.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Preparing => "preparing",
            ItemStatus::Delivered => "delivered",
            ItemStatus::Paid => "paid",
            ItemStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ParseItemStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "preparing" => Ok(ItemStatus::Preparing),
            "delivered" => Ok(ItemStatus::Delivered),
            "paid" => Ok(ItemStatus::Paid),
            "cancelled" => Ok(ItemStatus::Cancelled),
            other => Err(ParseItemStatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_moves_allowed_including_skips() {
        assert!(ItemStatus::Pending.can_transition_to(ItemStatus::Preparing));
        assert!(ItemStatus::Pending.can_transition_to(ItemStatus::Delivered));
        assert!(ItemStatus::Pending.can_transition_to(ItemStatus::Paid));
        assert!(ItemStatus::Preparing.can_transition_to(ItemStatus::Delivered));
        assert!(ItemStatus::Delivered.can_transition_to(ItemStatus::Paid));
    }

    #[test]
    fn backward_moves_rejected() {
        assert!(!ItemStatus::Preparing.can_transition_to(ItemStatus::Pending));
        assert!(!ItemStatus::Delivered.can_transition_to(ItemStatus::Preparing));
        assert!(!ItemStatus::Paid.can_transition_to(ItemStatus::Delivered));
    }

    #[test]
    fn cancellation_from_any_pre_paid_state() {
        assert!(ItemStatus::Pending.can_transition_to(ItemStatus::Cancelled));
        assert!(ItemStatus::Preparing.can_transition_to(ItemStatus::Cancelled));
        assert!(ItemStatus::Delivered.can_transition_to(ItemStatus::Cancelled));
        assert!(!ItemStatus::Paid.can_transition_to(ItemStatus::Cancelled));
    }

    #[test]
    fn terminal_states_are_sticky() {
        assert!(!ItemStatus::Cancelled.can_transition_to(ItemStatus::Pending));
        assert!(!ItemStatus::Cancelled.can_transition_to(ItemStatus::Paid));
        assert!(!ItemStatus::Paid.can_transition_to(ItemStatus::Pending));
    }

    #[test]
    fn same_status_is_a_no_op() {
        assert!(ItemStatus::Preparing.can_transition_to(ItemStatus::Preparing));
        assert!(ItemStatus::Paid.can_transition_to(ItemStatus::Paid));
    }

    #[test]
    fn wire_format_is_lowercase() {
        let s = serde_json::to_string(&ItemStatus::Preparing).unwrap();
        assert_eq!(s, "\"preparing\"");
        assert_eq!("delivered".parse::<ItemStatus>().unwrap(), ItemStatus::Delivered);
        assert!("shipped".parse::<ItemStatus>().is_err());
    }
}
