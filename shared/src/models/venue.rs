//! Venue profile
//!
//! Minimal registry record the ledgers and the monthly report job hang
//! off. Identity and catalog management are external collaborators;
//! this is not an account system.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VenueProfile {
    pub id: String,
    pub name: String,
    /// Recipient for the monthly inventory report, if subscribed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_email: Option<String>,
    /// Unix millis
    pub created_at: i64,
}
