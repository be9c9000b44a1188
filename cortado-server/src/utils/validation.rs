//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by
//! the engine managers. Limits are reasonable UX bounds; redb imposes
//! no length enforcement of its own.

use crate::utils::{EngineError, EngineResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: dish, category, venue, table, customer, unit, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Cooking requests and other free-form notes (append-only, so the cap
/// applies per submission, not to the accumulated text)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: month labels, entry dates, staff names
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
///
/// `|` is reserved as the open-bill index key separator and is rejected
/// in all required text so key components can never collide.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(EngineError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(EngineError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    if value.contains('|') {
        return Err(EngineError::validation(format!("{field} must not contain '|'")));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> EngineResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(EngineError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}
