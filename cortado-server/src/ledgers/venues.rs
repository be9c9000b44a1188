//! Venue registry
//!
//! Minimal upsert/list surface the earnings ledger, inventory ledger
//! and report job validate venue references against.

use tracing::info;

use crate::utils::error::{EngineError, EngineResult};
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};
use shared::models::VenueProfile;

use super::storage::LedgerStorage;

#[derive(Clone)]
pub struct VenueRegistry {
    storage: LedgerStorage,
}

impl VenueRegistry {
    pub fn new(storage: LedgerStorage) -> Self {
        Self { storage }
    }

    /// Register a venue or update its profile
    ///
    /// `created_at` is preserved across updates.
    pub fn upsert_venue(
        &self,
        id: &str,
        name: &str,
        report_email: Option<String>,
    ) -> EngineResult<VenueProfile> {
        validate_required_text(id, "venue id", MAX_NAME_LEN)?;
        validate_required_text(name, "venue name", MAX_NAME_LEN)?;
        validate_optional_text(&report_email, "report_email", MAX_NAME_LEN)?;

        let txn = self.storage.begin_write()?;
        let existing = self.storage.get_venue_txn(&txn, id)?;
        let venue = VenueProfile {
            id: id.to_string(),
            name: name.to_string(),
            report_email,
            created_at: existing
                .map(|v| v.created_at)
                .unwrap_or_else(shared::util::now_millis),
        };
        self.storage.put_venue(&txn, &venue)?;
        self.storage.commit(txn)?;

        info!(venue_id = %id, "Venue upserted");
        Ok(venue)
    }

    pub fn get_venue(&self, id: &str) -> EngineResult<VenueProfile> {
        self.storage
            .get_venue(id)?
            .ok_or_else(|| EngineError::not_found(format!("Venue {id} not found")))
    }

    pub fn list_venues(&self) -> EngineResult<Vec<VenueProfile>> {
        Ok(self.storage.list_venues()?)
    }
}
