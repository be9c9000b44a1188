//! Inventory ledger — append-only monthly purchase rows
//!
//! Rows append to a per-(venue, month label) bucket in submission
//! order. Each row gets a snowflake ID at append time; deletion is by
//! that identity only, never by position. Row totals are recorded as
//! entered by staff — the engine does not recompute `amount × tax`.

use tracing::info;

use crate::pricing;
use crate::utils::error::{EngineError, EngineResult};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use shared::models::{InventoryBucket, InventoryRow, InventoryRowInput};

use super::storage::LedgerStorage;

#[derive(Clone)]
pub struct InventoryLedger {
    storage: LedgerStorage,
}

impl InventoryLedger {
    pub fn new(storage: LedgerStorage) -> Self {
        Self { storage }
    }

    /// Append rows to a venue's bucket for the given month label
    ///
    /// Creates the bucket lazily; returns the updated bucket with the
    /// new rows carrying their assigned IDs.
    pub fn append_rows(
        &self,
        venue_id: &str,
        month: &str,
        inputs: Vec<InventoryRowInput>,
    ) -> EngineResult<InventoryBucket> {
        validate_required_text(month, "month", MAX_SHORT_TEXT_LEN)?;
        if inputs.is_empty() {
            return Err(EngineError::validation("at least one inventory row is required"));
        }
        for input in &inputs {
            validate_required_text(&input.item, "item", MAX_NAME_LEN)?;
            validate_required_text(&input.unit, "unit", MAX_SHORT_TEXT_LEN)?;
            validate_required_text(&input.date, "date", MAX_SHORT_TEXT_LEN)?;
            validate_required_text(&input.entered_by, "entered_by", MAX_NAME_LEN)?;
            pricing::validate_price(input.amount, "amount")?;
            pricing::validate_price(input.total, "total")?;
            pricing::validate_price(input.tax_percent, "tax_percent")?;
            if !input.quantity.is_finite() || input.quantity <= 0.0 {
                return Err(EngineError::validation(format!(
                    "quantity must be positive, got {}",
                    input.quantity
                )));
            }
        }

        let txn = self.storage.begin_write()?;
        self.storage
            .get_venue_txn(&txn, venue_id)?
            .ok_or_else(|| EngineError::not_found(format!("Venue {venue_id} not found")))?;

        let mut bucket = self
            .storage
            .get_bucket_txn(&txn, venue_id, month)?
            .unwrap_or_else(|| InventoryBucket::new(venue_id, month));

        let appended = inputs.len();
        bucket.rows.extend(inputs.into_iter().map(|input| InventoryRow {
            id: shared::util::snowflake_id(),
            item: input.item,
            quantity: input.quantity,
            unit: input.unit,
            amount: input.amount,
            tax_percent: input.tax_percent,
            total: input.total,
            date: input.date,
            entered_by: input.entered_by,
        }));

        self.storage.put_bucket(&txn, &bucket)?;
        self.storage.commit(txn)?;

        info!(
            venue_id = %venue_id,
            month = %month,
            rows = appended,
            "Inventory rows appended"
        );
        Ok(bucket)
    }

    /// All rows for a venue's month, in insertion order
    pub fn list_rows(&self, venue_id: &str, month: &str) -> EngineResult<Vec<InventoryRow>> {
        self.storage
            .get_venue(venue_id)?
            .ok_or_else(|| EngineError::not_found(format!("Venue {venue_id} not found")))?;
        let bucket = self
            .storage
            .get_bucket(venue_id, month)?
            .ok_or_else(|| {
                EngineError::not_found(format!("No inventory recorded for {month}"))
            })?;
        Ok(bucket.rows)
    }

    /// Delete one row by its assigned ID
    pub fn delete_row(&self, venue_id: &str, month: &str, row_id: i64) -> EngineResult<()> {
        let txn = self.storage.begin_write()?;
        let mut bucket = self
            .storage
            .get_bucket_txn(&txn, venue_id, month)?
            .ok_or_else(|| {
                EngineError::not_found(format!("No inventory recorded for {month}"))
            })?;

        let position = bucket
            .rows
            .iter()
            .position(|r| r.id == row_id)
            .ok_or_else(|| EngineError::not_found(format!("Inventory row {row_id} not found")))?;
        bucket.rows.remove(position);

        self.storage.put_bucket(&txn, &bucket)?;
        self.storage.commit(txn)?;

        info!(venue_id = %venue_id, month = %month, row_id, "Inventory row deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledgers::venues::VenueRegistry;

    fn fixture() -> (InventoryLedger, VenueRegistry) {
        let storage = LedgerStorage::open_in_memory().unwrap();
        let registry = VenueRegistry::new(storage.clone());
        registry.upsert_venue("v-1", "Cortado Cafe", None).unwrap();
        (InventoryLedger::new(storage), registry)
    }

    fn row_input(item: &str) -> InventoryRowInput {
        InventoryRowInput {
            item: item.to_string(),
            quantity: 5.0,
            unit: "kg".to_string(),
            amount: 500.0,
            tax_percent: 5.0,
            total: 525.0,
            date: "2025-03-10".to_string(),
            entered_by: "Meera".to_string(),
        }
    }

    #[test]
    fn rows_append_in_order_with_unique_ids() {
        let (ledger, _) = fixture();
        ledger.append_rows("v-1", "March 2025", vec![row_input("Rice")]).unwrap();
        let bucket = ledger
            .append_rows("v-1", "March 2025", vec![row_input("Lentils"), row_input("Oil")])
            .unwrap();
        assert_eq!(bucket.rows.len(), 3);

        let rows = ledger.list_rows("v-1", "March 2025").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].item, "Rice");
        assert_eq!(rows[1].item, "Lentils");
        assert_eq!(rows[2].item, "Oil");
        let mut ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn months_are_isolated() {
        let (ledger, _) = fixture();
        ledger.append_rows("v-1", "March 2025", vec![row_input("Rice")]).unwrap();
        assert!(matches!(
            ledger.list_rows("v-1", "April 2025"),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn delete_row_by_identity() {
        let (ledger, _) = fixture();
        let bucket = ledger
            .append_rows("v-1", "March 2025", vec![row_input("Rice"), row_input("Oil")])
            .unwrap();
        let rows = bucket.rows;

        ledger.delete_row("v-1", "March 2025", rows[0].id).unwrap();
        let remaining = ledger.list_rows("v-1", "March 2025").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].item, "Oil");

        assert!(matches!(
            ledger.delete_row("v-1", "March 2025", rows[0].id),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn unknown_venue_rejected() {
        let (ledger, _) = fixture();
        assert!(matches!(
            ledger.append_rows("v-x", "March 2025", vec![row_input("Rice")]),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn non_positive_quantity_rejected() {
        let (ledger, _) = fixture();
        let mut bad = row_input("Rice");
        bad.quantity = 0.0;
        assert!(matches!(
            ledger.append_rows("v-1", "March 2025", vec![bad]),
            Err(EngineError::Validation(_))
        ));
    }
}
