//! redb-based storage layer for the append-only ledgers
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `venues` | `venue_id` | `VenueProfile` (JSON) | Venue registry |
//! | `earnings` | `(venue_id, "YYYY-MM")` | `EarningsEntry` (JSON) | Monthly earnings |
//! | `inventory` | `(venue_id, month label)` | `InventoryBucket` (JSON) | Purchase rows |
//!
//! Earnings are keyed by the sortable month key so a range scan yields
//! chronological history; the human-readable label lives inside the
//! entry. Inventory buckets are keyed by the label clients address
//! them with.
//!
//! This facade attaches to the same database as [`OrderStorage`], so a
//! closure can fold earnings and delete the order in one transaction.
//!
//! [`OrderStorage`]: crate::orders::storage::OrderStorage

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{EarningsEntry, InventoryBucket, VenueProfile};
use std::sync::Arc;

use crate::orders::storage::{StorageError, StorageResult};

const VENUES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("venues");
const EARNINGS_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("earnings");
const INVENTORY_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("inventory");

/// Upper bound for the secondary component of a composite-key range scan
const MAX_KEY: &str = "\u{10ffff}";

/// Ledger storage backed by redb
#[derive(Clone)]
pub struct LedgerStorage {
    db: Arc<Database>,
}

impl LedgerStorage {
    /// Attach to an already-open database, ensuring this facade's tables exist
    pub fn attach(db: Arc<Database>) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(VENUES_TABLE)?;
            let _ = write_txn.open_table(EARNINGS_TABLE)?;
            let _ = write_txn.open_table(INVENTORY_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::attach(Arc::new(db))
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Venues ==========

    pub fn put_venue(&self, txn: &WriteTransaction, venue: &VenueProfile) -> StorageResult<()> {
        let mut table = txn.open_table(VENUES_TABLE)?;
        let value = serde_json::to_vec(venue)?;
        table.insert(venue.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn get_venue_txn(
        &self,
        txn: &WriteTransaction,
        venue_id: &str,
    ) -> StorageResult<Option<VenueProfile>> {
        let table = txn.open_table(VENUES_TABLE)?;
        match table.get(venue_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_venue(&self, venue_id: &str) -> StorageResult<Option<VenueProfile>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VENUES_TABLE)?;
        match table.get(venue_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// All registered venues, ordered by id
    pub fn list_venues(&self) -> StorageResult<Vec<VenueProfile>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VENUES_TABLE)?;
        let mut venues = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            venues.push(serde_json::from_slice(value.value())?);
        }
        Ok(venues)
    }

    // ========== Earnings ==========

    pub fn put_earnings(
        &self,
        txn: &WriteTransaction,
        venue_id: &str,
        month_key: &str,
        entry: &EarningsEntry,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(EARNINGS_TABLE)?;
        let value = serde_json::to_vec(entry)?;
        table.insert((venue_id, month_key), value.as_slice())?;
        Ok(())
    }

    pub fn get_earnings_txn(
        &self,
        txn: &WriteTransaction,
        venue_id: &str,
        month_key: &str,
    ) -> StorageResult<Option<EarningsEntry>> {
        let table = txn.open_table(EARNINGS_TABLE)?;
        match table.get((venue_id, month_key))? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// A venue's full earnings history, chronological (keys sort by month)
    pub fn list_earnings(&self, venue_id: &str) -> StorageResult<Vec<EarningsEntry>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EARNINGS_TABLE)?;
        let mut entries = Vec::new();
        for result in table.range((venue_id, "")..=(venue_id, MAX_KEY))? {
            let (_key, value) = result?;
            entries.push(serde_json::from_slice(value.value())?);
        }
        Ok(entries)
    }

    // ========== Inventory ==========

    pub fn put_bucket(
        &self,
        txn: &WriteTransaction,
        bucket: &InventoryBucket,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(INVENTORY_TABLE)?;
        let value = serde_json::to_vec(bucket)?;
        table.insert((bucket.venue_id.as_str(), bucket.month.as_str()), value.as_slice())?;
        Ok(())
    }

    pub fn get_bucket_txn(
        &self,
        txn: &WriteTransaction,
        venue_id: &str,
        month: &str,
    ) -> StorageResult<Option<InventoryBucket>> {
        let table = txn.open_table(INVENTORY_TABLE)?;
        match table.get((venue_id, month))? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_bucket(&self, venue_id: &str, month: &str) -> StorageResult<Option<InventoryBucket>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(INVENTORY_TABLE)?;
        match table.get((venue_id, month))? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Best-effort commit wrapper so callers can use `?` directly
    pub fn commit(&self, txn: WriteTransaction) -> StorageResult<()> {
        txn.commit().map_err(StorageError::from)
    }
}
