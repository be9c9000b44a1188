//! redb-based storage layer for live orders
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `Order` (JSON) | Live order documents |
//! | `open_orders` | `venue\|table\|customer\|day` | `order_id` | Open-bill index |
//!
//! # Concurrency
//!
//! redb allows a single write transaction at a time, which is exactly
//! the per-key serialization the engine needs: every engine mutation
//! (find-or-create merge included) runs inside one write transaction,
//! so two racing placements can never both read a stale total. Methods
//! here take a `&WriteTransaction` parameter so managers compose one
//! atomic transaction per operation.
//!
//! # Durability
//!
//! redb commits are durable as soon as `commit()` returns (copy-on-write
//! with atomic pointer swap), so a power loss never leaves a partially
//! updated order or ledger row.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::order::Order;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for live orders: key = order id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Table for the open-bill index: key = open-bill key, value = order id
const OPEN_ORDERS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("open_orders");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Order storage backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl OrderStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::attach(Arc::new(db))
    }

    /// Attach to an already-open database, ensuring this facade's tables exist
    ///
    /// The ledger facade attaches to the same database so order closure
    /// and the earnings fold commit in one transaction.
    pub fn attach(db: Arc<Database>) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(OPEN_ORDERS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::attach(Arc::new(db))
    }

    /// Shared handle to the underlying database
    pub fn database(&self) -> Arc<Database> {
        self.db.clone()
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Order Operations ==========

    /// Insert or replace an order (within transaction)
    pub fn put_order(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Load an order by id (within transaction)
    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Load an order by id (read-only)
    pub fn get_order(&self, order_id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Delete an order row (within transaction); returns whether it existed
    pub fn delete_order(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<bool> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        Ok(table.remove(order_id)?.is_some())
    }

    /// All live orders for a venue, oldest first
    pub fn list_orders(&self, venue_id: &str) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: Order = serde_json::from_slice(value.value())?;
            if order.venue_id == venue_id {
                orders.push(order);
            }
        }
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    /// Find a venue's live order on a table (within transaction)
    pub fn find_by_table_txn(
        &self,
        txn: &WriteTransaction,
        venue_id: &str,
        table_id: &str,
    ) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: Order = serde_json::from_slice(value.value())?;
            if order.venue_id == venue_id && order.table_id == table_id {
                return Ok(Some(order));
            }
        }
        Ok(None)
    }

    // ========== Open-bill Index ==========

    /// Point the open-bill key at an order (within transaction)
    ///
    /// Replaces a stale entry outright; the merge path has already
    /// decided the old order no longer attracts merges.
    pub fn set_open_index(
        &self,
        txn: &WriteTransaction,
        key: &str,
        order_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(OPEN_ORDERS_TABLE)?;
        table.insert(key, order_id)?;
        Ok(())
    }

    /// Resolve the open-bill key to an order id (within transaction)
    pub fn get_open_order_id(
        &self,
        txn: &WriteTransaction,
        key: &str,
    ) -> StorageResult<Option<String>> {
        let table = txn.open_table(OPEN_ORDERS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    /// Drop the open-bill index entry (within transaction)
    pub fn clear_open_index(&self, txn: &WriteTransaction, key: &str) -> StorageResult<()> {
        let mut table = txn.open_table(OPEN_ORDERS_TABLE)?;
        table.remove(key)?;
        Ok(())
    }

    /// Drop the index entry only if it still points at this order
    ///
    /// The index may already have been replaced by a newer order for
    /// the same key (the old one went all-terminal); deleting the old
    /// order must not orphan the newer one.
    pub fn clear_open_index_if(
        &self,
        txn: &WriteTransaction,
        key: &str,
        order_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(OPEN_ORDERS_TABLE)?;
        let matches = table
            .get(key)?
            .map(|guard| guard.value() == order_id)
            .unwrap_or(false);
        if matches {
            table.remove(key)?;
        }
        Ok(())
    }
}
