//! Shared types for the Cortado order engine
//!
//! Wire/persisted models used by both the server and its clients:
//! order and line-item shapes, the item status machine, ledger records,
//! the unified error codes, the API response envelope and small
//! time/id utilities. This crate performs no I/O.

pub mod error;
pub mod models;
pub mod order;
pub mod response;
pub mod util;

// Re-exports
pub use error::ErrorCode;
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
