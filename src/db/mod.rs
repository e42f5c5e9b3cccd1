//! # Persistence Gateway
//!
//! CRUD-by-id access to the single table behind the editor. Every call is
//! synchronous and is its own unit of work: no transactions, no batching.
//!
//! Two implementations:
//! - [`PgGateway`]: a live Postgres table via the `postgres` client
//! - [`MemoryGateway`]: an in-process table for tests and `--in-memory`

pub mod memory;
pub mod postgres;

pub use memory::MemoryGateway;
pub use postgres::PgGateway;

use thiserror::Error;

use crate::core::schema::{Record, RecordId, Value};

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Could not open or bootstrap the connection.
    #[error("connection failed: {0}")]
    Connect(String),
    /// A statement failed on the server or in transit.
    #[error("query failed: {0}")]
    Query(String),
    /// An update or delete matched no row.
    #[error("record {0} not found")]
    NotFound(RecordId),
    /// A stored row could not be mapped onto the schema.
    #[error("invalid stored data: {0}")]
    InvalidData(String),
}

/// The operations the editor core needs from the backing store.
pub trait Gateway {
    /// Insert a record and return the id the store assigned.
    fn create(&mut self, values: &[Value]) -> GatewayResult<RecordId>;

    /// Every stored record, ordered by id.
    fn read_all(&mut self) -> GatewayResult<Vec<Record>>;

    fn update(&mut self, id: RecordId, values: &[Value]) -> GatewayResult<()>;

    fn delete(&mut self, id: RecordId) -> GatewayResult<()>;

    /// Remove every record.
    fn clear_all(&mut self) -> GatewayResult<()>;
}
