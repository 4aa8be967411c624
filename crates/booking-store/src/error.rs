use thiserror::Error;

use crate::SlotId;

/// Errors that can occur when interacting with the booking store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The conditional capacity decrement did not match: the slot holds
    /// fewer spots than requested.
    #[error("Insufficient capacity on slot {slot_id}: requested {requested}, available {available}")]
    InsufficientCapacity {
        slot_id: SlotId,
        requested: u32,
        available: u32,
    },

    /// The slot referenced by a booking does not exist.
    #[error("Slot not found: {0}")]
    SlotNotFound(SlotId),

    /// A record with the same key already exists.
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// A record violates a table invariant.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The store cannot be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Returns true for transport-level failures where the store could not
    /// be reached at all, as opposed to a rejected or failed statement.
    pub fn is_unavailable(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Database(e) => matches!(
                e,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
            _ => false,
        }
    }
}

/// Result type for booking store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
