//! Store error types.
//!
//! Every variant carries enough context to diagnose the problem from a log
//! line. Connection strings and API keys are never included.

/// Errors that can occur while talking to a listing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to connect to or initialize the backend.
    #[error("failed to connect to '{target}': {reason}")]
    Connect { target: String, reason: String },

    /// The insert could not be completed (transport or database failure).
    #[error("failed to insert into '{table}': {reason}")]
    Insert { table: String, reason: String },

    /// The remote service answered but refused the record.
    #[error("insert into '{table}' rejected with status {status}: {body}")]
    Rejected {
        table: String,
        status: u16,
        body: String,
    },

    /// The backend is deliberately unavailable (in-memory outage switch).
    #[error("store '{name}' is unavailable")]
    Unavailable { name: String },
}
