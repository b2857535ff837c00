use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure taxonomy for the record service. The HTTP boundary decides how
/// each variant maps onto a status code and body; the service never shapes
/// responses itself.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required input was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness constraint was violated (duplicate roll number).
    #[error("{0}")]
    Conflict(String),

    /// The referenced student does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A batched marks write failed partway through. Entries written before
    /// the failure stay applied; there is no rollback.
    #[error("failed writing marks for subject '{subject}' after {applied} entries applied")]
    PartialWrite {
        applied: usize,
        subject: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Any other storage-layer failure. Logged in full, reported generically.
    #[error("storage error")]
    Storage(#[from] rusqlite::Error),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }
}
