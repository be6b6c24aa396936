use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReservationServiceError {
    #[error("Not found reservation by id = {0}")]
    NotFound(i64),

    /// Caller supplied data that breaks a precondition.
    #[error("{0}")]
    InvalidArgument(String),

    /// The operation is not allowed in the reservation's current state.
    #[error("{0}")]
    InvalidState(String),

    #[error("corrupt reservation record: {0}")]
    CorruptRecord(String),

    #[error("Store operation failed: {0}")]
    Store(#[from] reservation_store::Error),
}
