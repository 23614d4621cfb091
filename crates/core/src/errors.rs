use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(Uuid),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Requested slot {start_time} - {end_time} conflicts with an existing appointment")]
    SlotConflict {
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    },

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Storage, transport and timeout failures. These are the only errors
    /// worth logging at error level.
    pub fn is_internal(&self) -> bool {
        matches!(self, BookingError::Database(_) | BookingError::Internal(_))
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
