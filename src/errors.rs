//! Unified error types for the Dry Weight Watchers core.
//!
//! Every fallible operation in the crate returns [`Result`]. Validation and
//! not-found failures carry enough context for the caller to build a useful
//! rejection; database and I/O errors convert via `#[from]`.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Underlying sea-orm / SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure (lock file, config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Weight outside the accepted range (strictly positive, at most 999.99)
    #[error("Invalid weight: {weight}")]
    InvalidWeight { weight: f64 },

    /// Weekday name not in the canonical seven
    #[error("Invalid weekday: {day}")]
    InvalidWeekday { day: String },

    /// Note type other than "generic" or "medication"
    #[error("Invalid note type: {note_type}")]
    InvalidNoteType { note_type: String },

    /// Email address failed basic shape validation
    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },

    /// Email address already belongs to an account
    #[error("Email address already registered: {email}")]
    EmailTaken { email: String },

    /// No user row with this id
    #[error("User not found: {id}")]
    UserNotFound { id: i64 },

    /// The user exists but has the wrong role for the operation
    #[error("User {id} is not a {expected}")]
    RoleMismatch { id: i64, expected: String },

    /// No provider with this shareable code
    #[error("No provider with shareable code {code}")]
    ProviderNotFound { code: String },

    /// A (patient, provider) relationship already exists
    #[error("Relationship already exists between patient {patient_id} and provider {provider_id}")]
    RelationshipExists { patient_id: i64, provider_id: i64 },

    /// No (patient, provider) relationship to operate on
    #[error("No relationship between patient {patient_id} and provider {provider_id}")]
    RelationshipNotFound { patient_id: i64, provider_id: i64 },

    /// No reminder with this id owned by the requesting patient
    #[error("Reminder not found: {id}")]
    ReminderNotFound { id: i64 },

    /// No patient note with this id
    #[error("Note not found: {id}")]
    NoteNotFound { id: i64 },

    /// No provider notification with this id
    #[error("Notification not found: {id}")]
    NotificationNotFound { id: i64 },

    /// Outbound email or SMS transport failure
    #[error("Delivery failure: {message}")]
    Delivery { message: String },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
