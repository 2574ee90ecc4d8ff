//! Form definitions backing the application routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod calendar;
pub mod chat;
pub mod client;
pub mod register;
pub mod settings;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid client id")]
    InvalidClientId,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid status value")]
    InvalidStatus,

    #[error("invalid date or time")]
    InvalidDateTime,

    #[error("invalid message")]
    InvalidMessage,

    #[error("invalid csv payload: {0}")]
    InvalidCsv(String),
}
