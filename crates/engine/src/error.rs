//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`AuthRequired`] thrown when a request carries no credential at all.
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`InvalidInput`] thrown when a field fails validation; carries the
//!   full reason.
//!
//!  [`AuthRequired`]: EngineError::AuthRequired
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidInput`]: EngineError::InvalidInput
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("Authentication required!")]
    AuthRequired,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Unsupported attachment type: {0}")]
    UnsupportedAttachment(String),
    #[error("\"{0}\" not found!")]
    KeyNotFound(String),
    #[error("Expense {0} has no attachment!")]
    NoAttachment(u64),
}
