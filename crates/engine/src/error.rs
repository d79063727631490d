//! The module contains the error the engine can throw.
//!
//! The forecast computations are total over well-formed input, so the only
//! errors are:
//!
//! - [`Database`] thrown when the obligation read fails.
//! - [`InvalidInput`] thrown when a caller passes arguments the engine cannot
//!   work with (e.g. an empty file id).
//!
//!  [`Database`]: EngineError::Database
//!  [`InvalidInput`]: EngineError::InvalidInput
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
