//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidName`], [`InvalidCategory`], [`InvalidAmount`] and
//!   [`InvalidDate`] thrown when a request is rejected before any mutation.
//! - [`BalanceOverflow`] thrown when applying a transaction would overflow an
//!   account balance.
//!
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`BalanceOverflow`]: EngineError::BalanceOverflow
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Balance overflow on account \"{0}\"")]
    BalanceOverflow(String),
}

impl EngineError {
    /// Returns `true` for errors raised by input validation.
    ///
    /// Validation always runs before the store is touched, so these errors
    /// guarantee that nothing was written.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidName(_)
                | Self::InvalidCategory(_)
                | Self::InvalidAmount(_)
                | Self::InvalidDate(_)
        )
    }
}
