//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate inputs.
//!
//! # Examples
//!
//! ```
//! use hashtrend::domain::error::DomainError;
//! use hashtrend::domain::hashtag::Hashtag;
//!
//! // A single character is too short to be a hashtag
//! let result = Hashtag::try_new("a");
//! assert!(matches!(result, Err(DomainError::InvalidHashtag { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Hashtags are 2+ ASCII letters, digits or underscores.
    #[error("invalid hashtag '{value}': expected 2 or more letters, digits or underscores")]
    InvalidHashtag {
        /// The rejected input.
        value: String,
    },

    /// Post identifiers must be non-empty.
    #[error("post id cannot be empty")]
    EmptyPostId,
}
