//! # Domain Errors
//!
//! Error types for domain validation and arithmetic.
//!
//! This module provides the [`DomainError`] type returned by value object
//! and entity constructors, and by checked money arithmetic. Construction
//! errors are programmer errors: they surface to the caller immediately and
//! are never caught inside the crate.
//!
//! # Examples
//!
//! ```
//! use commerce_shipping::domain::errors::DomainError;
//!
//! let error = DomainError::missing_property("shipping_method_id");
//! assert!(error.to_string().contains("shipping_method_id"));
//! ```

use thiserror::Error;

/// Error type for domain validation and arithmetic failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required property was absent or empty at construction.
    #[error("missing required property {property}")]
    MissingProperty {
        /// Name of the missing property.
        property: &'static str,
    },

    /// A property was present but failed validation.
    #[error("invalid property {property}: {message}")]
    InvalidProperty {
        /// Name of the invalid property.
        property: &'static str,
        /// Validation failure detail.
        message: String,
    },

    /// Two monetary amounts with different currencies were combined.
    #[error("currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// Currency code of the left operand.
        expected: String,
        /// Currency code of the right operand.
        actual: String,
    },

    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow")]
    Overflow,
}

impl DomainError {
    /// Creates a missing property error.
    #[must_use]
    pub fn missing_property(property: &'static str) -> Self {
        Self::MissingProperty { property }
    }

    /// Creates an invalid property error.
    #[must_use]
    pub fn invalid_property(property: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidProperty {
            property,
            message: message.into(),
        }
    }

    /// Creates a currency mismatch error.
    #[must_use]
    pub fn currency_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::CurrencyMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns true if this is a missing property error.
    #[must_use]
    pub fn is_missing_property(&self) -> bool {
        matches!(self, Self::MissingProperty { .. })
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
