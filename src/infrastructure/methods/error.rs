//! # Shipping Method Errors
//!
//! Error types for shipping method plugin operations.
//!
//! This module provides error types for rate calculation failures. The
//! aggregator absorbs these after logging; a failing method degrades to
//! fewer rates, never an aborted aggregation call.
//!
//! # Examples
//!
//! ```
//! use commerce_shipping::infrastructure::methods::error::MethodError;
//!
//! let error = MethodError::timeout("rate calculation timed out after 5000ms");
//! assert!(error.is_retryable());
//!
//! let error = MethodError::invalid_shipment("shipment has no items");
//! assert!(!error.is_retryable());
//! ```

use crate::domain::value_objects::ShippingMethodId;
use thiserror::Error;

/// Error type for shipping method plugin operations.
///
/// Represents errors that can occur when a method calculates rates,
/// including carrier connectivity issues and business logic failures.
#[derive(Debug, Clone, Error)]
pub enum MethodError {
    /// Rate calculation timed out.
    #[error("method timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// The carrier backing this method is unreachable.
    #[error("carrier unavailable: {message}")]
    CarrierUnavailable {
        /// Error message.
        message: String,
    },

    /// The method cannot produce a rate for this shipment.
    #[error("rate unavailable: {message}")]
    RateUnavailable {
        /// Error message.
        message: String,
    },

    /// The shipment is missing data the method needs.
    #[error("invalid shipment: {message}")]
    InvalidShipment {
        /// Error message.
        message: String,
    },

    /// The method is misconfigured.
    #[error("method misconfigured: {method_id} - {message}")]
    Misconfigured {
        /// The method ID.
        method_id: ShippingMethodId,
        /// Error message.
        message: String,
    },

    /// Internal method error.
    #[error("method internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl MethodError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a carrier unavailable error.
    #[must_use]
    pub fn carrier_unavailable(message: impl Into<String>) -> Self {
        Self::CarrierUnavailable {
            message: message.into(),
        }
    }

    /// Creates a rate unavailable error.
    #[must_use]
    pub fn rate_unavailable(message: impl Into<String>) -> Self {
        Self::RateUnavailable {
            message: message.into(),
        }
    }

    /// Creates an invalid shipment error.
    #[must_use]
    pub fn invalid_shipment(message: impl Into<String>) -> Self {
        Self::InvalidShipment {
            message: message.into(),
        }
    }

    /// Creates a misconfigured error.
    #[must_use]
    pub fn misconfigured(method_id: ShippingMethodId, message: impl Into<String>) -> Self {
        Self::Misconfigured {
            method_id,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and may succeed on a
    /// later aggregation call.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::CarrierUnavailable { .. }
        )
    }

    /// Returns true if the failure lies in the shipment data rather than
    /// the method.
    #[must_use]
    pub fn is_shipment_error(&self) -> bool {
        matches!(self, Self::InvalidShipment { .. })
    }

    /// Returns the timeout duration in milliseconds, if applicable.
    #[must_use]
    pub fn timeout_ms(&self) -> Option<u64> {
        match self {
            Self::Timeout { timeout_ms, .. } => *timeout_ms,
            _ => None,
        }
    }
}

/// Result type for shipping method operations.
pub type MethodResult<T> = Result<T, MethodError>;
