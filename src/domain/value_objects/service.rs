//! # Shipping Service
//!
//! A named tier offered by a shipping method.
//!
//! Shipping methods expose one or more services ("standard", "express",
//! "overnight"). The label is what shoppers see when choosing between
//! rates.
//!
//! # Examples
//!
//! ```
//! use commerce_shipping::domain::value_objects::{ServiceId, ShippingService};
//!
//! let service = ShippingService::new(ServiceId::new("express"), "Express").unwrap();
//! assert_eq!(service.label(), "Express");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::ids::ServiceId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A service tier offered by a shipping method.
///
/// # Invariants
///
/// - Both the ID and the label are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingService {
    /// The service ID.
    id: ServiceId,
    /// Human-readable label shown during rate selection.
    label: String,
}

impl ShippingService {
    /// Creates a new shipping service.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingProperty` if the ID or label is empty.
    pub fn new(id: ServiceId, label: impl Into<String>) -> DomainResult<Self> {
        let label = label.into();
        if id.is_empty() {
            return Err(DomainError::missing_property("service_id"));
        }
        if label.is_empty() {
            return Err(DomainError::missing_property("service_label"));
        }
        Ok(Self { id, label })
    }

    /// Returns the service ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ServiceId {
        &self.id
    }

    /// Returns the human-readable label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for ShippingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}
