//! # Rate Option Entity
//!
//! Presentation-ready wrapper around a shipping rate.
//!
//! Rate options carry a human label ("Express: $10.00") so that embedding
//! code can render them for selection without reaching into the rate.
//!
//! # Examples
//!
//! ```
//! use commerce_shipping::domain::entities::rate::Rate;
//! use commerce_shipping::domain::entities::rate_option::RateOption;
//! use commerce_shipping::domain::value_objects::{Money, ServiceId, ShippingMethodId, ShippingService};
//! use rust_decimal::Decimal;
//!
//! let service = ShippingService::new(ServiceId::new("express"), "Express").unwrap();
//! let amount = Money::new(Decimal::new(1000, 2), "USD").unwrap();
//! let rate = Rate::new(ShippingMethodId::new("ups"), service, amount).unwrap();
//!
//! let option = RateOption::new(
//!     rate.id().clone(),
//!     "Express: $10.00",
//!     rate.shipping_method_id().clone(),
//!     rate,
//! ).unwrap();
//! assert_eq!(option.label(), "Express: $10.00");
//! ```

use crate::domain::entities::rate::Rate;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{RateId, ShippingMethodId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A labeled, selectable wrapper around a [`Rate`].
///
/// # Invariants
///
/// - The ID mirrors the underlying rate's aggregation key.
/// - The ID, label, and shipping method ID are non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOption {
    /// Option ID, mirroring the rate's aggregation key.
    id: RateId,
    /// Human-readable label, e.g. `"Express: $10.00"`.
    label: String,
    /// The shipping method that produced the rate.
    shipping_method_id: ShippingMethodId,
    /// The underlying rate.
    rate: Rate,
}

impl RateOption {
    /// Creates a new rate option.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingProperty` if the ID, label, or
    /// shipping method ID is empty.
    pub fn new(
        id: RateId,
        label: impl Into<String>,
        shipping_method_id: ShippingMethodId,
        rate: Rate,
    ) -> DomainResult<Self> {
        let label = label.into();
        if id.is_empty() {
            return Err(DomainError::missing_property("id"));
        }
        if label.is_empty() {
            return Err(DomainError::missing_property("label"));
        }
        if shipping_method_id.is_empty() {
            return Err(DomainError::missing_property("shipping_method_id"));
        }
        Ok(Self {
            id,
            label,
            shipping_method_id,
            rate,
        })
    }

    /// Returns the option ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &RateId {
        &self.id
    }

    /// Returns the human-readable label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the shipping method ID.
    #[inline]
    #[must_use]
    pub fn shipping_method_id(&self) -> &ShippingMethodId {
        &self.shipping_method_id
    }

    /// Returns the underlying rate.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> &Rate {
        &self.rate
    }
}

impl fmt::Display for RateOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Insertion-ordered collection of rate options keyed by option ID.
///
/// Mirrors the ordering semantics of
/// [`RateCollection`](crate::domain::entities::rate::RateCollection): the
/// first-inserted option is the fallback default during selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateOptionCollection {
    order: Vec<RateId>,
    entries: HashMap<RateId, RateOption>,
}

impl RateOptionCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an option under its own ID.
    ///
    /// A colliding ID overwrites the previous option without error and
    /// keeps its original position.
    pub fn insert(&mut self, option: RateOption) {
        let id = option.id().clone();
        if self.entries.insert(id.clone(), option).is_none() {
            self.order.push(id);
        }
    }

    /// Returns the option stored under the given ID.
    #[must_use]
    pub fn get(&self, id: &RateId) -> Option<&RateOption> {
        self.entries.get(id)
    }

    /// Returns the first option in insertion order.
    #[must_use]
    pub fn first(&self) -> Option<&RateOption> {
        self.order.first().and_then(|id| self.entries.get(id))
    }

    /// Returns the number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RateOption> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }
}
