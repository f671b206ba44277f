//! # Shipping Rate Entity
//!
//! Represents a priced shipping quote for one method/service pair.
//!
//! This module provides the [`Rate`] entity produced by shipping method
//! plugins during rate calculation, the [`RateDefinition`] used to build
//! rates from loosely-typed plugin output, and the insertion-ordered
//! [`RateCollection`] returned by rate aggregation.
//!
//! # Examples
//!
//! ```
//! use commerce_shipping::domain::entities::rate::Rate;
//! use commerce_shipping::domain::value_objects::{Money, ServiceId, ShippingMethodId, ShippingService};
//! use rust_decimal::Decimal;
//!
//! let service = ShippingService::new(ServiceId::new("express"), "Express").unwrap();
//! let amount = Money::new(Decimal::new(999, 2), "USD").unwrap();
//! let rate = Rate::new(ShippingMethodId::new("ups"), service, amount).unwrap();
//!
//! assert_eq!(rate.id().as_str(), "ups--express");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Money, RateId, ShippingMethodId, ShippingService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A priced shipping quote for one method/service pair.
///
/// Rates are created fresh on every aggregation call and are never
/// persisted. They are immutable after construction; the amount, delivery
/// date, and delivery terms can be replaced through consuming `with_*`
/// setters.
///
/// # Invariants
///
/// - The shipping method ID is non-empty.
/// - The ID defaults to `"<method_id>--<service_id>"` and is unique within
///   one aggregation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// Unique identifier within one aggregation call.
    id: RateId,
    /// The shipping method that produced this rate.
    shipping_method_id: ShippingMethodId,
    /// The service tier this rate is quoted for.
    service: ShippingService,
    /// The quoted amount.
    amount: Money,
    /// Estimated delivery date, if known.
    delivery_date: Option<DateTime<Utc>>,
    /// Free-text delivery terms, e.g. "Delivery in 1 to 3 business days".
    delivery_terms: Option<String>,
}

impl Rate {
    /// Creates a new rate with the default composed ID.
    ///
    /// A method quoting one rate per service needs no distinct identity
    /// per quote; [`Rate::from_definition`] accepts an explicit ID for
    /// methods that do.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingProperty` if the shipping method ID
    /// is empty.
    pub fn new(
        shipping_method_id: ShippingMethodId,
        service: ShippingService,
        amount: Money,
    ) -> DomainResult<Self> {
        if shipping_method_id.is_empty() {
            return Err(DomainError::missing_property("shipping_method_id"));
        }
        let id = RateId::compose(&shipping_method_id, service.id());
        Ok(Self {
            id,
            shipping_method_id,
            service,
            amount,
            delivery_date: None,
            delivery_terms: None,
        })
    }

    /// Creates a rate from a loosely-typed definition.
    ///
    /// Plugin boundaries deal in partially-filled definitions; required
    /// properties are checked here.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingProperty` naming the first absent
    /// required property (`shipping_method_id`, `service`, or `amount`).
    pub fn from_definition(definition: RateDefinition) -> DomainResult<Self> {
        let shipping_method_id = definition
            .shipping_method_id
            .filter(|id| !id.is_empty())
            .ok_or(DomainError::missing_property("shipping_method_id"))?;
        let service = definition
            .service
            .ok_or(DomainError::missing_property("service"))?;
        let amount = definition
            .amount
            .ok_or(DomainError::missing_property("amount"))?;

        let id = definition
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| RateId::compose(&shipping_method_id, service.id()));

        Ok(Self {
            id,
            shipping_method_id,
            service,
            amount,
            delivery_date: definition.delivery_date,
            delivery_terms: definition.delivery_terms,
        })
    }

    /// Replaces the rate ID.
    #[must_use]
    pub fn with_id(mut self, id: RateId) -> Self {
        self.id = id;
        self
    }

    /// Replaces the amount.
    #[must_use]
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the delivery date.
    #[must_use]
    pub fn with_delivery_date(mut self, delivery_date: DateTime<Utc>) -> Self {
        self.delivery_date = Some(delivery_date);
        self
    }

    /// Sets the delivery terms.
    #[must_use]
    pub fn with_delivery_terms(mut self, delivery_terms: impl Into<String>) -> Self {
        self.delivery_terms = Some(delivery_terms.into());
        self
    }

    /// Returns the rate ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &RateId {
        &self.id
    }

    /// Returns the shipping method ID.
    #[inline]
    #[must_use]
    pub fn shipping_method_id(&self) -> &ShippingMethodId {
        &self.shipping_method_id
    }

    /// Returns the shipping service.
    ///
    /// The service carries the label rendered when this rate is offered
    /// as an option.
    #[inline]
    #[must_use]
    pub fn service(&self) -> &ShippingService {
        &self.service
    }

    /// Returns the quoted amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> &Money {
        &self.amount
    }

    /// Returns the delivery date, if known.
    #[inline]
    #[must_use]
    pub fn delivery_date(&self) -> Option<DateTime<Utc>> {
        self.delivery_date
    }

    /// Returns the delivery terms, if known.
    #[inline]
    #[must_use]
    pub fn delivery_terms(&self) -> Option<&str> {
        self.delivery_terms.as_deref()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rate({}: {})", self.id, self.amount)
    }
}

/// Loosely-typed rate definition used at plugin boundaries.
///
/// All fields are optional; [`Rate::from_definition`] validates the
/// required ones.
#[derive(Debug, Clone, Default)]
pub struct RateDefinition {
    /// Explicit rate ID; composed from method and service when absent.
    pub id: Option<RateId>,
    /// The shipping method ID.
    pub shipping_method_id: Option<ShippingMethodId>,
    /// The service tier.
    pub service: Option<ShippingService>,
    /// The quoted amount.
    pub amount: Option<Money>,
    /// Estimated delivery date.
    pub delivery_date: Option<DateTime<Utc>>,
    /// Free-text delivery terms.
    pub delivery_terms: Option<String>,
}

/// Insertion-ordered collection of rates keyed by rate ID.
///
/// Preserves the order shipping methods were processed during aggregation
/// and, within one method, the order rates were produced. Re-inserting an
/// existing key replaces the rate in place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateCollection {
    order: Vec<RateId>,
    entries: HashMap<RateId, Rate>,
}

impl RateCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rate under the given key.
    ///
    /// A colliding key overwrites the previous rate without error and keeps
    /// its original position.
    pub fn insert(&mut self, id: RateId, rate: Rate) {
        if self.entries.insert(id.clone(), rate).is_none() {
            self.order.push(id);
        }
    }

    /// Returns the rate stored under the given key.
    #[must_use]
    pub fn get(&self, id: &RateId) -> Option<&Rate> {
        self.entries.get(id)
    }

    /// Returns true if a rate is stored under the given key.
    #[must_use]
    pub fn contains_key(&self, id: &RateId) -> bool {
        self.entries.contains_key(id)
    }

    /// Returns the first rate in insertion order.
    #[must_use]
    pub fn first(&self) -> Option<&Rate> {
        self.order.first().and_then(|id| self.entries.get(id))
    }

    /// Returns the number of rates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over `(key, rate)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&RateId, &Rate)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|rate| (id, rate)))
    }

    /// Iterates over rates in insertion order.
    pub fn rates(&self) -> impl Iterator<Item = &Rate> {
        self.iter().map(|(_, rate)| rate)
    }

    /// Returns the keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> &[RateId] {
        &self.order
    }
}
