//! # Shipping Method Trait
//!
//! Port definition for shipping method plugins.
//!
//! This module defines the [`ShippingMethod`] trait that all carrier
//! strategies must implement, and the [`MethodConfig`] carried alongside
//! each registered plugin. The engine treats "get rates for a shipment"
//! as an opaque capability; flat-rate, weight-based, and carrier-backed
//! strategies all sit behind this trait.
//!
//! # Examples
//!
//! ```ignore
//! use commerce_shipping::infrastructure::methods::traits::ShippingMethod;
//!
//! // Implement ShippingMethod for your carrier strategy
//! struct MyCarrier { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl ShippingMethod for MyCarrier {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::rate::Rate;
use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::{PackageType, ShippingMethodId, ShippingService, StoreId};
use crate::infrastructure::methods::error::MethodResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration of a registered shipping method.
///
/// Carries the identity, store scope, enabled flag, and priority weight
/// the registry uses for eligibility filtering and ordering. Methods are
/// queried in ascending weight order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodConfig {
    /// The method ID.
    id: ShippingMethodId,
    /// Human-readable name, used in failure logs.
    name: String,
    /// Stores this method applies to; empty means every store.
    stores: Vec<StoreId>,
    /// Whether the method is enabled.
    enabled: bool,
    /// Priority weight; lower weights are queried first.
    weight: i32,
}

impl MethodConfig {
    /// Creates a new enabled configuration with weight zero.
    #[must_use]
    pub fn new(id: ShippingMethodId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stores: Vec::new(),
            enabled: true,
            weight: 0,
        }
    }

    /// Restricts the method to the given stores.
    #[must_use]
    pub fn with_stores(mut self, stores: Vec<StoreId>) -> Self {
        self.stores = stores;
        self
    }

    /// Sets the enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the priority weight.
    #[must_use]
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    /// Returns the method ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ShippingMethodId {
        &self.id
    }

    /// Returns the human-readable name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the store scope; empty means every store.
    #[inline]
    #[must_use]
    pub fn stores(&self) -> &[StoreId] {
        &self.stores
    }

    /// Returns true if the method is enabled.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the priority weight.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Returns true if the method applies to the given store.
    #[must_use]
    pub fn applies_to_store(&self, store_id: &StoreId) -> bool {
        self.stores.is_empty() || self.stores.contains(store_id)
    }
}

impl fmt::Display for MethodConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodConfig({}: weight {})", self.id, self.weight)
    }
}

/// Trait defining the interface for shipping method plugins.
///
/// All carrier strategies implement this trait to provide a uniform
/// interface for rate calculation and rate selection.
///
/// # Async Methods
///
/// Rate calculation is async because carrier-backed methods cross an I/O
/// boundary. Strategy-local methods (flat rate, weight tables) simply
/// return without suspending.
///
/// # Error Handling
///
/// `calculate_rates` returns `MethodResult<Vec<Rate>>`; the aggregator
/// logs failures and continues with the remaining methods.
#[async_trait]
pub trait ShippingMethod: Send + Sync + fmt::Debug {
    /// Returns the services this method offers.
    fn services(&self) -> Vec<ShippingService>;

    /// Returns the package type used when a shipment carries none.
    fn default_package_type(&self) -> PackageType;

    /// Calculates rates for the given shipment.
    ///
    /// # Errors
    ///
    /// - `MethodError::Timeout` - carrier request timed out
    /// - `MethodError::CarrierUnavailable` - carrier unreachable
    /// - `MethodError::RateUnavailable` - no rate for this shipment
    /// - `MethodError::InvalidShipment` - shipment data is unusable
    async fn calculate_rates(&self, shipment: &Shipment) -> MethodResult<Vec<Rate>>;

    /// Records the chosen rate onto the shipment.
    ///
    /// The default implementation stores the rate's service and amount;
    /// methods with extra selection state override this.
    fn select_rate(&self, shipment: &mut Shipment, rate: &Rate) {
        shipment.set_shipping_service_id(Some(rate.service().id().clone()));
        shipment.set_amount(Some(rate.amount().clone()));
    }
}
