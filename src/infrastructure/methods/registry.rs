//! # Shipping Method Registry
//!
//! Port and in-memory implementation for method resolution.
//!
//! The [`MethodResolver`] port answers "which methods are eligible for
//! this shipment", filtered by store, enabled flag, and conditions, and
//! ordered by ascending priority weight. [`InMemoryMethodRegistry`] is
//! the provided implementation: methods are registered at configuration
//! time against their [`MethodConfig`].

use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::ShippingMethodId;
use crate::infrastructure::methods::traits::{MethodConfig, ShippingMethod};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Predicate deciding whether a registered method applies to a shipment.
///
/// Conditions cover eligibility rules beyond store scope, such as weight
/// limits or destination restrictions.
pub trait ShipmentCondition: Send + Sync + fmt::Debug {
    /// Returns true if the method should be offered for this shipment.
    fn applies(&self, shipment: &Shipment) -> bool;
}

/// A shipping method plugin registered with its configuration.
#[derive(Debug, Clone)]
pub struct RegisteredMethod {
    config: MethodConfig,
    plugin: Arc<dyn ShippingMethod>,
    conditions: Vec<Arc<dyn ShipmentCondition>>,
}

impl RegisteredMethod {
    /// Creates a registration without conditions.
    #[must_use]
    pub fn new(config: MethodConfig, plugin: Arc<dyn ShippingMethod>) -> Self {
        Self {
            config,
            plugin,
            conditions: Vec::new(),
        }
    }

    /// Adds an eligibility condition.
    #[must_use]
    pub fn with_condition(mut self, condition: Arc<dyn ShipmentCondition>) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Returns the method configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MethodConfig {
        &self.config
    }

    /// Returns the method plugin.
    #[inline]
    #[must_use]
    pub fn plugin(&self) -> &Arc<dyn ShippingMethod> {
        &self.plugin
    }

    /// Returns true if this method is eligible for the shipment.
    ///
    /// Checks the enabled flag, the store scope, and every condition.
    #[must_use]
    pub fn applies_to(&self, shipment: &Shipment) -> bool {
        self.config.is_enabled()
            && self.config.applies_to_store(shipment.store_id())
            && self
                .conditions
                .iter()
                .all(|condition| condition.applies(shipment))
    }
}

/// Port for resolving shipping methods eligible for a shipment.
#[async_trait]
pub trait MethodResolver: Send + Sync + fmt::Debug {
    /// Returns the methods eligible for the shipment, ordered by
    /// ascending priority weight (stable for equal weights).
    async fn methods_for_shipment(&self, shipment: &Shipment) -> Vec<RegisteredMethod>;

    /// Returns the registered method with the given ID, eligible or not.
    async fn get(&self, id: &ShippingMethodId) -> Option<RegisteredMethod>;
}

/// In-memory implementation of [`MethodResolver`].
///
/// Methods are registered at configuration time; registration order
/// breaks ties between equal weights.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMethodRegistry {
    storage: Arc<RwLock<Vec<RegisteredMethod>>>,
}

impl InMemoryMethodRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a method.
    pub async fn register(&self, method: RegisteredMethod) {
        let mut storage = self.storage.write().await;
        storage.push(method);
    }

    /// Returns the number of registered methods.
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Returns true if no methods are registered.
    pub async fn is_empty(&self) -> bool {
        self.storage.read().await.is_empty()
    }
}

#[async_trait]
impl MethodResolver for InMemoryMethodRegistry {
    async fn methods_for_shipment(&self, shipment: &Shipment) -> Vec<RegisteredMethod> {
        let storage = self.storage.read().await;
        let mut eligible: Vec<RegisteredMethod> = storage
            .iter()
            .filter(|method| method.applies_to(shipment))
            .cloned()
            .collect();
        // Stable sort keeps registration order for equal weights.
        eligible.sort_by_key(|method| method.config().weight());
        eligible
    }

    async fn get(&self, id: &ShippingMethodId) -> Option<RegisteredMethod> {
        let storage = self.storage.read().await;
        storage
            .iter()
            .find(|method| method.config().id() == id)
            .cloned()
    }
}
