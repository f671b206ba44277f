//! # Rate Selection
//!
//! Applies a chosen rate option to a shipment.
//!
//! This is the single-call contract surfaced from the selection UI: a
//! chosen `(method_id, rate)` pair is recorded onto the shipment through
//! the owning method's `select_rate` capability, defaulting the package
//! type from the method when the shipment has none.

use crate::domain::entities::rate_option::RateOption;
use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::ShippingMethodId;
use crate::infrastructure::methods::registry::MethodResolver;
use std::sync::Arc;
use thiserror::Error;

/// Error type for rate selection.
#[derive(Debug, Clone, Error)]
pub enum SelectionError {
    /// The option references a method the resolver does not know.
    #[error("unknown shipping method: {method_id}")]
    UnknownMethod {
        /// The unresolved method ID.
        method_id: ShippingMethodId,
    },
}

impl SelectionError {
    /// Creates an unknown method error.
    #[must_use]
    pub fn unknown_method(method_id: ShippingMethodId) -> Self {
        Self::UnknownMethod { method_id }
    }
}

/// Result type for rate selection.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Applies a chosen rate option to a shipment.
#[derive(Debug)]
pub struct RateSelector {
    resolver: Arc<dyn MethodResolver>,
}

impl RateSelector {
    /// Creates a new selector.
    #[must_use]
    pub fn new(resolver: Arc<dyn MethodResolver>) -> Self {
        Self { resolver }
    }

    /// Records the chosen option onto the shipment.
    ///
    /// Sets the shipping method ID, defaults the package type from the
    /// method when the shipment carries none, then hands the rate to the
    /// method's `select_rate`.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::UnknownMethod` if the option's method is
    /// not registered.
    pub async fn apply(
        &self,
        shipment: &mut Shipment,
        option: &RateOption,
    ) -> SelectionResult<()> {
        let method = self
            .resolver
            .get(option.shipping_method_id())
            .await
            .ok_or_else(|| SelectionError::unknown_method(option.shipping_method_id().clone()))?;

        shipment.set_shipping_method_id(Some(method.config().id().clone()));
        if shipment.package_type().is_none() {
            shipment.set_package_type(Some(method.plugin().default_package_type()));
        }
        method.plugin().select_rate(shipment, option.rate());
        Ok(())
    }
}
