//! # Rate Aggregation Engine
//!
//! Orchestrates rate collection across shipping methods.
//!
//! This module provides the [`ShipmentManager`] which queries every
//! eligible shipping method for a shipment, dispatches the rates-computed
//! mutation hook, and merges the results into an insertion-ordered
//! collection keyed by `"<method_id>--<service_id>"`.
//!
//! A failing method degrades gracefully: its error is reported to the
//! [`AggregationLogger`] and aggregation continues with the remaining
//! methods. The call itself never fails.

use crate::domain::entities::rate::{Rate, RateCollection};
use crate::domain::entities::shipment::Shipment;
use crate::domain::events::rate_events::{RateListener, RatesEvent};
use crate::domain::value_objects::RateId;
use crate::infrastructure::methods::error::{MethodError, MethodResult};
use crate::infrastructure::methods::registry::{MethodResolver, RegisteredMethod};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Configuration for rate aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Per-method timeout in milliseconds; `None` disables the guard.
    ///
    /// One slow carrier must not block all others indefinitely. A timeout
    /// is treated as a method failure.
    pub per_method_timeout_ms: Option<u64>,
}

impl AggregationConfig {
    /// Creates a configuration without a per-method timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-method timeout.
    #[must_use]
    pub fn with_per_method_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_method_timeout_ms = Some(timeout_ms);
        self
    }
}

/// Sink for per-method calculation failures.
///
/// Receives the method's configured name and the error that dropped its
/// contribution from the aggregation result.
pub trait AggregationLogger: Send + Sync + fmt::Debug {
    /// Called once per failing method.
    fn method_failed(&self, method_name: &str, error: &MethodError);
}

/// Default [`AggregationLogger`] emitting `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl AggregationLogger for TracingLogger {
    fn method_failed(&self, method_name: &str, error: &MethodError) {
        tracing::error!(
            method = method_name,
            error = %error,
            "shipping method failed to calculate rates"
        );
    }
}

/// Engine for collecting rates from every eligible shipping method.
///
/// # Ordering
///
/// Methods are queried sequentially in ascending priority weight order,
/// so the merged collection is deterministic: rates appear in method
/// processing order and, within one method, in production order.
#[derive(Debug)]
pub struct ShipmentManager {
    resolver: Arc<dyn MethodResolver>,
    listeners: Vec<Arc<dyn RateListener>>,
    logger: Arc<dyn AggregationLogger>,
    config: AggregationConfig,
}

impl ShipmentManager {
    /// Creates a new manager without listeners, logging through
    /// [`TracingLogger`].
    #[must_use]
    pub fn new(resolver: Arc<dyn MethodResolver>, config: AggregationConfig) -> Self {
        Self {
            resolver,
            listeners: Vec::new(),
            logger: Arc::new(TracingLogger),
            config,
        }
    }

    /// Replaces the listener chain.
    ///
    /// Listeners run synchronously in the given order; the last mutation
    /// wins.
    #[must_use]
    pub fn with_listeners(mut self, listeners: Vec<Arc<dyn RateListener>>) -> Self {
        self.listeners = listeners;
        self
    }

    /// Replaces the failure logger.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn AggregationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Collects rates from all eligible methods for the shipment.
    ///
    /// # Arguments
    ///
    /// * `shipment` - The shipment to rate
    ///
    /// # Returns
    ///
    /// The merged rate collection, keyed by
    /// `"<method_id>--<service_id>"`. Colliding keys across methods are
    /// rare (methods normally produce disjoint IDs) and overwrite without
    /// error. Per-method failures are logged and skipped; the call never
    /// fails.
    pub async fn calculate_rates(&self, shipment: &Shipment) -> RateCollection {
        let mut all_rates = RateCollection::new();
        let methods = self.resolver.methods_for_shipment(shipment).await;

        for method in methods {
            let rates = match self.invoke_method(&method, shipment).await {
                Ok(rates) => rates,
                Err(error) => {
                    self.logger.method_failed(method.config().name(), &error);
                    continue;
                }
            };

            let rates = self.dispatch_rates_event(rates, &method, shipment);

            for rate in rates {
                let rate_id = RateId::compose(method.config().id(), rate.service().id());
                all_rates.insert(rate_id, rate);
            }
        }

        all_rates
    }

    /// Invokes one method's rate calculation, honoring the per-method
    /// timeout when configured.
    async fn invoke_method(
        &self,
        method: &RegisteredMethod,
        shipment: &Shipment,
    ) -> MethodResult<Vec<Rate>> {
        match self.config.per_method_timeout_ms {
            Some(timeout_ms) => {
                let duration = Duration::from_millis(timeout_ms);
                match timeout(duration, method.plugin().calculate_rates(shipment)).await {
                    Ok(result) => result,
                    Err(_) => Err(MethodError::timeout_with_duration(
                        "rate calculation timed out",
                        timeout_ms,
                    )),
                }
            }
            None => method.plugin().calculate_rates(shipment).await,
        }
    }

    /// Runs the listener chain over one method's rates.
    fn dispatch_rates_event(
        &self,
        rates: Vec<Rate>,
        method: &RegisteredMethod,
        shipment: &Shipment,
    ) -> Vec<Rate> {
        if self.listeners.is_empty() {
            return rates;
        }
        let mut event = RatesEvent::new(rates, method.config().id(), shipment);
        for listener in &self.listeners {
            listener.on_rates_computed(&mut event);
        }
        event.into_rates()
    }
}
