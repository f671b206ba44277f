//! # Rate Options Builder
//!
//! Turns raw rates into selectable, human-labeled options.
//!
//! This module provides the [`RateOptionsBuilder`] which runs rate
//! aggregation for a shipment, wraps each rate in a labeled
//! [`RateOption`], and applies the default-selection policy. Labels are
//! rendered through the [`CurrencyFormatter`] port; a basic symbol-table
//! formatter is provided.
//!
//! Callers must check for an empty option collection and render a
//! "no rates available" state instead of selecting a default.

use crate::domain::entities::rate_option::{RateOption, RateOptionCollection};
use crate::domain::entities::shipment::Shipment;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{Money, RateId};
use crate::application::services::rate_aggregation::ShipmentManager;
use std::fmt;
use std::sync::Arc;

/// Port for formatting monetary amounts in option labels.
pub trait CurrencyFormatter: Send + Sync + fmt::Debug {
    /// Formats an amount for display.
    fn format(&self, amount: &Money) -> String;
}

/// Symbol-table [`CurrencyFormatter`] without locale rules.
///
/// Known currencies render as `"$10.00"`; everything else falls back to
/// `"10.00 XXX"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCurrencyFormatter;

impl BasicCurrencyFormatter {
    fn symbol(currency_code: &str) -> Option<&'static str> {
        match currency_code {
            "USD" => Some("$"),
            "EUR" => Some("\u{20ac}"),
            "GBP" => Some("\u{a3}"),
            "JPY" => Some("\u{a5}"),
            _ => None,
        }
    }

    /// Currencies conventionally displayed without decimal places.
    fn is_zero_decimal(currency_code: &str) -> bool {
        matches!(currency_code, "JPY" | "KRW" | "VND")
    }
}

impl CurrencyFormatter for BasicCurrencyFormatter {
    fn format(&self, amount: &Money) -> String {
        let mut number = amount.amount();
        let scale = if Self::is_zero_decimal(amount.currency_code()) {
            0
        } else {
            2
        };
        if number.scale() != scale {
            number = number.round_dp(scale);
            number.rescale(scale);
        }
        match Self::symbol(amount.currency_code()) {
            Some(symbol) => format!("{symbol}{number}"),
            None => format!("{} {}", number, amount.currency_code()),
        }
    }
}

/// Builds selectable rate options and applies default-selection policy.
#[derive(Debug)]
pub struct RateOptionsBuilder {
    shipment_manager: Arc<ShipmentManager>,
    currency_formatter: Arc<dyn CurrencyFormatter>,
}

impl RateOptionsBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(
        shipment_manager: Arc<ShipmentManager>,
        currency_formatter: Arc<dyn CurrencyFormatter>,
    ) -> Self {
        Self {
            shipment_manager,
            currency_formatter,
        }
    }

    /// Creates a builder with the basic currency formatter.
    #[must_use]
    pub fn with_defaults(shipment_manager: Arc<ShipmentManager>) -> Self {
        Self::new(shipment_manager, Arc::new(BasicCurrencyFormatter))
    }

    /// Builds options for every rate available to the shipment.
    ///
    /// Each option's ID mirrors the rate's aggregation key, and its label
    /// is `"<service label>: <formatted amount>"`.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if an option fails construction; this is a
    /// programmer error (empty labels) and propagates.
    pub async fn build_options(&self, shipment: &Shipment) -> DomainResult<RateOptionCollection> {
        let rates = self.shipment_manager.calculate_rates(shipment).await;
        let mut options = RateOptionCollection::new();
        for (rate_id, rate) in rates.iter() {
            let label = format!(
                "{}: {}",
                rate.service().label(),
                self.currency_formatter.format(rate.amount())
            );
            options.insert(RateOption::new(
                rate_id.clone(),
                label,
                rate.shipping_method_id().clone(),
                rate.clone(),
            )?);
        }
        Ok(options)
    }

    /// Selects the default option for a shipment.
    ///
    /// Returns the option matching the shipment's previously selected
    /// method and service when that rate is still available; otherwise
    /// the first option in insertion order. Returns `None` only when
    /// `options` is empty, which callers must treat as "no rates
    /// available".
    #[must_use]
    pub fn select_default_option<'a>(
        &self,
        shipment: &Shipment,
        options: &'a RateOptionCollection,
    ) -> Option<&'a RateOption> {
        if let (Some(method_id), Some(service_id)) =
            (shipment.shipping_method_id(), shipment.shipping_service_id())
        {
            let candidate = RateId::compose(method_id, service_id);
            if let Some(option) = options.get(&candidate) {
                return Some(option);
            }
        }
        options.first()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::services::rate_aggregation::AggregationConfig;
    use crate::domain::entities::rate::Rate;
    use crate::domain::value_objects::{
        OrderId, PackageType, ServiceId, ShippingMethodId, ShippingService, StoreId,
    };
    use crate::infrastructure::methods::error::MethodResult;
    use crate::infrastructure::methods::registry::{InMemoryMethodRegistry, RegisteredMethod};
    use crate::infrastructure::methods::traits::{MethodConfig, ShippingMethod};
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    #[derive(Debug)]
    struct FlatRateMethod {
        method_id: ShippingMethodId,
        service: ShippingService,
        cents: i64,
    }

    impl FlatRateMethod {
        fn new(method_id: &str, service_id: &str, service_label: &str, cents: i64) -> Self {
            Self {
                method_id: ShippingMethodId::new(method_id),
                service: ShippingService::new(ServiceId::new(service_id), service_label).unwrap(),
                cents,
            }
        }
    }

    #[async_trait]
    impl ShippingMethod for FlatRateMethod {
        fn services(&self) -> Vec<ShippingService> {
            vec![self.service.clone()]
        }

        fn default_package_type(&self) -> PackageType {
            PackageType::new("custom_box", "Custom box", 0)
        }

        async fn calculate_rates(&self, _shipment: &Shipment) -> MethodResult<Vec<Rate>> {
            let rate = Rate::new(
                self.method_id.clone(),
                self.service.clone(),
                Money::new(Decimal::new(self.cents, 2), "USD").unwrap(),
            )
            .map_err(|e| {
                crate::infrastructure::methods::error::MethodError::internal(e.to_string())
            })?;
            Ok(vec![rate])
        }
    }

    async fn two_method_builder() -> RateOptionsBuilder {
        let registry = InMemoryMethodRegistry::new();
        registry
            .register(RegisteredMethod::new(
                MethodConfig::new(ShippingMethodId::new("standard_shipping"), "Standard")
                    .with_weight(1),
                Arc::new(FlatRateMethod::new(
                    "standard_shipping",
                    "default",
                    "Standard",
                    500,
                )),
            ))
            .await;
        registry
            .register(RegisteredMethod::new(
                MethodConfig::new(ShippingMethodId::new("overnight_shipping"), "Overnight")
                    .with_weight(0),
                Arc::new(FlatRateMethod::new(
                    "overnight_shipping",
                    "default",
                    "Overnight",
                    2000,
                )),
            ))
            .await;

        let manager = Arc::new(ShipmentManager::new(
            Arc::new(registry),
            AggregationConfig::default(),
        ));
        RateOptionsBuilder::with_defaults(manager)
    }

    fn test_shipment() -> Shipment {
        Shipment::new(OrderId::new_v4(), StoreId::new("default"), "Shipment #1")
    }

    mod formatter {
        use super::*;

        fn money(cents: i64, code: &str) -> Money {
            Money::new(Decimal::new(cents, 2), code).unwrap()
        }

        #[test]
        fn known_currency_uses_symbol() {
            let formatter = BasicCurrencyFormatter;
            assert_eq!(formatter.format(&money(1000, "USD")), "$10.00");
            assert_eq!(formatter.format(&money(550, "EUR")), "\u{20ac}5.50");
        }

        #[test]
        fn unknown_currency_falls_back_to_code() {
            let formatter = BasicCurrencyFormatter;
            assert_eq!(formatter.format(&money(1000, "CHF")), "10.00 CHF");
        }

        #[test]
        fn whole_amounts_are_padded() {
            let formatter = BasicCurrencyFormatter;
            let whole = Money::new(Decimal::from(12), "USD").unwrap();
            assert_eq!(formatter.format(&whole), "$12.00");
        }

        #[test]
        fn zero_decimal_currency() {
            let formatter = BasicCurrencyFormatter;
            let yen = Money::new(Decimal::from(1200), "JPY").unwrap();
            assert_eq!(formatter.format(&yen), "\u{a5}1200");
        }
    }

    mod build_options {
        use super::*;

        #[tokio::test]
        async fn options_mirror_rates_in_order() {
            let builder = two_method_builder().await;
            let options = builder.build_options(&test_shipment()).await.unwrap();

            assert_eq!(options.len(), 2);
            let labels: Vec<&str> = options.iter().map(RateOption::label).collect();
            assert_eq!(labels, vec!["Overnight: $20.00", "Standard: $5.00"]);
            assert_eq!(
                options.first().unwrap().id().as_str(),
                "overnight_shipping--default"
            );
        }

        #[tokio::test]
        async fn options_carry_the_rate() {
            let builder = two_method_builder().await;
            let options = builder.build_options(&test_shipment()).await.unwrap();

            let option = options
                .get(&RateId::new("standard_shipping--default"))
                .unwrap();
            assert_eq!(
                option.shipping_method_id(),
                &ShippingMethodId::new("standard_shipping")
            );
            assert_eq!(option.rate().amount().amount(), Decimal::new(500, 2));
        }
    }

    mod select_default {
        use super::*;

        #[tokio::test]
        async fn previous_selection_wins_when_still_available() {
            let builder = two_method_builder().await;
            let mut shipment = test_shipment();
            shipment.set_shipping_method_id(Some(ShippingMethodId::new("standard_shipping")));
            shipment.set_shipping_service_id(Some(ServiceId::new("default")));

            let options = builder.build_options(&shipment).await.unwrap();
            let default = builder.select_default_option(&shipment, &options).unwrap();

            assert_eq!(default.id().as_str(), "standard_shipping--default");
        }

        #[tokio::test]
        async fn stale_selection_falls_back_to_first() {
            let builder = two_method_builder().await;
            let mut shipment = test_shipment();
            shipment.set_shipping_method_id(Some(ShippingMethodId::new("retired_method")));
            shipment.set_shipping_service_id(Some(ServiceId::new("default")));

            let options = builder.build_options(&shipment).await.unwrap();
            let default = builder.select_default_option(&shipment, &options).unwrap();

            assert_eq!(default.id().as_str(), "overnight_shipping--default");
        }

        #[tokio::test]
        async fn no_selection_falls_back_to_first() {
            let builder = two_method_builder().await;
            let shipment = test_shipment();

            let options = builder.build_options(&shipment).await.unwrap();
            let default = builder.select_default_option(&shipment, &options).unwrap();

            assert_eq!(default.id().as_str(), "overnight_shipping--default");
        }

        #[tokio::test]
        async fn empty_options_yield_none() {
            let registry = Arc::new(InMemoryMethodRegistry::new());
            let manager = Arc::new(ShipmentManager::new(
                registry,
                AggregationConfig::default(),
            ));
            let builder = RateOptionsBuilder::with_defaults(manager);
            let shipment = test_shipment();

            let options = builder.build_options(&shipment).await.unwrap();
            assert!(options.is_empty());
            assert!(builder.select_default_option(&shipment, &options).is_none());
        }
    }
}
