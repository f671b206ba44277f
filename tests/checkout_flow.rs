//! End-to-end checkout flow: rate aggregation, option selection, and
//! order processing against in-memory collaborators.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use commerce_shipping::application::services::{
    AggregationConfig, RateOptionsBuilder, RateSelector, ShipmentManager, ShipmentOrderProcessor,
    ShippingOrderManager,
};
use commerce_shipping::domain::entities::{Order, Shipment, ShippingProfile};
use commerce_shipping::domain::entities::shipment::ShipmentItem;
use commerce_shipping::domain::value_objects::{
    Money, OrderItemId, PackageType, RateId, ServiceId, ShippingMethodId, ShippingService, StoreId,
};
use commerce_shipping::infrastructure::methods::{
    InMemoryMethodRegistry, MethodConfig, MethodResult, RegisteredMethod, ShippingMethod,
};
use commerce_shipping::infrastructure::persistence::{
    InMemoryShipmentRepository, ShipmentRepository,
};
use commerce_shipping::Rate;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Installs a test subscriber so aggregation failures surface in test
/// output; repeat calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Flat rate method quoting a fixed amount for its single service.
#[derive(Debug)]
struct FlatRate {
    method_id: ShippingMethodId,
    service: ShippingService,
    cents: i64,
}

impl FlatRate {
    fn new(method_id: &str, label: &str, cents: i64) -> Self {
        Self {
            method_id: ShippingMethodId::new(method_id),
            service: ShippingService::new(ServiceId::new("default"), label).unwrap(),
            cents,
        }
    }
}

#[async_trait]
impl ShippingMethod for FlatRate {
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
        .map_err(|e| commerce_shipping::MethodError::internal(e.to_string()))?;
        Ok(vec![rate])
    }
}

/// Packs the whole order into one shipment per call.
#[derive(Debug)]
struct SingleBoxPacker;

#[async_trait]
impl ShippingOrderManager for SingleBoxPacker {
    async fn shipping_profile(&self, _order: &Order) -> Option<ShippingProfile> {
        Some(ShippingProfile::new().with_country_code("US"))
    }

    async fn pack(&self, order: &Order, _profile: &ShippingProfile) -> Vec<Shipment> {
        let mut shipment = Shipment::new(order.id(), order.store_id().clone(), "Shipment #1");
        for (index, order_item_id) in order.order_item_ids().iter().enumerate() {
            shipment.add_item(
                ShipmentItem::new(order_item_id.clone(), format!("Item {}", index + 1), 1, 250)
                    .with_declared_value(Money::new(Decimal::new(1200, 2), "USD").unwrap()),
            );
        }
        shipment.mark_owned_by_packer();
        vec![shipment]
    }
}

/// Registry with two flat-rate methods, the expensive
/// one queried first because its priority weight is lower.
async fn two_flat_rates() -> Arc<InMemoryMethodRegistry> {
    let registry = InMemoryMethodRegistry::new();
    registry
        .register(RegisteredMethod::new(
            MethodConfig::new(ShippingMethodId::new("standard_shipping"), "Standard shipping")
                .with_weight(1),
            Arc::new(FlatRate::new("standard_shipping", "Standard", 500)),
        ))
        .await;
    registry
        .register(RegisteredMethod::new(
            MethodConfig::new(ShippingMethodId::new("express_shipping"), "Express shipping")
                .with_weight(0),
            Arc::new(FlatRate::new("express_shipping", "Express", 2000)),
        ))
        .await;
    Arc::new(registry)
}

fn order_with_one_item() -> Order {
    let mut order = Order::new(StoreId::new("default"));
    order.add_order_item(OrderItemId::new("1"));
    order
}

#[tokio::test]
async fn rates_are_collected_in_priority_order() {
    init_tracing();
    let registry = two_flat_rates().await;
    let manager = ShipmentManager::new(registry, AggregationConfig::default());

    let order = order_with_one_item();
    let shipment = SingleBoxPacker
        .pack(&order, &ShippingProfile::new())
        .await
        .remove(0);

    let rates = manager.calculate_rates(&shipment).await;

    assert_eq!(rates.len(), 2);
    // Weight 0 (express, 20.00 USD) is queried before weight 1
    // (standard, 5.00 USD).
    let amounts: Vec<Decimal> = rates.rates().map(|rate| rate.amount().amount()).collect();
    assert_eq!(amounts, vec![Decimal::new(2000, 2), Decimal::new(500, 2)]);
}

#[tokio::test]
async fn full_checkout_flow_produces_one_shipping_adjustment() {
    init_tracing();
    let registry = two_flat_rates().await;
    let manager = Arc::new(ShipmentManager::new(
        registry.clone(),
        AggregationConfig::default(),
    ));
    let builder = RateOptionsBuilder::with_defaults(manager);
    let selector = RateSelector::new(registry);
    let repository = Arc::new(InMemoryShipmentRepository::new());
    let processor = ShipmentOrderProcessor::new(repository.clone(), Arc::new(SingleBoxPacker));

    // Pack the order: one item, 12.00 USD declared value.
    let mut order = order_with_one_item();
    let mut shipment = SingleBoxPacker
        .pack(&order, &ShippingProfile::new())
        .await
        .remove(0);

    // Build options and select the default.
    let options = builder.build_options(&shipment).await.unwrap();
    assert_eq!(options.len(), 2);
    let labels: Vec<&str> = options.iter().map(|option| option.label()).collect();
    assert_eq!(labels, vec!["Express: $20.00", "Standard: $5.00"]);

    let default = builder.select_default_option(&shipment, &options).unwrap();
    assert_eq!(default.id().as_str(), "express_shipping--default");

    // The shopper picks standard instead; the choice lands on the shipment.
    let standard = options.get(&RateId::new("standard_shipping--default")).unwrap();
    selector.apply(&mut shipment, standard).await.unwrap();
    assert_eq!(shipment.amount().unwrap().amount(), Decimal::new(500, 2));

    // The selection is honored as the default on the next build.
    let refreshed = builder.build_options(&shipment).await.unwrap();
    let default = builder.select_default_option(&shipment, &refreshed).unwrap();
    assert_eq!(default.id().as_str(), "standard_shipping--default");

    // Order processing folds the resolved amount into an adjustment.
    repository.save(&shipment).await.unwrap();
    order.set_shipment_ids(vec![shipment.id()]);
    order.set_checkout_step(Some("shipping"));
    let snapshot = order.snapshot();
    order.set_checkout_step(Some("review"));

    // Step-only transition: the manually selected rate survives because
    // no repack runs.
    processor.process(&mut order, Some(&snapshot)).await.unwrap();

    assert_eq!(order.adjustments().len(), 1);
    let adjustment = order.adjustments().first().unwrap();
    assert_eq!(adjustment.label(), "Shipping");
    assert_eq!(adjustment.amount().amount(), Decimal::new(500, 2));
    assert_eq!(adjustment.source_id(), shipment.id().to_string());
}

#[tokio::test]
async fn unrated_shipment_contributes_no_adjustment() {
    let repository = Arc::new(InMemoryShipmentRepository::new());
    let processor = ShipmentOrderProcessor::new(repository.clone(), Arc::new(SingleBoxPacker));

    let mut order = order_with_one_item();
    let shipment = SingleBoxPacker
        .pack(&order, &ShippingProfile::new())
        .await
        .remove(0);
    repository.save(&shipment).await.unwrap();
    order.set_shipment_ids(vec![shipment.id()]);
    order.set_checkout_step(Some("shipping"));
    let snapshot = order.snapshot();
    order.set_checkout_step(Some("review"));

    processor.process(&mut order, Some(&snapshot)).await.unwrap();

    assert!(order.adjustments().is_empty());
}

#[tokio::test]
async fn cart_change_triggers_repack() {
    let repository = Arc::new(InMemoryShipmentRepository::new());
    let processor = ShipmentOrderProcessor::new(repository.clone(), Arc::new(SingleBoxPacker));

    let mut order = order_with_one_item();
    let shipment = SingleBoxPacker
        .pack(&order, &ShippingProfile::new())
        .await
        .remove(0);
    repository.save(&shipment).await.unwrap();
    order.set_shipment_ids(vec![shipment.id()]);
    order.set_checkout_step(Some("shipping"));
    let snapshot = order.snapshot();

    // A second item is added while moving through checkout.
    order.add_order_item(OrderItemId::new("2"));
    order.set_checkout_step(Some("review"));

    processor.process(&mut order, Some(&snapshot)).await.unwrap();

    // The order was repacked: new shipment references, two items packed.
    assert_ne!(order.shipment_ids(), &[shipment.id()]);
    let repacked = repository
        .load_many(order.shipment_ids())
        .await
        .unwrap()
        .remove(0);
    assert_eq!(repacked.items().len(), 2);
}
