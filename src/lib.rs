//! # commerce-shipping
//!
//! Shipping cost engine for e-commerce orders.
//!
//! Given an order's shipments, this crate queries pluggable shipping
//! methods for rate quotes, lets registered listeners adjust those
//! quotes, builds labeled selectable options with a deterministic
//! default, applies the chosen rate to the shipment, and folds each
//! shipment's resolved amount into the order's price adjustments.
//!
//! ## Architecture
//!
//! - [`domain`]: value objects (ids, money, services), entities (rates,
//!   options, shipments, orders), and the rates-computed event contract
//! - [`application`]: the shipping operations - rate aggregation, option
//!   building, rate selection, order processing, and shipment promotions
//! - [`infrastructure`]: the shipping method plugin contract with its
//!   registry, and the shipment repository port with an in-memory
//!   implementation
//! - [`config`]: file/environment configuration
//!
//! ## Example
//!
//! ```
//! use commerce_shipping::application::services::{AggregationConfig, ShipmentManager};
//! use commerce_shipping::domain::entities::Shipment;
//! use commerce_shipping::domain::value_objects::{OrderId, StoreId};
//! use commerce_shipping::infrastructure::methods::InMemoryMethodRegistry;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let registry = Arc::new(InMemoryMethodRegistry::new());
//! let manager = ShipmentManager::new(registry, AggregationConfig::default());
//!
//! let shipment = Shipment::new(OrderId::new_v4(), StoreId::new("default"), "Shipment #1");
//! let rates = manager.calculate_rates(&shipment).await;
//! assert!(rates.is_empty());
//! # });
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::{
    AggregationConfig, RateOptionsBuilder, RateSelector, ShipmentManager, ShipmentOrderProcessor,
    ShipmentPercentageOff, ShippingOrderManager,
};
pub use domain::entities::{
    Order, OrderSnapshot, Rate, RateCollection, RateOption, RateOptionCollection, Shipment,
    ShippingProfile,
};
pub use domain::errors::{DomainError, DomainResult};
pub use infrastructure::methods::{
    InMemoryMethodRegistry, MethodConfig, MethodError, MethodResolver, RegisteredMethod,
    ShippingMethod,
};
pub use infrastructure::persistence::{InMemoryShipmentRepository, ShipmentRepository};
