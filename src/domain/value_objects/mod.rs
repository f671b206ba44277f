//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ShippingMethodId`], [`ServiceId`], [`RateId`], [`StoreId`],
//!   [`OrderItemId`]: string-based identifiers
//! - [`ShipmentId`], [`OrderId`], [`ProfileId`], [`PromotionId`]: UUID-based
//!   identifiers
//!
//! ## Monetary Types
//!
//! - [`Money`]: currency-aware decimal with checked arithmetic
//!
//! ## Shipping Types
//!
//! - [`ShippingService`]: a named tier offered by a shipping method
//! - [`PackageType`]: packaging configuration with a tare weight

pub mod ids;
pub mod money;
pub mod package;
pub mod service;

pub use ids::{
    OrderId, OrderItemId, ProfileId, PromotionId, RateId, ServiceId, ShipmentId, ShippingMethodId,
    StoreId,
};
pub use money::Money;
pub use package::PackageType;
pub use service::ShippingService;
