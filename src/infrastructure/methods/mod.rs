//! # Shipping Method Plugins
//!
//! The plugin contract, registry, and error types for shipping methods.
//!
//! - [`ShippingMethod`]: the carrier strategy port
//! - [`MethodConfig`]: identity, store scope, and priority weight
//! - [`MethodResolver`] / [`InMemoryMethodRegistry`]: eligibility-filtered
//!   method resolution
//! - [`MethodError`]: per-method calculation failures

pub mod error;
pub mod registry;
pub mod traits;

pub use error::{MethodError, MethodResult};
pub use registry::{
    InMemoryMethodRegistry, MethodResolver, RegisteredMethod, ShipmentCondition,
};
pub use traits::{MethodConfig, ShippingMethod};
