//! # Identifier Types
//!
//! Strongly-typed identifiers for domain entities.
//!
//! String-based identifiers ([`ShippingMethodId`], [`ServiceId`], [`RateId`],
//! [`StoreId`], [`OrderItemId`]) wrap configuration-assigned names. UUID-based
//! identifiers ([`ShipmentId`], [`OrderId`], [`ProfileId`], [`PromotionId`])
//! are generated for entities owned by the embedding system.
//!
//! # Examples
//!
//! ```
//! use commerce_shipping::domain::value_objects::{RateId, ServiceId, ShippingMethodId};
//!
//! let method_id = ShippingMethodId::new("standard_shipping");
//! let service_id = ServiceId::new("express");
//! let rate_id = RateId::compose(&method_id, &service_id);
//!
//! assert_eq!(rate_id.as_str(), "standard_shipping--express");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from a string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty.
            #[inline]
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random identifier.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[inline]
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Identifier of a configured shipping method.
    ShippingMethodId
}

string_id! {
    /// Identifier of a service tier offered by a shipping method.
    ServiceId
}

string_id! {
    /// Identifier of a shipping rate, unique within one aggregation call.
    RateId
}

string_id! {
    /// Identifier of a store.
    StoreId
}

string_id! {
    /// Identifier of an order item.
    OrderItemId
}

uuid_id! {
    /// Identifier of a shipment.
    ShipmentId
}

uuid_id! {
    /// Identifier of an order.
    OrderId
}

uuid_id! {
    /// Identifier of a shipping profile.
    ProfileId
}

uuid_id! {
    /// Identifier of a promotion.
    PromotionId
}

impl RateId {
    /// Separator between the method and service parts of a composed rate ID.
    pub const SEPARATOR: &'static str = "--";

    /// Composes the default rate ID from a method and service identifier.
    ///
    /// The composite doubles as the key rates merge under during
    /// aggregation, which is what makes rate IDs unique within one call.
    #[must_use]
    pub fn compose(shipping_method_id: &ShippingMethodId, service_id: &ServiceId) -> Self {
        Self(format!(
            "{}{}{}",
            shipping_method_id.as_str(),
            Self::SEPARATOR,
            service_id.as_str()
        ))
    }
}
