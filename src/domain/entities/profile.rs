//! # Shipping Profile
//!
//! Opaque handle to a shipping destination profile.
//!
//! Profile resolution is a consumed capability: the embedding system owns
//! address data and returns a profile handle when the order has one.

use crate::domain::value_objects::ProfileId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a shipping destination profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingProfile {
    /// Unique identifier.
    id: ProfileId,
    /// Destination country code, if known.
    country_code: Option<String>,
}

impl ShippingProfile {
    /// Creates a new profile with a generated ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ProfileId::new_v4(),
            country_code: None,
        }
    }

    /// Creates a profile with a specific ID (for reconstruction).
    #[must_use]
    pub fn from_parts(id: ProfileId, country_code: Option<String>) -> Self {
        Self { id, country_code }
    }

    /// Sets the destination country code.
    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    /// Returns the profile ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the destination country code, if known.
    #[inline]
    #[must_use]
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }
}

impl Default for ShippingProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShippingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country_code {
            Some(code) => write!(f, "ShippingProfile({}: {})", self.id, code),
            None => write!(f, "ShippingProfile({})", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(ShippingProfile::new().id(), ShippingProfile::new().id());
    }

    #[test]
    fn with_country_code() {
        let profile = ShippingProfile::new().with_country_code("FR");
        assert_eq!(profile.country_code(), Some("FR"));
    }

    #[test]
    fn from_parts_roundtrip() {
        let id = ProfileId::new_v4();
        let profile = ShippingProfile::from_parts(id, Some("DE".to_string()));
        assert_eq!(profile.id(), id);
        assert_eq!(profile.country_code(), Some("DE"));
    }
}
