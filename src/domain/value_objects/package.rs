//! # Package Type
//!
//! A packaging configuration with a tare weight.
//!
//! Shipments may carry an explicit package type; when they do not, the
//! selected shipping method supplies its default during rate selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A package type with its tare weight in grams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageType {
    /// The package type ID.
    id: String,
    /// Human-readable label.
    label: String,
    /// Tare weight of the empty package, in grams.
    weight_g: u32,
}

impl PackageType {
    /// Creates a new package type.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, weight_g: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            weight_g,
        }
    }

    /// Returns the package type ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the tare weight in grams.
    #[inline]
    #[must_use]
    pub fn weight_g(&self) -> u32 {
        self.weight_g
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}g)", self.label, self.weight_g)
    }
}
