//! # Shipment Promotion Offers
//!
//! Percentage-off offer applied to a single shipment.
//!
//! The offer amount is calculated from the unreduced shipment amount and
//! clamped to the remaining adjusted amount so the shipment total never
//! goes negative. Unrated shipments are skipped.

use crate::domain::entities::order::{Adjustment, AdjustmentKind};
use crate::domain::entities::shipment::Shipment;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::PromotionId;
use rust_decimal::Decimal;

/// Label attached to percentage-off shipment adjustments.
const DISCOUNT_LABEL: &str = "Shipping Discount";

/// Percentage off the shipment amount.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentPercentageOff {
    promotion_id: PromotionId,
    percentage: Decimal,
}

impl ShipmentPercentageOff {
    /// Creates a new offer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProperty` unless the percentage lies
    /// in `(0, 1]`.
    pub fn new(promotion_id: PromotionId, percentage: Decimal) -> DomainResult<Self> {
        if percentage <= Decimal::ZERO || percentage > Decimal::ONE {
            return Err(DomainError::invalid_property(
                "percentage",
                format!("expected a value in (0, 1], got {percentage}"),
            ));
        }
        Ok(Self {
            promotion_id,
            percentage,
        })
    }

    /// Returns the promotion ID.
    #[inline]
    #[must_use]
    pub fn promotion_id(&self) -> PromotionId {
        self.promotion_id
    }

    /// Returns the percentage.
    #[inline]
    #[must_use]
    pub fn percentage(&self) -> Decimal {
        self.percentage
    }

    /// Applies the offer to a shipment.
    ///
    /// Adds a negative shipping-promotion adjustment carrying the
    /// percentage. Unrated shipments are left untouched.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if the discount cannot be computed from
    /// the shipment's amounts.
    pub fn apply_to_shipment(&self, shipment: &mut Shipment) -> DomainResult<()> {
        // Discount off the base amount, before earlier adjustments.
        let Some(amount) = shipment.amount().cloned() else {
            return Ok(());
        };
        let mut offer = amount.checked_mul(self.percentage)?.round_to_cents();

        // Never discount more than what is still owed on the shipment.
        if let Some(remaining) = shipment.adjusted_amount()?
            && offer.greater_than(&remaining)?
        {
            offer = remaining;
        }

        shipment.add_adjustment(
            Adjustment::new(
                AdjustmentKind::ShippingPromotion,
                DISCOUNT_LABEL,
                offer.negate(),
                self.promotion_id.to_string(),
            )
            .with_percentage(self.percentage),
        );
        Ok(())
    }
}
