//! # Order Entity
//!
//! The order surface this crate reads and mutates.
//!
//! Orders are owned by the embedding system. This module models the
//! fields order processing needs: the shipment reference list, the
//! checkout-step marker, the order item ID sequence, and the adjustment
//! list. [`OrderSnapshot`] is a plain value struct capturing the previous
//! revision for repack change detection; callers pass it explicitly
//! instead of relying on framework entity diffing.
//!
//! # Examples
//!
//! ```
//! use commerce_shipping::domain::entities::order::Order;
//! use commerce_shipping::domain::value_objects::{OrderItemId, StoreId};
//!
//! let mut order = Order::new(StoreId::new("default"));
//! order.add_order_item(OrderItemId::new("1"));
//! let before = order.snapshot();
//!
//! order.set_checkout_step(Some("review"));
//! assert_eq!(before.order_item_ids(), order.order_item_ids());
//! ```

use crate::domain::value_objects::{Money, OrderId, OrderItemId, ShipmentId, StoreId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a price adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// A shipping cost added during order processing.
    Shipping,
    /// A shipping promotion discount.
    ShippingPromotion,
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shipping => write!(f, "shipping"),
            Self::ShippingPromotion => write!(f, "shipping_promotion"),
        }
    }
}

/// A signed price adjustment attached to an order or shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// The adjustment kind.
    kind: AdjustmentKind,
    /// Human-readable label.
    label: String,
    /// Signed amount; negative for discounts.
    amount: Money,
    /// Identifier of the entity that produced this adjustment.
    source_id: String,
    /// Percentage that produced the amount, for percentage-based offers.
    percentage: Option<Decimal>,
}

impl Adjustment {
    /// Creates a new adjustment.
    #[must_use]
    pub fn new(
        kind: AdjustmentKind,
        label: impl Into<String>,
        amount: Money,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            label: label.into(),
            amount,
            source_id: source_id.into(),
            percentage: None,
        }
    }

    /// Sets the percentage that produced the amount.
    #[must_use]
    pub fn with_percentage(mut self, percentage: Decimal) -> Self {
        self.percentage = Some(percentage);
        self
    }

    /// Returns the adjustment kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> AdjustmentKind {
        self.kind
    }

    /// Returns the label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the signed amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> &Money {
        &self.amount
    }

    /// Returns the source entity identifier.
    #[inline]
    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Returns the percentage, if this adjustment came from a
    /// percentage-based offer.
    #[inline]
    #[must_use]
    pub fn percentage(&self) -> Option<Decimal> {
        self.percentage
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind, self.amount, self.label)
    }
}

/// A value snapshot of the order fields relevant to repack detection.
///
/// Captures the checkout step and ordered order-item ID sequence of a
/// previous order revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// The checkout step at snapshot time.
    checkout_step: Option<String>,
    /// The ordered order-item ID sequence at snapshot time.
    order_item_ids: Vec<OrderItemId>,
}

impl OrderSnapshot {
    /// Creates a snapshot from explicit values.
    #[must_use]
    pub fn new(checkout_step: Option<String>, order_item_ids: Vec<OrderItemId>) -> Self {
        Self {
            checkout_step,
            order_item_ids,
        }
    }

    /// Returns the checkout step at snapshot time.
    #[inline]
    #[must_use]
    pub fn checkout_step(&self) -> Option<&str> {
        self.checkout_step.as_deref()
    }

    /// Returns the order-item ID sequence at snapshot time.
    #[inline]
    #[must_use]
    pub fn order_item_ids(&self) -> &[OrderItemId] {
        &self.order_item_ids
    }
}

/// The order surface consumed by order processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier.
    id: OrderId,
    /// The store the order was placed in.
    store_id: StoreId,
    /// Checkout-step marker, if the order tracks one.
    checkout_step: Option<String>,
    /// Ordered order-item ID sequence.
    order_item_ids: Vec<OrderItemId>,
    /// Shipment references.
    shipment_ids: Vec<ShipmentId>,
    /// Order-level adjustments.
    adjustments: Vec<Adjustment>,
}

impl Order {
    /// Creates a new order with a generated ID.
    #[must_use]
    pub fn new(store_id: StoreId) -> Self {
        Self {
            id: OrderId::new_v4(),
            store_id,
            checkout_step: None,
            order_item_ids: Vec::new(),
            shipment_ids: Vec::new(),
            adjustments: Vec::new(),
        }
    }

    /// Returns the order ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the store ID.
    #[inline]
    #[must_use]
    pub fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    /// Returns the checkout step, if tracked.
    #[inline]
    #[must_use]
    pub fn checkout_step(&self) -> Option<&str> {
        self.checkout_step.as_deref()
    }

    /// Sets or clears the checkout step.
    pub fn set_checkout_step(&mut self, checkout_step: Option<&str>) {
        self.checkout_step = checkout_step.map(str::to_owned);
    }

    /// Appends an order item reference.
    pub fn add_order_item(&mut self, order_item_id: OrderItemId) {
        self.order_item_ids.push(order_item_id);
    }

    /// Returns the ordered order-item ID sequence.
    #[inline]
    #[must_use]
    pub fn order_item_ids(&self) -> &[OrderItemId] {
        &self.order_item_ids
    }

    /// Replaces the order-item ID sequence.
    pub fn set_order_item_ids(&mut self, order_item_ids: Vec<OrderItemId>) {
        self.order_item_ids = order_item_ids;
    }

    /// Returns the shipment references.
    #[inline]
    #[must_use]
    pub fn shipment_ids(&self) -> &[ShipmentId] {
        &self.shipment_ids
    }

    /// Replaces the shipment references.
    pub fn set_shipment_ids(&mut self, shipment_ids: Vec<ShipmentId>) {
        self.shipment_ids = shipment_ids;
    }

    /// Adds an order-level adjustment.
    pub fn add_adjustment(&mut self, adjustment: Adjustment) {
        self.adjustments.push(adjustment);
    }

    /// Returns the order-level adjustments.
    #[inline]
    #[must_use]
    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    /// Removes all adjustments of the given kind.
    pub fn remove_adjustments_of_kind(&mut self, kind: AdjustmentKind) {
        self.adjustments.retain(|adjustment| adjustment.kind() != kind);
    }

    /// Returns the adjustments of the given kind.
    pub fn adjustments_of_kind(
        &self,
        kind: AdjustmentKind,
    ) -> impl Iterator<Item = &Adjustment> {
        self.adjustments
            .iter()
            .filter(move |adjustment| adjustment.kind() == kind)
    }

    /// Captures the fields relevant to repack detection.
    #[must_use]
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot::new(self.checkout_step.clone(), self.order_item_ids.clone())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order({}: {} items, {} shipments)",
            self.id,
            self.order_item_ids.len(),
            self.shipment_ids.len()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn usd(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), "USD").unwrap()
    }

    fn test_order() -> Order {
        Order::new(StoreId::new("default"))
    }

    mod adjustments {
        use super::*;

        #[test]
        fn add_and_remove_by_kind() {
            let mut order = test_order();
            order.add_adjustment(Adjustment::new(
                AdjustmentKind::Shipping,
                "Shipping",
                usd(500),
                "shipment-1",
            ));
            order.add_adjustment(Adjustment::new(
                AdjustmentKind::ShippingPromotion,
                "Shipping Discount",
                usd(-100),
                "promo-1",
            ));

            order.remove_adjustments_of_kind(AdjustmentKind::Shipping);

            assert_eq!(order.adjustments().len(), 1);
            assert_eq!(
                order.adjustments_of_kind(AdjustmentKind::ShippingPromotion).count(),
                1
            );
        }

        #[test]
        fn with_percentage() {
            let adjustment = Adjustment::new(
                AdjustmentKind::ShippingPromotion,
                "Shipping Discount",
                usd(-250),
                "promo-1",
            )
            .with_percentage(Decimal::new(25, 2));

            assert_eq!(adjustment.percentage(), Some(Decimal::new(25, 2)));
            assert_eq!(adjustment.source_id(), "promo-1");
        }

        #[test]
        fn kind_display() {
            assert_eq!(AdjustmentKind::Shipping.to_string(), "shipping");
            assert_eq!(
                AdjustmentKind::ShippingPromotion.to_string(),
                "shipping_promotion"
            );
        }
    }

    mod snapshot {
        use super::*;

        #[test]
        fn snapshot_captures_step_and_items() {
            let mut order = test_order();
            order.set_checkout_step(Some("shipping"));
            order.add_order_item(OrderItemId::new("1"));
            order.add_order_item(OrderItemId::new("2"));

            let snapshot = order.snapshot();
            assert_eq!(snapshot.checkout_step(), Some("shipping"));
            assert_eq!(snapshot.order_item_ids(), order.order_item_ids());
        }

        #[test]
        fn snapshot_is_detached_from_later_changes() {
            let mut order = test_order();
            order.add_order_item(OrderItemId::new("1"));
            let snapshot = order.snapshot();

            order.add_order_item(OrderItemId::new("2"));
            assert_eq!(snapshot.order_item_ids().len(), 1);
            assert_eq!(order.order_item_ids().len(), 2);
        }
    }

    mod shipment_references {
        use super::*;

        #[test]
        fn set_and_read_references() {
            let mut order = test_order();
            let ids = vec![ShipmentId::new_v4(), ShipmentId::new_v4()];
            order.set_shipment_ids(ids.clone());
            assert_eq!(order.shipment_ids(), ids.as_slice());
        }
    }

    mod serde_roundtrip {
        use super::*;

        #[test]
        fn order_serde_roundtrip() {
            let mut order = test_order();
            order.set_checkout_step(Some("review"));
            order.add_order_item(OrderItemId::new("1"));
            order.add_adjustment(Adjustment::new(
                AdjustmentKind::Shipping,
                "Shipping",
                usd(500),
                "shipment-1",
            ));

            let json = serde_json::to_string(&order).unwrap();
            let deserialized: Order = serde_json::from_str(&json).unwrap();
            assert_eq!(order, deserialized);
        }
    }
}
