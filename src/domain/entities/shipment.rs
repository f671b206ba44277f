//! # Shipment Entity
//!
//! A package of order items headed to one destination.
//!
//! Shipments are owned by the embedding system; this crate reads and
//! mutates the fields handed to it. A shipment carries the selected
//! shipping method and service, the resolved amount once a rate has been
//! applied, and a string data bag used for packer bookkeeping.
//!
//! # Examples
//!
//! ```
//! use commerce_shipping::domain::entities::shipment::{Shipment, ShipmentItem};
//! use commerce_shipping::domain::value_objects::{OrderId, OrderItemId, StoreId};
//!
//! let mut shipment = Shipment::new(OrderId::new_v4(), StoreId::new("default"), "Shipment #1");
//! shipment.add_item(ShipmentItem::new(OrderItemId::new("1"), "T-shirt", 2, 200));
//!
//! assert_eq!(shipment.items().len(), 1);
//! assert!(shipment.amount().is_none());
//! ```

use crate::domain::entities::order::Adjustment;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{
    Money, OrderId, OrderItemId, PackageType, ServiceId, ShipmentId, ShippingMethodId, StoreId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Data bag key marking shipments created by the automatic packer.
const OWNED_BY_PACKER: &str = "owned_by_packer";

/// An order item placed into a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentItem {
    /// The order item this entry came from.
    order_item_id: OrderItemId,
    /// Human-readable title.
    title: String,
    /// Number of units.
    quantity: u32,
    /// Weight per unit, in grams.
    weight_g: u32,
    /// Declared value, if any.
    declared_value: Option<Money>,
}

impl ShipmentItem {
    /// Creates a new shipment item.
    #[must_use]
    pub fn new(
        order_item_id: OrderItemId,
        title: impl Into<String>,
        quantity: u32,
        weight_g: u32,
    ) -> Self {
        Self {
            order_item_id,
            title: title.into(),
            quantity,
            weight_g,
            declared_value: None,
        }
    }

    /// Sets the declared value.
    #[must_use]
    pub fn with_declared_value(mut self, declared_value: Money) -> Self {
        self.declared_value = Some(declared_value);
        self
    }

    /// Returns the order item ID.
    #[inline]
    #[must_use]
    pub fn order_item_id(&self) -> &OrderItemId {
        &self.order_item_id
    }

    /// Returns the title.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the weight per unit in grams.
    #[inline]
    #[must_use]
    pub fn weight_g(&self) -> u32 {
        self.weight_g
    }

    /// Returns the declared value, if any.
    #[inline]
    #[must_use]
    pub fn declared_value(&self) -> Option<&Money> {
        self.declared_value.as_ref()
    }

    /// Returns the total weight of this entry in grams.
    #[must_use]
    pub fn total_weight_g(&self) -> u64 {
        u64::from(self.weight_g) * u64::from(self.quantity)
    }
}

/// Mutable string data bag attached to a shipment.
///
/// Used for method selection bookkeeping and test hooks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShipmentData {
    data: HashMap<String, String>,
}

impl ShipmentData {
    /// Creates an empty data bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    /// Gets a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    /// Returns true if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A package of order items headed to one destination.
///
/// # Lifecycle
///
/// Shipments created by the automatic packer carry the packer marker in
/// their data bag; manually created shipments do not, which makes them
/// sticky during order processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    /// Unique identifier.
    id: ShipmentId,
    /// The order this shipment belongs to.
    order_id: OrderId,
    /// The store the order was placed in.
    store_id: StoreId,
    /// Human-readable title used for adjustment labels.
    title: String,
    /// Packed order items.
    items: Vec<ShipmentItem>,
    /// Package type, defaulted from the method during rate selection.
    package_type: Option<PackageType>,
    /// Selected shipping method, if any.
    shipping_method_id: Option<ShippingMethodId>,
    /// Selected shipping service, if any.
    shipping_service_id: Option<ServiceId>,
    /// Resolved amount once a rate has been applied.
    amount: Option<Money>,
    /// Shipment-level adjustments (e.g. shipping promotions).
    adjustments: Vec<Adjustment>,
    /// Mutable data bag.
    data: ShipmentData,
}

impl Shipment {
    /// Creates a new shipment with a generated ID.
    #[must_use]
    pub fn new(order_id: OrderId, store_id: StoreId, title: impl Into<String>) -> Self {
        Self {
            id: ShipmentId::new_v4(),
            order_id,
            store_id,
            title: title.into(),
            items: Vec::new(),
            package_type: None,
            shipping_method_id: None,
            shipping_service_id: None,
            amount: None,
            adjustments: Vec::new(),
            data: ShipmentData::new(),
        }
    }

    /// Creates a shipment with a specific ID (for reconstruction from
    /// storage).
    #[must_use]
    pub fn from_parts(
        id: ShipmentId,
        order_id: OrderId,
        store_id: StoreId,
        title: impl Into<String>,
        items: Vec<ShipmentItem>,
    ) -> Self {
        Self {
            id,
            order_id,
            store_id,
            title: title.into(),
            items,
            package_type: None,
            shipping_method_id: None,
            shipping_service_id: None,
            amount: None,
            adjustments: Vec::new(),
            data: ShipmentData::new(),
        }
    }

    /// Returns the shipment ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ShipmentId {
        self.id
    }

    /// Returns the owning order ID.
    #[inline]
    #[must_use]
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Returns the store ID.
    #[inline]
    #[must_use]
    pub fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    /// Returns the title.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Adds an item to the shipment.
    pub fn add_item(&mut self, item: ShipmentItem) {
        self.items.push(item);
    }

    /// Returns the packed items.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[ShipmentItem] {
        &self.items
    }

    /// Returns the package type, if set.
    #[inline]
    #[must_use]
    pub fn package_type(&self) -> Option<&PackageType> {
        self.package_type.as_ref()
    }

    /// Sets or clears the package type.
    pub fn set_package_type(&mut self, package_type: Option<PackageType>) {
        self.package_type = package_type;
    }

    /// Returns the selected shipping method ID, if any.
    #[inline]
    #[must_use]
    pub fn shipping_method_id(&self) -> Option<&ShippingMethodId> {
        self.shipping_method_id.as_ref()
    }

    /// Sets or clears the selected shipping method.
    pub fn set_shipping_method_id(&mut self, shipping_method_id: Option<ShippingMethodId>) {
        self.shipping_method_id = shipping_method_id;
    }

    /// Returns the selected shipping service ID, if any.
    #[inline]
    #[must_use]
    pub fn shipping_service_id(&self) -> Option<&ServiceId> {
        self.shipping_service_id.as_ref()
    }

    /// Sets or clears the selected shipping service.
    pub fn set_shipping_service_id(&mut self, shipping_service_id: Option<ServiceId>) {
        self.shipping_service_id = shipping_service_id;
    }

    /// Returns the resolved amount, if the shipment has been rated.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Option<&Money> {
        self.amount.as_ref()
    }

    /// Sets or clears the resolved amount.
    pub fn set_amount(&mut self, amount: Option<Money>) {
        self.amount = amount;
    }

    /// Adds a shipment-level adjustment.
    pub fn add_adjustment(&mut self, adjustment: Adjustment) {
        self.adjustments.push(adjustment);
    }

    /// Returns the shipment-level adjustments.
    #[inline]
    #[must_use]
    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    /// Returns the amount with all shipment-level adjustments applied.
    ///
    /// `None` when the shipment has not been rated yet.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CurrencyMismatch` or `DomainError::Overflow`
    /// if an adjustment cannot be combined with the amount.
    pub fn adjusted_amount(&self) -> DomainResult<Option<Money>> {
        let Some(amount) = &self.amount else {
            return Ok(None);
        };
        let mut adjusted = amount.clone();
        for adjustment in &self.adjustments {
            adjusted = adjusted.checked_add(adjustment.amount())?;
        }
        Ok(Some(adjusted))
    }

    /// Returns the total weight in grams, including the package tare.
    #[must_use]
    pub fn total_weight_g(&self) -> u64 {
        let items: u64 = self.items.iter().map(ShipmentItem::total_weight_g).sum();
        let tare = self
            .package_type
            .as_ref()
            .map_or(0, |package| u64::from(package.weight_g()));
        items + tare
    }

    /// Returns the data bag.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &ShipmentData {
        &self.data
    }

    /// Returns the data bag mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut ShipmentData {
        &mut self.data
    }

    /// Marks this shipment as created by the automatic packer.
    pub fn mark_owned_by_packer(&mut self) {
        self.data.set(OWNED_BY_PACKER, "1");
    }

    /// Returns true if this shipment was created by the automatic packer.
    ///
    /// Manually created shipments are sticky: order processing never
    /// repacks an order that contains one.
    #[must_use]
    pub fn is_owned_by_packer(&self) -> bool {
        self.data
            .get(OWNED_BY_PACKER)
            .is_some_and(|value| value == "1" || value == "true")
    }
}

impl fmt::Display for Shipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shipment({}: {})", self.id, self.title)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::order::AdjustmentKind;
    use rust_decimal::Decimal;

    fn usd(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), "USD").unwrap()
    }

    fn test_shipment() -> Shipment {
        Shipment::new(OrderId::new_v4(), StoreId::new("default"), "Shipment #1")
    }

    mod items_and_weight {
        use super::*;

        #[test]
        fn total_weight_sums_items_and_tare() {
            let mut shipment = test_shipment();
            shipment.add_item(ShipmentItem::new(OrderItemId::new("1"), "T-shirt", 2, 200));
            shipment.add_item(ShipmentItem::new(OrderItemId::new("2"), "Mug", 1, 350));
            shipment.set_package_type(Some(PackageType::new("custom_box", "Custom box", 120)));

            assert_eq!(shipment.total_weight_g(), 2 * 200 + 350 + 120);
        }

        #[test]
        fn total_weight_without_package_type() {
            let mut shipment = test_shipment();
            shipment.add_item(ShipmentItem::new(OrderItemId::new("1"), "T-shirt", 1, 200));
            assert_eq!(shipment.total_weight_g(), 200);
        }

        #[test]
        fn item_declared_value() {
            let item = ShipmentItem::new(OrderItemId::new("1"), "Watch", 1, 80)
                .with_declared_value(usd(25000));
            assert_eq!(item.declared_value(), Some(&usd(25000)));
        }
    }

    mod rating {
        use super::*;

        #[test]
        fn new_shipment_is_unrated() {
            let shipment = test_shipment();
            assert!(shipment.amount().is_none());
            assert_eq!(shipment.adjusted_amount().unwrap(), None);
        }

        #[test]
        fn adjusted_amount_applies_adjustments() {
            let mut shipment = test_shipment();
            shipment.set_amount(Some(usd(1000)));
            shipment.add_adjustment(Adjustment::new(
                AdjustmentKind::ShippingPromotion,
                "Shipping Discount",
                usd(-250),
                "promo-1",
            ));

            assert_eq!(shipment.adjusted_amount().unwrap(), Some(usd(750)));
        }

        #[test]
        fn selection_fields_roundtrip() {
            let mut shipment = test_shipment();
            shipment.set_shipping_method_id(Some(ShippingMethodId::new("ups")));
            shipment.set_shipping_service_id(Some(ServiceId::new("ground")));
            shipment.set_amount(Some(usd(1250)));

            assert_eq!(
                shipment.shipping_method_id(),
                Some(&ShippingMethodId::new("ups"))
            );
            assert_eq!(shipment.shipping_service_id(), Some(&ServiceId::new("ground")));
            assert_eq!(shipment.amount(), Some(&usd(1250)));
        }
    }

    mod packer_marker {
        use super::*;

        #[test]
        fn new_shipment_is_not_packer_owned() {
            assert!(!test_shipment().is_owned_by_packer());
        }

        #[test]
        fn mark_owned_by_packer() {
            let mut shipment = test_shipment();
            shipment.mark_owned_by_packer();
            assert!(shipment.is_owned_by_packer());
        }

        #[test]
        fn data_bag_accepts_truthy_marker() {
            let mut shipment = test_shipment();
            shipment.data_mut().set("owned_by_packer", "true");
            assert!(shipment.is_owned_by_packer());

            shipment.data_mut().set("owned_by_packer", "0");
            assert!(!shipment.is_owned_by_packer());
        }
    }

    mod serde_roundtrip {
        use super::*;

        #[test]
        fn shipment_serde_roundtrip() {
            let mut shipment = test_shipment();
            shipment.add_item(ShipmentItem::new(OrderItemId::new("1"), "T-shirt", 2, 200));
            shipment.set_amount(Some(usd(500)));
            shipment.mark_owned_by_packer();

            let json = serde_json::to_string(&shipment).unwrap();
            let deserialized: Shipment = serde_json::from_str(&json).unwrap();
            assert_eq!(shipment, deserialized);
        }
    }
}
