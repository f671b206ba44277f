//! # Shipment Order Processor
//!
//! Folds resolved shipment amounts into order adjustments.
//!
//! This module provides the [`ShipmentOrderProcessor`] which decides
//! whether an order's shipments must be regenerated ("repacked") through
//! the external packer and adds one shipping adjustment per rated
//! shipment. The repack decision is a pure function re-evaluated on every
//! call; it has no persisted state of its own.

use crate::domain::entities::order::{Adjustment, AdjustmentKind, Order, OrderSnapshot};
use crate::domain::entities::profile::ShippingProfile;
use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::ShipmentId;
use crate::infrastructure::persistence::traits::{RepositoryResult, ShipmentRepository};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Label used when the order has exactly one shipment.
const SINGLE_SHIPMENT_LABEL: &str = "Shipping";

/// Port for profile resolution and shipment packing.
///
/// Both capabilities are owned by the embedding system: it knows how to
/// resolve an order's shipping profile and how to pack order items into
/// shipments.
#[async_trait]
pub trait ShippingOrderManager: Send + Sync + fmt::Debug {
    /// Resolves the order's shipping profile, if it has one.
    async fn shipping_profile(&self, order: &Order) -> Option<ShippingProfile>;

    /// Regenerates the order's shipment set from scratch.
    ///
    /// Returned shipments are expected to carry the packer marker.
    async fn pack(&self, order: &Order, profile: &ShippingProfile) -> Vec<Shipment>;
}

/// Processes an order's shipments into shipping adjustments.
#[derive(Debug)]
pub struct ShipmentOrderProcessor {
    shipments: Arc<dyn ShipmentRepository>,
    order_manager: Arc<dyn ShippingOrderManager>,
}

impl ShipmentOrderProcessor {
    /// Creates a new processor.
    #[must_use]
    pub fn new(
        shipments: Arc<dyn ShipmentRepository>,
        order_manager: Arc<dyn ShippingOrderManager>,
    ) -> Self {
        Self {
            shipments,
            order_manager,
        }
    }

    /// Processes the order's shipments.
    ///
    /// `original` is the optional previous-revision snapshot used for
    /// repack change detection.
    ///
    /// Side effects: the order's shipping adjustments are rebuilt, the
    /// shipment reference list may be replaced after repacking, and
    /// orphaned shipments may be deleted through the repository. When the
    /// order has a missing profile its shipments are deleted but the
    /// references stay; the next call hits the dangling-reference guard
    /// and no-ops.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if shipment loading, saving, or
    /// deletion fails.
    pub async fn process(
        &self,
        order: &mut Order,
        original: Option<&OrderSnapshot>,
    ) -> RepositoryResult<()> {
        order.remove_adjustments_of_kind(AdjustmentKind::Shipping);

        if order.shipment_ids().is_empty() {
            return Ok(());
        }

        let mut shipments = self.shipments.load_many(order.shipment_ids()).await?;
        // A non-empty reference list may still resolve to nothing when the
        // referenced shipments no longer exist.
        if shipments.is_empty() {
            return Ok(());
        }

        if should_repack(order, original, &shipments) {
            let Some(profile) = self.order_manager.shipping_profile(order).await else {
                let ids: Vec<ShipmentId> = shipments.iter().map(Shipment::id).collect();
                self.shipments.delete_many(&ids).await?;
                return Ok(());
            };
            shipments = self.order_manager.pack(order, &profile).await;
            for shipment in &shipments {
                self.shipments.save(shipment).await?;
            }
            order.set_shipment_ids(shipments.iter().map(Shipment::id).collect());
        }

        let single_shipment = shipments.len() == 1;
        for shipment in &shipments {
            // Only rated shipments produce an adjustment.
            if let Some(amount) = shipment.amount() {
                let label = if single_shipment {
                    SINGLE_SHIPMENT_LABEL.to_string()
                } else {
                    shipment.title().to_string()
                };
                order.add_adjustment(Adjustment::new(
                    AdjustmentKind::Shipping,
                    label,
                    amount.clone(),
                    shipment.id().to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Decides whether the order's shipment set has to be regenerated.
///
/// Rule A: an order holding a shipment the packer did not create is left
/// alone; regenerating would wipe manual edits.
///
/// Rule B: item quantity changes cannot be observed at this layer, so
/// every refresh regenerates, with one exception: a checkout-step
/// transition whose order-item ID sequence is unchanged.
#[must_use]
pub fn should_repack(
    order: &Order,
    original: Option<&OrderSnapshot>,
    shipments: &[Shipment],
) -> bool {
    if shipments.iter().any(|shipment| !shipment.is_owned_by_packer()) {
        return false;
    }

    if let Some(original) = original
        && let (Some(previous_step), Some(current_step)) =
            (original.checkout_step(), order.checkout_step())
        && previous_step != current_step
        && original.order_item_ids() == order.order_item_ids()
    {
        return false;
    }

    true
}
