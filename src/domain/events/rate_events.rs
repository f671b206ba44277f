//! # Rate Events
//!
//! The rates-computed mutation hook.
//!
//! After a shipping method produces its rates and before they are merged
//! into the aggregation result, a [`RatesEvent`] is dispatched to an
//! ordered chain of [`RateListener`]s. Each listener may replace, filter,
//! or modify the rate list; listeners run synchronously in registration
//! order, and the last mutation wins.
//!
//! # Examples
//!
//! ```
//! use commerce_shipping::domain::events::rate_events::{RateListener, RatesEvent};
//!
//! /// Drops every rate above a configured amount.
//! #[derive(Debug)]
//! struct FreeShippingOnly;
//!
//! impl RateListener for FreeShippingOnly {
//!     fn on_rates_computed(&self, event: &mut RatesEvent<'_>) {
//!         event.rates_mut().retain(|rate| rate.amount().is_zero());
//!     }
//! }
//! ```

use crate::domain::entities::rate::Rate;
use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::ShippingMethodId;
use std::fmt;

/// Event dispatched after one method's rates are computed.
///
/// Carries the just-computed rate list along with the producing method
/// and the shipment being rated. Listeners mutate the rate list through
/// [`rates_mut`](Self::rates_mut) or replace it with
/// [`set_rates`](Self::set_rates).
#[derive(Debug)]
pub struct RatesEvent<'a> {
    rates: Vec<Rate>,
    shipping_method_id: &'a ShippingMethodId,
    shipment: &'a Shipment,
}

impl<'a> RatesEvent<'a> {
    /// Creates a new event.
    #[must_use]
    pub fn new(
        rates: Vec<Rate>,
        shipping_method_id: &'a ShippingMethodId,
        shipment: &'a Shipment,
    ) -> Self {
        Self {
            rates,
            shipping_method_id,
            shipment,
        }
    }

    /// Returns the current rate list.
    #[inline]
    #[must_use]
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// Returns the rate list mutably.
    #[inline]
    pub fn rates_mut(&mut self) -> &mut Vec<Rate> {
        &mut self.rates
    }

    /// Replaces the rate list.
    pub fn set_rates(&mut self, rates: Vec<Rate>) {
        self.rates = rates;
    }

    /// Returns the method that produced the rates.
    #[inline]
    #[must_use]
    pub fn shipping_method_id(&self) -> &ShippingMethodId {
        self.shipping_method_id
    }

    /// Returns the shipment being rated.
    #[inline]
    #[must_use]
    pub fn shipment(&self) -> &Shipment {
        self.shipment
    }

    /// Consumes the event, returning the final rate list.
    #[must_use]
    pub fn into_rates(self) -> Vec<Rate> {
        self.rates
    }
}

/// Synchronous rates-computed mutation hook.
///
/// Listeners are registered on the aggregator as an explicit ordered
/// list and applied in registration order.
pub trait RateListener: Send + Sync + fmt::Debug {
    /// Called after one method's rates are computed, before merging.
    fn on_rates_computed(&self, event: &mut RatesEvent<'_>);
}
