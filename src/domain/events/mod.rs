//! # Domain Events
//!
//! The mutation hooks dispatched during rate aggregation.
//!
//! ## Rate Events
//!
//! - [`RatesEvent`]: carries one method's just-computed rates for mutation
//! - [`RateListener`]: synchronous hook applied in registration order

pub mod rate_events;

pub use rate_events::{RateListener, RatesEvent};
