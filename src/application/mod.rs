//! # Application Layer
//!
//! The shipping operations exposed by this crate.

pub mod services;
