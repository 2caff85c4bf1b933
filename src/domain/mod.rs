//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `pricing` - Amounts and price quotes

pub mod pricing;
