//! Genesis Checkout - card checkout priced from an on-chain sale contract
//!
//! Reads the sale contract's `currentPrice()`, converts it to fiat through a
//! public price feed, and opens Stripe payment intents for that amount.
//! Stripe webhooks are verified and logged.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
