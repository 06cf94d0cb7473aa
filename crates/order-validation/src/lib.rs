//! Read-only linting of exchange orders against on-chain state.
//!
//! [`OrderValidator`] runs the full pipeline. The checks are also exposed
//! one by one so callers can lint a single aspect of an order.

pub mod balances;
pub mod chain;
pub mod conduit;
pub mod config;
pub mod items;
pub mod onchain;
pub mod query;
pub mod signature;
pub mod status;
pub mod strict;
pub mod time;
pub mod validator;
pub mod zone;

pub use {
    config::{Addresses, Config},
    validator::OrderValidator,
};
