//! CONEXA Core - Session, marketplace, theme and sidebar state.
//!
//! This crate holds the client-side logic of the CONEXA logistics
//! marketplace. It is transport-agnostic: the HTTP layer lives in the
//! `market-client` crate and implements the [`market::MarketService`] trait.

pub mod constants;
pub mod errors;
pub mod market;
pub mod navigation;
pub mod theme;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
