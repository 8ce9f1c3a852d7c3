//! CONEXA Market Client - HTTP access to the marketplace listing API.
//!
//! Provides [`MarketApiClient`], the `reqwest` implementation of
//! [`conexa_core::market::MarketService`].

pub mod client;

pub use client::{MarketApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
