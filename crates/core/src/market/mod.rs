//! Market module - listing models, the upstream service seam, and the
//! role-dispatched aggregator.

mod market_model;
mod market_service;
mod market_traits;


// Re-export the public interface
pub use market_model::{AggregationResult, FetchPlan, ListingEnvelope, MarketItem, MarketView};
pub use market_service::MarketDataAggregator;
pub use market_traits::MarketService;
