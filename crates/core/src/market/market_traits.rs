use async_trait::async_trait;

use super::ListingEnvelope;
use crate::errors::Result;

/// Upstream listing sources of the marketplace.
///
/// Both calls share one contract: an envelope whose `data` may be missing,
/// or an error. No distinction is made between failure causes.
#[async_trait]
pub trait MarketService: Send + Sync {
    /// Offers published by provider-role users.
    async fn get_offers(&self) -> Result<ListingEnvelope>;

    /// Requests published by carrier-role users.
    async fn get_requests(&self) -> Result<ListingEnvelope>;
}
