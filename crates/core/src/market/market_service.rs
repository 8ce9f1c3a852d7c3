//! Role-dispatched aggregation of marketplace listings.

use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{AggregationResult, FetchPlan, MarketItem, MarketService, MarketView};
use crate::constants::MARKET_LOAD_ERROR_MESSAGE;
use crate::errors::Result;
use crate::users::{SessionSnapshot, User, UserProvider};

/// Produces one role-appropriate listing feed for the signed-in user.
///
/// Callers never learn whether zero, one or two upstream sources were
/// consulted. They read [`current_state`](Self::current_state) or follow
/// [`subscribe`](Self::subscribe); errors are absorbed into
/// `error_message` and never returned.
///
/// The aggregator is the single writer of its state. Overlapping
/// [`refetch`](Self::refetch) calls are not cancelled: whichever resolves
/// last determines the visible result.
pub struct MarketDataAggregator {
    market_service: Arc<dyn MarketService>,
    user_provider: Arc<dyn UserProvider>,
    state: watch::Sender<AggregationResult>,
}

impl MarketDataAggregator {
    pub fn new(
        market_service: Arc<dyn MarketService>,
        user_provider: Arc<dyn UserProvider>,
    ) -> Self {
        let (state, _receiver) = watch::channel(AggregationResult::default());
        Self {
            market_service,
            user_provider,
            state,
        }
    }

    /// Snapshot of the most recent completed or in-flight fetch.
    pub fn current_state(&self) -> AggregationResult {
        self.state.borrow().clone()
    }

    /// Snapshot in the `{ data, loading, error }` shape.
    pub fn view(&self) -> MarketView {
        self.current_state().into()
    }

    pub fn subscribe(&self) -> watch::Receiver<AggregationResult> {
        self.state.subscribe()
    }

    /// Run one fetch cycle for the user known right now.
    ///
    /// Without a signed-in user nothing is fetched and the state is left as is.
    pub async fn refetch(&self) {
        let Some(user) = self.user_provider.current_user() else {
            debug!("[Market] No signed-in user, skipping fetch");
            return;
        };

        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });

        let plan = FetchPlan::for_role(&user.role);
        debug!("[Market] Fetching {:?} for role '{}'", plan, user.role);

        match self.load(plan, &user).await {
            Ok(items) => {
                info!("[Market] Loaded {} listings", items.len());
                self.state.send_modify(|state| {
                    state.items = items;
                    state.is_loading = false;
                });
            }
            Err(e) => {
                error!("[Market] Error fetching market data: {}", e);
                self.state.send_modify(|state| {
                    state.items.clear();
                    state.error_message = Some(MARKET_LOAD_ERROR_MESSAGE.to_string());
                    state.is_loading = false;
                });
            }
        }
    }

    async fn load(&self, plan: FetchPlan, user: &User) -> Result<Vec<MarketItem>> {
        match plan {
            FetchPlan::Requests => Ok(self.market_service.get_requests().await?.into_items()),
            FetchPlan::Offers => Ok(self.market_service.get_offers().await?.into_items()),
            FetchPlan::Both => {
                // Fail-fast join: one failing source fails the whole cycle.
                let (offers, requests) = futures::try_join!(
                    self.market_service.get_offers(),
                    self.market_service.get_requests()
                )?;
                let mut items = offers.into_items();
                items.extend(requests.into_items());
                Ok(items)
            }
            FetchPlan::Nothing => {
                warn!(
                    "[Market] Role '{}' of user {} has no marketplace listings",
                    user.role, user.id
                );
                Ok(Vec::new())
            }
        }
    }

    /// Follow session changes and fetch whenever a user signs in.
    ///
    /// Only the absent to present transition triggers a fetch; replacing a
    /// signed-in user (including a role change) does not. Sign-ins are
    /// detected through the session's sign-in counter, so a sign-out and a
    /// sign-in that reach the listener as a single update still fetch. If a
    /// user is already signed in when this is called, a fetch starts right
    /// away.
    pub fn watch_session(
        self: &Arc<Self>,
        mut session_updates: watch::Receiver<SessionSnapshot>,
    ) -> JoinHandle<()> {
        let aggregator = Arc::clone(self);
        tokio::spawn(async move {
            let mut handled_sign_ins = {
                let session = session_updates.borrow_and_update();
                if session.user.is_some() {
                    aggregator.spawn_refetch();
                }
                session.sign_ins
            };

            while session_updates.changed().await.is_ok() {
                let (signed_in, sign_ins) = {
                    let session = session_updates.borrow_and_update();
                    (session.user.is_some(), session.sign_ins)
                };
                if signed_in && sign_ins != handled_sign_ins {
                    aggregator.spawn_refetch();
                }
                handled_sign_ins = sign_ins;
            }
            debug!("[Market] Session channel closed, stopping listener");
        })
    }

    fn spawn_refetch(self: &Arc<Self>) {
        let aggregator = Arc::clone(self);
        tokio::spawn(async move { aggregator.refetch().await });
    }
}
