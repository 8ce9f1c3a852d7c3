use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use conexa_core::market::{MarketDataAggregator, MarketView};
use conexa_core::navigation::{SidebarHeader, SidebarState, MAIN_MENU, SETTINGS_ITEM};
use conexa_core::theme::{FileThemePreference, Theme, ThemeStore, ThemeSubscription};
use conexa_core::users::{SessionStore, UserProvider};
use conexa_market_client::MarketApiClient;

use crate::config::Config;

/// Route the dashboard snapshot is taken from.
const LANDING_ROUTE: &str = "/marketplace";

pub struct AppState {
    pub session: Arc<SessionStore>,
    pub aggregator: Arc<MarketDataAggregator>,
    pub theme: ThemeStore,
    _theme_logger: ThemeSubscription,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub path: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub header: SidebarHeader,
    pub theme: Theme,
    pub theme_toggle_label: &'static str,
    pub menu: Vec<MenuEntry>,
    pub market: MarketView,
}

pub fn init_tracing() {
    let log_format = std::env::var("CONEXA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let client = MarketApiClient::with_timeout(
        &config.api_url,
        config.access_token.as_deref(),
        config.request_timeout,
    )
    .context("Failed to build market API client")?;
    tracing::info!("Market API in use: {}", client.base_url());

    let session = Arc::new(SessionStore::new());
    let aggregator = Arc::new(MarketDataAggregator::new(
        Arc::new(client),
        session.clone(),
    ));

    let theme = ThemeStore::load(Arc::new(FileThemePreference::new(&config.theme_file)));
    let theme_logger = theme.on_change(|theme| tracing::info!("Theme is now {}", theme));

    Ok(AppState {
        session,
        aggregator,
        theme,
        _theme_logger: theme_logger,
    })
}

/// Sign in the configured user, wait for the market feed and describe the
/// sidebar as it would render on the landing route.
pub async fn load_dashboard(state: &AppState, config: &Config) -> anyhow::Result<DashboardSnapshot> {
    if let Some(theme) = config.theme {
        state.theme.set(theme);
    }
    if config.toggle_theme {
        state.theme.toggle();
    }

    let listener = state.aggregator.watch_session(state.session.subscribe());
    let mut updates = state.aggregator.subscribe();

    match &config.user {
        Some(user) => {
            state.session.sign_in(user.clone());
            let deadline = config.request_timeout * 2 + std::time::Duration::from_secs(1);
            tokio::time::timeout(deadline, updates.wait_for(|s| !s.is_loading))
                .await
                .context("Timed out waiting for market data")?
                .context("Market state channel closed")?;
        }
        None => tracing::warn!("No CONEXA_ROLE configured, market data is not loaded"),
    }
    listener.abort();

    let current_user = state.session.current_user();
    let theme = state.theme.current();
    let menu = MAIN_MENU
        .iter()
        .chain(std::iter::once(&SETTINGS_ITEM))
        .map(|item| MenuEntry {
            path: item.path,
            label: item.label,
            active: item.is_active(LANDING_ROUTE),
        })
        .collect();

    Ok(DashboardSnapshot {
        header: SidebarHeader::for_user(current_user.as_ref()),
        theme,
        theme_toggle_label: SidebarState::theme_toggle_label(theme),
        menu,
        market: state.aggregator.view(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use conexa_core::constants::MARKET_LOAD_ERROR_MESSAGE;
    use conexa_core::users::{Role, User};
    use std::time::Duration;
    use tempfile::tempdir;

    fn test_config(theme_file: std::path::PathBuf, user: Option<User>) -> Config {
        // Port 9 (discard) is not expected to serve HTTP on test hosts.
        Config {
            api_url: "http://127.0.0.1:9".to_string(),
            access_token: None,
            request_timeout: Duration::from_secs(2),
            theme_file,
            theme: None,
            toggle_theme: true,
            user,
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_is_reported_in_snapshot() {
        let dir = tempdir().unwrap();
        let config = test_config(
            dir.path().join("theme.json"),
            Some(User::new("u1", "fleet@conexa.test", Role::Carrier)),
        );
        let state = build_state(&config).unwrap();

        let snapshot = load_dashboard(&state, &config).await.unwrap();

        assert!(snapshot.market.data.is_empty());
        assert!(!snapshot.market.loading);
        assert_eq!(snapshot.market.error.as_deref(), Some(MARKET_LOAD_ERROR_MESSAGE));
        assert_eq!(snapshot.theme, Theme::Dark);
        assert_eq!(snapshot.theme_toggle_label, "Modo Claro");
        assert_eq!(snapshot.header.email.as_deref(), Some("fleet@conexa.test"));

        let active: Vec<&str> = snapshot
            .menu
            .iter()
            .filter(|m| m.active)
            .map(|m| m.label)
            .collect();
        assert_eq!(active, vec!["Marketplace"]);

        // The toggled theme was persisted for the next run.
        let reloaded = build_state(&config).unwrap();
        assert_eq!(reloaded.theme.current(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_anonymous_run_skips_fetch() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path().join("theme.json"), None);
        let state = build_state(&config).unwrap();

        let snapshot = load_dashboard(&state, &config).await.unwrap();

        assert!(snapshot.market.loading);
        assert_eq!(snapshot.market.error, None);
        assert_eq!(snapshot.header.display_name, "CONEXA Logistics");
    }

    #[tokio::test]
    async fn test_theme_override_applies_before_toggle() {
        let dir = tempdir().unwrap();
        let mut config = test_config(dir.path().join("theme.json"), None);
        config.theme = Some(Theme::Dark);
        let state = build_state(&config).unwrap();

        let snapshot = load_dashboard(&state, &config).await.unwrap();

        assert_eq!(snapshot.theme, Theme::Light);
        assert_eq!(snapshot.theme_toggle_label, "Modo Oscuro");
    }
}
