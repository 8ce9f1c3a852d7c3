use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use conexa_core::theme::Theme;
use conexa_core::users::{Role, User};
use conexa_market_client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

pub struct Config {
    pub api_url: String,
    pub access_token: Option<String>,
    pub request_timeout: Duration,
    pub theme_file: PathBuf,
    /// Theme forced for this run, applied before any toggle.
    pub theme: Option<Theme>,
    pub toggle_theme: bool,
    /// Signed-in user; `None` runs the client unauthenticated.
    pub user: Option<User>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("CONEXA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let access_token = lookup("CONEXA_ACCESS_TOKEN").filter(|t| !t.trim().is_empty());
        let timeout_ms: u64 = match lookup("CONEXA_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid CONEXA_REQUEST_TIMEOUT_MS '{}'", raw))?,
            None => DEFAULT_TIMEOUT_SECS * 1000,
        };
        let theme_file = lookup("CONEXA_THEME_FILE")
            .unwrap_or_else(|| "./conexa-theme.json".into())
            .into();
        let theme = lookup("CONEXA_THEME")
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.parse::<Theme>())
            .transpose()
            .context("Invalid CONEXA_THEME")?;
        let toggle_theme = lookup("CONEXA_TOGGLE_THEME")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let user = lookup("CONEXA_ROLE")
            .filter(|r| !r.trim().is_empty())
            .map(|role| {
                let email =
                    lookup("CONEXA_EMAIL").unwrap_or_else(|| "guest@conexa.local".to_string());
                let mut user = User::new(
                    lookup("CONEXA_USER_ID").unwrap_or_else(|| email.clone()),
                    email,
                    Role::from(role.trim()),
                );
                user.enterprise_name = lookup("CONEXA_ENTERPRISE_NAME");
                user
            });

        Ok(Self {
            api_url,
            access_token,
            request_timeout: Duration::from_millis(timeout_ms),
            theme_file,
            theme,
            toggle_theme,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.access_token, None);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.theme_file, PathBuf::from("./conexa-theme.json"));
        assert_eq!(config.theme, None);
        assert!(!config.toggle_theme);
        assert!(config.user.is_none());
    }

    #[test]
    fn test_user_from_env() {
        let config = config(&[
            ("CONEXA_ROLE", "operador_dual"),
            ("CONEXA_EMAIL", "ops@conexa.test"),
            ("CONEXA_TOGGLE_THEME", "true"),
        ])
        .unwrap();
        let user = config.user.unwrap();
        assert_eq!(user.role, Role::DualOperator);
        assert_eq!(user.email, "ops@conexa.test");
        assert_eq!(user.id, "ops@conexa.test");
        assert!(config.toggle_theme);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        assert!(config(&[("CONEXA_REQUEST_TIMEOUT_MS", "soon")]).is_err());
    }

    #[test]
    fn test_theme_override() {
        let config = config(&[("CONEXA_THEME", " Dark ")]).unwrap();
        assert_eq!(config.theme, Some(Theme::Dark));

        assert!(super::Config::from_lookup(|key| {
            (key == "CONEXA_THEME").then(|| "sepia".to_string())
        })
        .is_err());
    }
}
