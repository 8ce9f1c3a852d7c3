//! Headless sidebar state.

use log::info;
use serde::Serialize;

use super::Navigator;
use crate::constants::{DEFAULT_AVATAR_URL, DEFAULT_DISPLAY_NAME, HOME_ROUTE};
use crate::theme::Theme;
use crate::users::{User, UserProvider};

/// Identity block at the top of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarHeader {
    pub display_name: String,
    pub email: Option<String>,
    pub avatar_url: String,
}

impl SidebarHeader {
    pub fn for_user(user: Option<&User>) -> Self {
        match user {
            Some(user) => Self {
                display_name: user.display_name().to_string(),
                email: Some(user.email.clone()),
                avatar_url: user.avatar_url().to_string(),
            },
            None => Self {
                display_name: DEFAULT_DISPLAY_NAME.to_string(),
                email: None,
                avatar_url: DEFAULT_AVATAR_URL.to_string(),
            },
        }
    }
}

/// Open/closed flags of the sidebar and its overlays.
///
/// `collapsed` only applies to the desktop layout; the mobile drawer always
/// renders expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarState {
    pub collapsed: bool,
    pub drawer_open: bool,
    pub logout_modal_open: bool,
}

impl SidebarState {
    pub fn new(collapsed: bool) -> Self {
        Self {
            collapsed,
            ..Self::default()
        }
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn effective_collapsed(&self, mobile: bool) -> bool {
        !mobile && self.collapsed
    }

    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    /// Ask for confirmation before signing out.
    pub fn request_logout(&mut self) {
        self.logout_modal_open = true;
    }

    pub fn cancel_logout(&mut self) {
        self.logout_modal_open = false;
    }

    /// Sign out, dismiss every overlay and return to the landing page.
    pub fn confirm_logout(&mut self, session: &dyn UserProvider, navigator: &dyn Navigator) {
        info!("Logout confirmed from sidebar");
        session.sign_out();
        self.logout_modal_open = false;
        self.drawer_open = false;
        navigator.navigate(HOME_ROUTE);
    }

    /// Caption of the theme switch: it names the mode it switches to.
    pub fn theme_toggle_label(theme: Theme) -> &'static str {
        match theme {
            Theme::Dark => "Modo Claro",
            Theme::Light => "Modo Oscuro",
        }
    }
}
