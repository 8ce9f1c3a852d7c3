//! Sidebar menu entries and route matching.

use serde::Serialize;

/// Root of the marketplace section. Only an exact match highlights it, so
/// its sub-pages do not light up two entries at once.
const MARKETPLACE_ROUTE: &str = "/marketplace";

/// One entry of the sidebar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
}

/// Entries of the main navigation, in display order.
pub const MAIN_MENU: [NavItem; 5] = [
    NavItem {
        path: MARKETPLACE_ROUTE,
        label: "Marketplace",
    },
    NavItem {
        path: "/marketplace/my-publications",
        label: "Mis Publicaciones",
    },
    NavItem {
        path: "/messages",
        label: "Mensajes",
    },
    NavItem {
        path: "/community",
        label: "Portal Comunitario",
    },
    NavItem {
        path: "/profile",
        label: "Perfil",
    },
];

/// Entry pinned to the bottom of the sidebar.
pub const SETTINGS_ITEM: NavItem = NavItem {
    path: "/settings",
    label: "Ajustes",
};

/// Whether the entry for `path` is highlighted while at `current`.
pub fn is_active(path: &str, current: &str) -> bool {
    if path == MARKETPLACE_ROUTE {
        return current == MARKETPLACE_ROUTE;
    }
    current.starts_with(path)
}

impl NavItem {
    pub fn is_active(&self, current: &str) -> bool {
        is_active(self.path, current)
    }
}
