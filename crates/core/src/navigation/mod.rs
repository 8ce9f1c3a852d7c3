//! Navigation module - sidebar menu, active-route matching and the
//! headless sidebar state (collapse, mobile drawer, logout confirmation).

mod navigation_model;
mod navigation_traits;
mod sidebar;

// Re-export the public interface
pub use navigation_model::{is_active, NavItem, MAIN_MENU, SETTINGS_ITEM};
pub use navigation_traits::Navigator;
pub use sidebar::{SidebarHeader, SidebarState};
