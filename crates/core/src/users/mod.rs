//! Users module - signed-in user model and session provider.

mod session;
mod users_model;
mod users_traits;

// Re-export the public interface
pub use session::{SessionSnapshot, SessionStore};
pub use users_model::{Role, User};
pub use users_traits::UserProvider;
