//! Traits for the current-user collaborator.

use super::User;

/// Source of the currently signed-in user.
///
/// Consumers read the user at the moment they need it; they never cache it.
pub trait UserProvider: Send + Sync {
    /// The signed-in user, or `None` when unauthenticated.
    fn current_user(&self) -> Option<User>;

    /// End the current session.
    fn sign_out(&self);
}
