//! Session state: who is signed in.

use tracing::{error, info};

use crate::error::CatalogError;
use crate::gateway::DogCatalog;
use crate::models::{Credentials, User};

/// Inline message shown by the login form when the remote login fails.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

/// The authenticated identity, if any. At most one user is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current identity unconditionally.
    pub fn login(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Clear the current identity, returning the user who was signed in.
    pub fn logout(&mut self) -> Option<User> {
        self.user.take()
    }

    /// The signed-in user, or `None` when unauthenticated.
    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Log in against the remote service and return the user to store in [`Session`].
///
/// The session itself is not touched here, so a failed login leaves it exactly
/// as it was.
pub async fn authenticate<C: DogCatalog>(
    catalog: &C,
    credentials: Credentials,
) -> Result<User, CatalogError> {
    match catalog.login(&credentials).await {
        Ok(()) => {
            info!("Signed in as {}", credentials.email);
            Ok(credentials.into_user())
        }
        Err(e) => {
            error!("Login failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Operation;
    use crate::memory::{Call, MemoryCatalog};

    #[test]
    fn test_login_replaces_identity() {
        let mut session = Session::new();
        assert!(session.current().is_none());

        session.login(Credentials::new("Ada", "ada@example.com").into_user());
        session.login(Credentials::new("Grace", "grace@example.com").into_user());

        assert_eq!(session.current().unwrap().name, "Grace");
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_identity() {
        let mut session = Session::new();
        session.login(Credentials::new("Ada", "ada@example.com").into_user());

        let previous = session.logout();
        assert_eq!(previous.unwrap().email, "ada@example.com");
        assert!(!session.is_authenticated());
        assert!(session.logout().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_returns_user_on_success() {
        let catalog = MemoryCatalog::new();
        let user = authenticate(&catalog, Credentials::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        assert_eq!(user.name, "Ada");
        assert!(user.token.is_empty());
        assert_eq!(
            catalog.calls(),
            vec![Call::Login(Credentials::new("Ada", "ada@example.com"))]
        );
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_unchanged() {
        let catalog = MemoryCatalog::new();
        catalog.fail(Operation::Login, 401);
        let mut session = Session::new();

        let result = authenticate(&catalog, Credentials::new("Ada", "ada@example.com")).await;
        if let Ok(user) = result.clone() {
            session.login(user);
        }

        assert_eq!(result, Err(CatalogError::status(Operation::Login, 401)));
        assert!(session.current().is_none());
        assert_eq!(LOGIN_FAILED_MESSAGE, "Login failed. Please check your credentials.");
    }

    #[tokio::test]
    async fn test_remote_logout_failure_does_not_block_local_logout() {
        let catalog = MemoryCatalog::new();
        catalog.fail(Operation::Logout, 500);
        let mut session = Session::new();
        session.login(Credentials::new("Ada", "ada@example.com").into_user());

        assert!(catalog.logout().await.is_err());
        session.logout();

        assert_eq!(catalog.calls(), vec![Call::Logout]);
        assert!(!session.is_authenticated());
    }
}
