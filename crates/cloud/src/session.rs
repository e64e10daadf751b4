use async_trait::async_trait;
use legalguard_core::CurrentUser;
use tokio::sync::watch;

use crate::error::AuthError;

/// Supplies the authenticated user, if any, and announces changes.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The user signed in right now, or `None`.
    async fn current_user(&self) -> Result<Option<CurrentUser>, AuthError>;

    /// Receiver that observes every sign-in and sign-out.
    ///
    /// Long-lived front ends hand this to the history synchronizer so the
    /// merged view is rebuilt when the user changes.
    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>>;
}

/// Identity fixed by the caller. Used offline and in tests.
#[derive(Debug)]
pub struct StaticSession {
    tx: watch::Sender<Option<CurrentUser>>,
}

impl StaticSession {
    #[must_use]
    pub fn signed_out() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn signed_in(user: CurrentUser) -> Self {
        Self::new(Some(user))
    }

    fn new(user: Option<CurrentUser>) -> Self {
        let (tx, _rx) = watch::channel(user);
        Self { tx }
    }

    /// Replace the identity and notify subscribers.
    pub fn set_user(&self, user: Option<CurrentUser>) {
        self.tx.send_replace(user);
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn current_user(&self) -> Result<Option<CurrentUser>, AuthError> {
        Ok(self.tx.borrow().clone())
    }

    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.tx.subscribe()
    }
}
