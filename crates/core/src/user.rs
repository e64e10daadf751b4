use serde::{Deserialize, Serialize};

/// The authenticated user as seen by the stores.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: Option<String>,
    /// Bearer token for the hosted service.
    pub access_token: String,
}

impl std::fmt::Debug for CurrentUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("access_token", &"***")
            .finish()
    }
}
