/// Supplies the value of the `X-User-Id` header.
///
/// There is no login flow yet; a real session-backed provider replaces
/// [`StaticIdentity`] once one exists.
pub trait IdentityProvider: Send + Sync {
    fn user_id(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn user_id(&self) -> String {
        self.user_id.clone()
    }
}
