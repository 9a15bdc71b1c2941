use magang::config::ReviewerAuthConfig;
use magang::intake::{AuthorizationError, ReviewerCapability, ReviewerPolicy};

/// Grants the reviewer capability to callers presenting the configured
/// static token. With no token configured every request is denied.
pub(crate) struct BearerTokenPolicy {
    token: Option<String>,
}

impl BearerTokenPolicy {
    pub(crate) fn from_config(config: &ReviewerAuthConfig) -> Self {
        Self {
            token: config.admin_token.clone(),
        }
    }
}

impl ReviewerPolicy for BearerTokenPolicy {
    fn authorize(
        &self,
        credential: Option<&str>,
    ) -> Result<ReviewerCapability, AuthorizationError> {
        match (self.token.as_deref(), credential) {
            (Some(expected), Some(presented)) if expected == presented => {
                Ok(ReviewerCapability::granted())
            }
            _ => Err(AuthorizationError),
        }
    }
}
