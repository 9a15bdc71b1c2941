/// Proof that a caller cleared the reviewer check. Review operations take
/// one as a parameter instead of consulting any ambient session state, so
/// the identity provider stays swappable.
#[derive(Debug, Clone, Copy)]
pub struct ReviewerCapability(());

impl ReviewerCapability {
    /// Minted by [`ReviewerPolicy`] implementations once a credential has
    /// been verified.
    pub fn granted() -> Self {
        Self(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("reviewer capability required")]
pub struct AuthorizationError;

/// Capability check delegated to the surrounding identity collaborator.
/// Rejection happens before any store access is attempted.
pub trait ReviewerPolicy: Send + Sync {
    fn authorize(
        &self,
        credential: Option<&str>,
    ) -> Result<ReviewerCapability, AuthorizationError>;
}
