use std::sync::Arc;

use tracing::{info, warn};

use super::auth::ReviewerCapability;
use super::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationSummary, Position, StatusCounts,
    StatusFilter, SubmissionForm,
};
use super::repository::{ApplicationNotice, ApplicationStore, NotificationPublisher, StoreError};
use super::validate::{screen_submission, ValidationError};

/// Service composing the validation guard, the record store, and the
/// notification hook. Holds no per-request state; every read goes back to
/// the store.
pub struct IntakeService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> IntakeService<S, N>
where
    S: ApplicationStore + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    /// Validate and persist one submission, then raise the best-effort
    /// "new application" notice.
    ///
    /// The position is resolved before the insert both to check referential
    /// validity and to carry its title into the notice. Duplicate emails are
    /// detected by the store's unique index and surface as
    /// [`IntakeError::DuplicateEmail`] without a retry.
    pub async fn submit(&self, form: SubmissionForm) -> Result<Application, IntakeError> {
        let candidate = screen_submission(form)?;

        let position = self
            .store
            .position(candidate.position_id)
            .await
            .map_err(IntakeError::from_store)?
            .ok_or_else(ValidationError::unknown_position)?;

        let stored = self
            .store
            .insert_application(candidate)
            .await
            .map_err(IntakeError::from_store)?;

        info!(
            application = %stored.id.0,
            position = %position.slug,
            "application received"
        );

        let notice = ApplicationNotice::for_application(&stored, &position.title);
        if let Err(err) = self.notifier.publish(notice).await {
            warn!(application = %stored.id.0, error = %err, "new-application notice dropped");
        }

        Ok(stored)
    }

    /// Applications for review, optionally narrowed by status, newest first.
    pub async fn list(
        &self,
        _reviewer: ReviewerCapability,
        filter: StatusFilter,
    ) -> Result<Vec<ApplicationSummary>, IntakeError> {
        self.store
            .list_applications(filter)
            .await
            .map_err(IntakeError::from_store)
    }

    /// Reassign an application's status. Any of the four statuses may be
    /// chosen regardless of the current one; only the status field changes.
    pub async fn update_status(
        &self,
        _reviewer: ReviewerCapability,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, IntakeError> {
        let updated = self
            .store
            .update_status(id, status)
            .await
            .map_err(IntakeError::from_store)?;
        info!(application = %updated.id.0, status = status.label(), "application status updated");
        Ok(updated)
    }

    /// Per-status counts backing the dashboard header cards.
    pub async fn status_counts(
        &self,
        _reviewer: ReviewerCapability,
    ) -> Result<StatusCounts, IntakeError> {
        self.store
            .status_counts()
            .await
            .map_err(IntakeError::from_store)
    }

    /// Active positions offered to new applicants.
    pub async fn open_positions(&self) -> Result<Vec<Position>, IntakeError> {
        self.store
            .active_positions()
            .await
            .map_err(IntakeError::from_store)
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("this email is already registered")]
    DuplicateEmail,
    #[error("application not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl IntakeError {
    fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => IntakeError::DuplicateEmail,
            StoreError::NotFound => IntakeError::NotFound,
            StoreError::Unavailable(detail) => IntakeError::StoreUnavailable(detail),
        }
    }
}
