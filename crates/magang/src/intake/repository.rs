use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationSummary, CandidateApplication,
    Position, PositionId, StatusCounts, StatusFilter,
};

/// Storage abstraction so the service module can run against Postgres in
/// production and an in-memory double in tests.
///
/// The store owns every durable invariant: it assigns `id`, `created_at`,
/// and the initial `pending` status on insert, and it must enforce email
/// uniqueness itself (a unique index, not a check-then-insert in calling
/// code).
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Single atomic insert of a validated candidate.
    async fn insert_application(
        &self,
        candidate: CandidateApplication,
    ) -> Result<Application, StoreError>;

    /// Applications joined with their position title, newest first, with the
    /// status predicate applied store-side.
    async fn list_applications(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<ApplicationSummary>, StoreError>;

    /// Reassign the status of one application, leaving every other field
    /// untouched. Unknown ids report [`StoreError::NotFound`].
    async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, StoreError>;

    async fn status_counts(&self) -> Result<StatusCounts, StoreError>;

    async fn position(&self, id: PositionId) -> Result<Option<Position>, StoreError>;

    /// The catalog offered to new applicants: active positions only.
    async fn active_positions(&self) -> Result<Vec<Position>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook receiving the "new application" event. Delivery is best
/// effort; implementations must not retry on behalf of the service.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(&self, notice: ApplicationNotice) -> Result<(), NotifyError>;
}

/// Payload handed to the notification collaborator when a submission lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationNotice {
    pub applicant_name: String,
    pub applicant_email: String,
    pub phone: String,
    pub school: String,
    pub position: String,
}

impl ApplicationNotice {
    pub fn for_application(application: &Application, position_title: &str) -> Self {
        Self {
            applicant_name: application.full_name.clone(),
            applicant_email: application.email.clone(),
            phone: application.phone.clone(),
            school: application.school_university.clone(),
            position: position_title.to_string(),
        }
    }

    /// Human-readable digest used by log and mail-style sinks.
    pub fn digest(&self) -> String {
        format!(
            "New internship application\n\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             School/University: {}\n\
             Position: {}\n\n\
             Open the admin dashboard for the full record.",
            self.applicant_name, self.applicant_email, self.phone, self.school, self.position
        )
    }
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
