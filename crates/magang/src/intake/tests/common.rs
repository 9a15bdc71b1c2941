use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::intake::auth::{AuthorizationError, ReviewerCapability, ReviewerPolicy};
use crate::intake::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationSummary, CandidateApplication,
    Position, PositionId, StatusCounts, StatusFilter, SubmissionForm,
};
use crate::intake::repository::{
    ApplicationNotice, ApplicationStore, NotificationPublisher, NotifyError, StoreError,
};
use crate::intake::router::intake_router;
use crate::intake::service::IntakeService;

pub(super) const REVIEWER_TOKEN: &str = "reviewer-secret";

pub(super) fn programmer_position() -> Position {
    Position {
        id: PositionId(Uuid::from_u128(0x11)),
        title: "Programmer".to_string(),
        slug: "programmer".to_string(),
        description: "Build and maintain client web projects.".to_string(),
        requirements: "Familiar with Git, Comfortable reading documentation".to_string(),
        is_active: true,
        created_at: Utc
            .with_ymd_and_hms(2025, 1, 10, 8, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn retired_designer_position() -> Position {
    Position {
        id: PositionId(Uuid::from_u128(0x22)),
        title: "UI/UX Designer".to_string(),
        slug: "ui-ux-designer".to_string(),
        description: "Design interfaces for client projects.".to_string(),
        requirements: "Portfolio of interface work".to_string(),
        is_active: false,
        created_at: Utc
            .with_ymd_and_hms(2025, 1, 12, 8, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn jane_form(position: &Position) -> SubmissionForm {
    form_for("Jane Doe", "jane@example.com", position)
}

pub(super) fn form_for(name: &str, email: &str, position: &Position) -> SubmissionForm {
    SubmissionForm {
        full_name: name.to_string(),
        email: email.to_string(),
        phone: "081234567890".to_string(),
        school_university: "Universitas Gadjah Mada".to_string(),
        major: "Computer Science".to_string(),
        position_id: position.id.0.to_string(),
        cv_url: "https://drive.google.com/jane-cv".to_string(),
        motivation: "Eager to learn production web development.".to_string(),
    }
}

pub(super) fn reviewer() -> ReviewerCapability {
    ReviewerCapability::granted()
}

struct StoredApplication {
    application: Application,
    seq: u64,
}

/// In-memory stand-in honoring the store contract, including email
/// uniqueness enforced inside `insert_application` rather than by callers.
pub(super) struct MemoryStore {
    positions: Vec<Position>,
    records: Mutex<Vec<StoredApplication>>,
    sequence: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_positions(vec![programmer_position(), retired_designer_position()])
    }
}

impl MemoryStore {
    pub(super) fn with_positions(positions: Vec<Position>) -> Self {
        Self {
            positions,
            records: Mutex::new(Vec::new()),
            sequence: AtomicU64::new(1),
        }
    }

    pub(super) fn application_count(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }

    pub(super) fn get(&self, id: ApplicationId) -> Option<Application> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .find(|stored| stored.application.id == id)
            .map(|stored| stored.application.clone())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn insert_application(
        &self,
        candidate: CandidateApplication,
    ) -> Result<Application, StoreError> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        if records
            .iter()
            .any(|stored| stored.application.email == candidate.email)
        {
            return Err(StoreError::DuplicateEmail);
        }

        let application = Application {
            id: ApplicationId(Uuid::new_v4()),
            position_id: candidate.position_id,
            full_name: candidate.full_name,
            email: candidate.email,
            phone: candidate.phone,
            school_university: candidate.school_university,
            major: candidate.major,
            cv_url: candidate.cv_url,
            motivation: candidate.motivation,
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        };
        records.push(StoredApplication {
            application: application.clone(),
            seq: self.sequence.fetch_add(1, Ordering::Relaxed),
        });
        Ok(application)
    }

    async fn list_applications(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<ApplicationSummary>, StoreError> {
        let records = self.records.lock().expect("store mutex poisoned");
        let mut matching: Vec<(&StoredApplication, String)> = records
            .iter()
            .filter(|stored| filter.matches(stored.application.status))
            .map(|stored| {
                let title = self
                    .positions
                    .iter()
                    .find(|position| position.id == stored.application.position_id)
                    .map(|position| position.title.clone())
                    .expect("referenced position exists");
                (stored, title)
            })
            .collect();
        // Sequence breaks created_at ties so ordering stays deterministic.
        matching.sort_by(|(a, _), (b, _)| {
            (b.application.created_at, b.seq).cmp(&(a.application.created_at, a.seq))
        });
        Ok(matching
            .into_iter()
            .map(|(stored, position_title)| ApplicationSummary {
                application: stored.application.clone(),
                position_title,
            })
            .collect())
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, StoreError> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        let stored = records
            .iter_mut()
            .find(|stored| stored.application.id == id)
            .ok_or(StoreError::NotFound)?;
        stored.application.status = status;
        Ok(stored.application.clone())
    }

    async fn status_counts(&self) -> Result<StatusCounts, StoreError> {
        let records = self.records.lock().expect("store mutex poisoned");
        let mut counts = StatusCounts::default();
        for stored in records.iter() {
            counts.bump(stored.application.status, 1);
        }
        Ok(counts)
    }

    async fn position(&self, id: PositionId) -> Result<Option<Position>, StoreError> {
        Ok(self
            .positions
            .iter()
            .find(|position| position.id == id)
            .cloned())
    }

    async fn active_positions(&self) -> Result<Vec<Position>, StoreError> {
        let mut active: Vec<Position> = self
            .positions
            .iter()
            .filter(|position| position.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(active)
    }
}

/// Store double that reports the persistence layer as unreachable.
pub(super) struct UnavailableStore;

#[async_trait]
impl ApplicationStore for UnavailableStore {
    async fn insert_application(
        &self,
        _candidate: CandidateApplication,
    ) -> Result<Application, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn list_applications(
        &self,
        _filter: StatusFilter,
    ) -> Result<Vec<ApplicationSummary>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn update_status(
        &self,
        _id: ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<Application, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn status_counts(&self) -> Result<StatusCounts, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn position(&self, _id: PositionId) -> Result<Option<Position>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn active_positions(&self) -> Result<Vec<Position>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    notices: Mutex<Vec<ApplicationNotice>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<ApplicationNotice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl NotificationPublisher for MemoryNotifier {
    async fn publish(&self, notice: ApplicationNotice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

#[async_trait]
impl NotificationPublisher for FailingNotifier {
    async fn publish(&self, _notice: ApplicationNotice) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("webhook unreachable".to_string()))
    }
}

/// Policy double granting the capability only for one fixed token.
pub(super) struct TokenPolicy {
    token: &'static str,
}

impl TokenPolicy {
    pub(super) fn new(token: &'static str) -> Self {
        Self { token }
    }
}

impl ReviewerPolicy for TokenPolicy {
    fn authorize(
        &self,
        credential: Option<&str>,
    ) -> Result<ReviewerCapability, AuthorizationError> {
        match credential {
            Some(presented) if presented == self.token => Ok(ReviewerCapability::granted()),
            _ => Err(AuthorizationError),
        }
    }
}

pub(super) fn build_service() -> (
    Arc<IntakeService<MemoryStore, MemoryNotifier>>,
    Arc<MemoryStore>,
    Arc<MemoryNotifier>,
) {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = Arc::new(IntakeService::new(store.clone(), notifier.clone()));
    (service, store, notifier)
}

pub(super) fn build_router() -> (axum::Router, Arc<MemoryStore>, Arc<MemoryNotifier>) {
    let (service, store, notifier) = build_service();
    let router = intake_router(service, Arc::new(TokenPolicy::new(REVIEWER_TOKEN)));
    (router, store, notifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
