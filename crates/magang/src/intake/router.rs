use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::auth::{ReviewerCapability, ReviewerPolicy};
use super::domain::{ApplicationId, ApplicationStatus, StatusFilter, SubmissionForm};
use super::repository::{ApplicationStore, NotificationPublisher};
use super::service::{IntakeError, IntakeService};

/// Shared state for the intake routes: the service facade plus the reviewer
/// policy gating the moderation surface.
pub struct IntakeRouterState<S, N> {
    pub service: Arc<IntakeService<S, N>>,
    pub policy: Arc<dyn ReviewerPolicy>,
}

impl<S, N> Clone for IntakeRouterState<S, N> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            policy: Arc::clone(&self.policy),
        }
    }
}

/// Router builder exposing the public submission surface and the
/// reviewer-gated moderation surface.
pub fn intake_router<S, N>(
    service: Arc<IntakeService<S, N>>,
    policy: Arc<dyn ReviewerPolicy>,
) -> Router
where
    S: ApplicationStore + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            post(submit_handler::<S, N>).get(list_handler::<S, N>),
        )
        .route(
            "/api/v1/applications/summary",
            get(summary_handler::<S, N>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            patch(update_status_handler::<S, N>),
        )
        .route("/api/v1/positions", get(positions_handler::<S, N>))
        .with_state(IntakeRouterState { service, policy })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) status: StatusFilter,
}

/// Target status for a moderation move. Constraining the value to the enum
/// here means out-of-range statuses never reach the service.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusChange {
    pub(crate) status: ApplicationStatus,
}

pub(crate) async fn submit_handler<S, N>(
    State(state): State<IntakeRouterState<S, N>>,
    Json(form): Json<SubmissionForm>,
) -> Response
where
    S: ApplicationStore + 'static,
    N: NotificationPublisher + 'static,
{
    match state.service.submit(form).await {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(err) => intake_error_response(err),
    }
}

pub(crate) async fn list_handler<S, N>(
    State(state): State<IntakeRouterState<S, N>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response
where
    S: ApplicationStore + 'static,
    N: NotificationPublisher + 'static,
{
    let reviewer = match authorize(&state, &headers) {
        Ok(capability) => capability,
        Err(response) => return response,
    };

    match state.service.list(reviewer, query.status).await {
        Ok(summaries) => (StatusCode::OK, Json(summaries)).into_response(),
        Err(err) => intake_error_response(err),
    }
}

pub(crate) async fn summary_handler<S, N>(
    State(state): State<IntakeRouterState<S, N>>,
    headers: HeaderMap,
) -> Response
where
    S: ApplicationStore + 'static,
    N: NotificationPublisher + 'static,
{
    let reviewer = match authorize(&state, &headers) {
        Ok(capability) => capability,
        Err(response) => return response,
    };

    match state.service.status_counts(reviewer).await {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(err) => intake_error_response(err),
    }
}

pub(crate) async fn update_status_handler<S, N>(
    State(state): State<IntakeRouterState<S, N>>,
    headers: HeaderMap,
    Path(application_id): Path<Uuid>,
    Json(change): Json<StatusChange>,
) -> Response
where
    S: ApplicationStore + 'static,
    N: NotificationPublisher + 'static,
{
    let reviewer = match authorize(&state, &headers) {
        Ok(capability) => capability,
        Err(response) => return response,
    };

    match state
        .service
        .update_status(reviewer, ApplicationId(application_id), change.status)
        .await
    {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(err) => intake_error_response(err),
    }
}

pub(crate) async fn positions_handler<S, N>(
    State(state): State<IntakeRouterState<S, N>>,
) -> Response
where
    S: ApplicationStore + 'static,
    N: NotificationPublisher + 'static,
{
    match state.service.open_positions().await {
        Ok(positions) => (StatusCode::OK, Json(positions)).into_response(),
        Err(err) => intake_error_response(err),
    }
}

fn authorize<S, N>(
    state: &IntakeRouterState<S, N>,
    headers: &HeaderMap,
) -> Result<ReviewerCapability, Response> {
    state.policy.authorize(bearer_token(headers)).map_err(|err| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response()
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn intake_error_response(err: IntakeError) -> Response {
    match err {
        IntakeError::Validation(error) => {
            let payload = json!({
                "error": error.to_string(),
                "fields": error.faults,
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        IntakeError::DuplicateEmail => {
            let payload = json!({ "error": "this email is already registered" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        IntakeError::NotFound => {
            let payload = json!({ "error": "application not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        IntakeError::StoreUnavailable(detail) => {
            tracing::error!(%detail, "store unavailable");
            let payload = json!({ "error": "storage temporarily unavailable" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
