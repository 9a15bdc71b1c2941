//! Internship application intake and review.
//!
//! The module is organized around three seams: an [`ApplicationStore`] owning
//! every persisted row, a [`NotificationPublisher`] receiving the best-effort
//! "new application" event, and a [`ReviewerPolicy`] gating the moderation
//! surface. [`IntakeService`] composes the three behind the HTTP router.

pub mod auth;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validate;

#[cfg(test)]
mod tests;

pub use auth::{AuthorizationError, ReviewerCapability, ReviewerPolicy};
pub use domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationSummary, CandidateApplication,
    Position, PositionId, StatusCounts, StatusFilter, SubmissionForm,
};
pub use repository::{
    ApplicationNotice, ApplicationStore, NotificationPublisher, NotifyError, StoreError,
};
pub use router::intake_router;
pub use service::{IntakeError, IntakeService};
pub use validate::{screen_submission, FieldFault, FieldProblem, ValidationError};
