use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for persisted applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub Uuid);

/// Identifier wrapper for internship positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(pub Uuid);

/// Lifecycle tag tracked on every application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Inverse of [`label`](Self::label), used when decoding stored rows.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(ApplicationStatus::Pending),
            "reviewed" => Some(ApplicationStatus::Reviewed),
            "accepted" => Some(ApplicationStatus::Accepted),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// Listing narrowing requested by a reviewer. The predicate is pushed down to
/// the store rather than applied over a full-table fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl StatusFilter {
    /// The single status this filter narrows to, or `None` for `All`.
    pub fn only(self) -> Option<ApplicationStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(ApplicationStatus::Pending),
            StatusFilter::Reviewed => Some(ApplicationStatus::Reviewed),
            StatusFilter::Accepted => Some(ApplicationStatus::Accepted),
            StatusFilter::Rejected => Some(ApplicationStatus::Rejected),
        }
    }

    pub fn matches(self, status: ApplicationStatus) -> bool {
        self.only().map_or(true, |only| only == status)
    }
}

/// An internship role offered on the careers site. Read-only from the intake
/// service's perspective; the catalog is maintained out of band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub title: String,
    /// Stable identifier the frontend uses for icon/category lookup.
    pub slug: String,
    pub description: String,
    /// Comma-delimited requirement phrases; see [`requirement_list`](Self::requirement_list).
    pub requirements: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Position {
    pub fn requirement_list(&self) -> Vec<&str> {
        self.requirements
            .split(',')
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty())
            .collect()
    }
}

/// A persisted candidate submission. Every field except `status` is immutable
/// after creation; `id`, `status`, and `created_at` are store-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub position_id: PositionId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub school_university: String,
    pub major: String,
    pub cv_url: String,
    pub motivation: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Review-listing row: the application joined with its position's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSummary {
    #[serde(flatten)]
    pub application: Application,
    pub position_title: String,
}

/// Per-status cardinalities backing the dashboard header cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub total: u64,
    pub pending: u64,
    pub reviewed: u64,
    pub accepted: u64,
    pub rejected: u64,
}

impl StatusCounts {
    pub fn bump(&mut self, status: ApplicationStatus, count: u64) {
        self.total += count;
        match status {
            ApplicationStatus::Pending => self.pending += count,
            ApplicationStatus::Reviewed => self.reviewed += count,
            ApplicationStatus::Accepted => self.accepted += count,
            ApplicationStatus::Rejected => self.rejected += count,
        }
    }
}

/// Raw payload collected by the public application form. Fields default to
/// empty so absent keys surface as field-level validation faults instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub school_university: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub position_id: String,
    #[serde(default)]
    pub cv_url: String,
    #[serde(default)]
    pub motivation: String,
}

/// A submission that cleared validation and is ready for a single atomic
/// insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateApplication {
    pub position_id: PositionId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub school_university: String,
    pub major: String,
    pub cv_url: String,
    pub motivation: String,
}
