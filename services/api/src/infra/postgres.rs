use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use magang::intake::{
    Application, ApplicationId, ApplicationStatus, ApplicationStore, ApplicationSummary,
    CandidateApplication, Position, PositionId, StatusCounts, StatusFilter, StoreError,
};

/// Postgres-backed record store. The database owns row identity, creation
/// timestamps, the initial `pending` status, and the unique index on email.
pub(crate) struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const APPLICATION_COLUMNS: &str =
    "id, position_id, full_name, email, phone, school_university, major, cv_url, motivation, \
     status, created_at";

#[derive(FromRow)]
struct ApplicationRow {
    id: Uuid,
    position_id: Uuid,
    full_name: String,
    email: String,
    phone: String,
    school_university: String,
    major: String,
    cv_url: String,
    motivation: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_application(self) -> Result<Application, StoreError> {
        let status = ApplicationStatus::from_label(&self.status).ok_or_else(|| {
            StoreError::Unavailable(format!("unrecognized status '{}' in store", self.status))
        })?;
        Ok(Application {
            id: ApplicationId(self.id),
            position_id: PositionId(self.position_id),
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            school_university: self.school_university,
            major: self.major,
            cv_url: self.cv_url,
            motivation: self.motivation,
            status,
            created_at: self.created_at,
        })
    }
}

#[derive(FromRow)]
struct SummaryRow {
    id: Uuid,
    position_id: Uuid,
    full_name: String,
    email: String,
    phone: String,
    school_university: String,
    major: String,
    cv_url: String,
    motivation: String,
    status: String,
    created_at: DateTime<Utc>,
    position_title: String,
}

impl SummaryRow {
    fn into_summary(self) -> Result<ApplicationSummary, StoreError> {
        let row = ApplicationRow {
            id: self.id,
            position_id: self.position_id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            school_university: self.school_university,
            major: self.major,
            cv_url: self.cv_url,
            motivation: self.motivation,
            status: self.status,
            created_at: self.created_at,
        };
        Ok(ApplicationSummary {
            application: row.into_application()?,
            position_title: self.position_title,
        })
    }
}

#[derive(FromRow)]
struct PositionRow {
    id: Uuid,
    title: String,
    slug: String,
    description: String,
    requirements: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<PositionRow> for Position {
    fn from(row: PositionRow) -> Self {
        Position {
            id: PositionId(row.id),
            title: row.title,
            slug: row.slug,
            description: row.description,
            requirements: row.requirements,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn insert_application(
        &self,
        candidate: CandidateApplication,
    ) -> Result<Application, StoreError> {
        let sql = format!(
            "INSERT INTO applications \
             (position_id, full_name, email, phone, school_university, major, cv_url, motivation) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(candidate.position_id.0)
            .bind(&candidate.full_name)
            .bind(&candidate.email)
            .bind(&candidate.phone)
            .bind(&candidate.school_university)
            .bind(&candidate.major)
            .bind(&candidate.cv_url)
            .bind(&candidate.motivation)
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_error)?;
        row.into_application()
    }

    async fn list_applications(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<ApplicationSummary>, StoreError> {
        let base = "SELECT a.id, a.position_id, a.full_name, a.email, a.phone, \
                    a.school_university, a.major, a.cv_url, a.motivation, a.status, \
                    a.created_at, p.title AS position_title \
                    FROM applications a JOIN positions p ON p.id = a.position_id";

        let rows = match filter.only() {
            Some(status) => {
                let sql = format!("{base} WHERE a.status = $1 ORDER BY a.created_at DESC");
                sqlx::query_as::<_, SummaryRow>(&sql)
                    .bind(status.label())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!("{base} ORDER BY a.created_at DESC");
                sqlx::query_as::<_, SummaryRow>(&sql)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(store_unavailable)?;

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, StoreError> {
        let sql = format!(
            "UPDATE applications SET status = $2 WHERE id = $1 RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id.0)
            .bind(status.label())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_unavailable)?
            .ok_or(StoreError::NotFound)?;
        row.into_application()
    }

    async fn status_counts(&self) -> Result<StatusCounts, StoreError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM applications GROUP BY status")
                .fetch_all(&self.pool)
                .await
                .map_err(store_unavailable)?;

        let mut counts = StatusCounts::default();
        for (label, count) in rows {
            let status = ApplicationStatus::from_label(&label).ok_or_else(|| {
                StoreError::Unavailable(format!("unrecognized status '{label}' in store"))
            })?;
            counts.bump(status, count.max(0) as u64);
        }
        Ok(counts)
    }

    async fn position(&self, id: PositionId) -> Result<Option<Position>, StoreError> {
        let row = sqlx::query_as::<_, PositionRow>(
            "SELECT id, title, slug, description, requirements, is_active, created_at \
             FROM positions WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_unavailable)?;
        Ok(row.map(Position::from))
    }

    async fn active_positions(&self) -> Result<Vec<Position>, StoreError> {
        let rows = sqlx::query_as::<_, PositionRow>(
            "SELECT id, title, slug, description, requirements, is_active, created_at \
             FROM positions WHERE is_active ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_unavailable)?;
        Ok(rows.into_iter().map(Position::from).collect())
    }
}

fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return StoreError::DuplicateEmail;
        }
    }
    store_unavailable(err)
}

fn store_unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}
