use sqlx::PgPool;

pub(crate) struct SeedPosition {
    pub(crate) title: &'static str,
    pub(crate) slug: &'static str,
    pub(crate) description: &'static str,
    pub(crate) requirements: &'static str,
}

/// The catalog the careers site launched with, keyed by the slugs the
/// frontend maps to icons.
pub(crate) const DEFAULT_POSITIONS: [SeedPosition; 6] = [
    SeedPosition {
        title: "Programmer",
        slug: "programmer",
        description: "Build and maintain client web projects alongside the engineering team.",
        requirements: "Familiar with Git, Comfortable with HTML/CSS/JS, Able to read documentation in English",
    },
    SeedPosition {
        title: "Content Creator",
        slug: "content-creator",
        description: "Plan and produce written and visual content for client campaigns.",
        requirements: "Strong writing skills, Basic design sense, Active on social platforms",
    },
    SeedPosition {
        title: "Video Editor",
        slug: "video-editor",
        description: "Cut and polish short-form and campaign videos.",
        requirements: "Experience with an editing suite, Sense of pacing, Portfolio of edits",
    },
    SeedPosition {
        title: "Digital Marketing",
        slug: "digital-marketing",
        description: "Run and measure paid and organic campaigns for clients.",
        requirements: "Analytical mindset, Familiar with ad platforms, Comfortable with spreadsheets",
    },
    SeedPosition {
        title: "SEO Specialist",
        slug: "seo-specialist",
        description: "Improve client search visibility through content and technical audits.",
        requirements: "Understands on-page SEO, Familiar with search tooling, Writes clear reports",
    },
    SeedPosition {
        title: "UI/UX Designer",
        slug: "ui-ux-designer",
        description: "Design interfaces and flows for client web projects.",
        requirements: "Portfolio of interface work, Familiar with a design tool, Attention to detail",
    },
];

/// Upsert by slug so reruns leave an already-seeded catalog unchanged.
pub(crate) async fn seed_positions(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for position in DEFAULT_POSITIONS.iter() {
        let result = sqlx::query(
            "INSERT INTO positions (title, slug, description, requirements) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (slug) DO NOTHING",
        )
        .bind(position.title)
        .bind(position.slug)
        .bind(position.description)
        .bind(position.requirements)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}
