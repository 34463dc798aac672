use crate::errors::AppError;
use crate::models::{Company, RankedCompany};
use sqlx::PgPool;
use uuid::Uuid;

/// Read-side query service for company records.
pub struct CompanyService {
    pool: PgPool,
}

impl CompanyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a company by its internal UUID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(company)
    }

    /// Find a company by its slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(company)
    }

    /// Ranked listing of scored companies, best overall score first.
    ///
    /// Companies that have never been scored are excluded; ties break on
    /// confidence, then name for a stable ordering.
    pub async fn list_top(&self, limit: i64) -> Result<Vec<RankedCompany>, AppError> {
        let rows = sqlx::query_as::<_, Company>(
            r#"
            SELECT *
            FROM companies
            WHERE active = true AND overall_score IS NOT NULL
            ORDER BY overall_score DESC, score_confidence DESC NULLS LAST, name ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        let ranked = rows
            .into_iter()
            .map(|c| RankedCompany {
                id: c.id,
                name: c.name,
                slug: c.slug,
                category: c.category,
                overall_score: c.overall_score.unwrap_or(0),
                trend: c.trend,
                confidence: c.score_confidence,
            })
            .collect();

        Ok(ranked)
    }
}
