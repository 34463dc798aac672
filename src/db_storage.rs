use crate::errors::AppError;
use crate::models::{Company, CompanyScores, IndexData, RawMetrics};
use sqlx::PgPool;
use uuid::Uuid;

/// Database storage service for company metrics and scores
pub struct ScoreStorage {
    pool: PgPool,
}

impl ScoreStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load every active company for a recalculation run.
    pub async fn fetch_active_companies(&self) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT *
            FROM companies
            WHERE active = true
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        Ok(companies)
    }

    /// Load one company by id, active or not.
    pub async fn fetch_company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(company)
    }

    /// Build the scoring input from a company row.
    ///
    /// The `index_data` jsonb is decoded tolerantly: a malformed or empty
    /// column behaves like a company whose fetches never ran, which the
    /// scorers already handle as zero-confidence data.
    pub fn raw_metrics_for(company: &Company) -> RawMetrics {
        let index_data: IndexData = match serde_json::from_value(company.index_data.clone()) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(
                    "Malformed index_data for company {} ({}): {}",
                    company.slug,
                    company.id,
                    e
                );
                IndexData::default()
            }
        };

        RawMetrics {
            category: company.category.clone(),
            index_data,
        }
    }

    /// Overwrite a company's persisted scores.
    ///
    /// Scores are replaced wholesale on every run — flat columns for queries
    /// and a jsonb mirror for API reads, both from the same `CompanyScores`.
    pub async fn store_company_scores(
        &self,
        company_id: Uuid,
        scores: &CompanyScores,
    ) -> Result<(), AppError> {
        let scores_json = serde_json::to_value(scores)
            .map_err(|e| AppError::InternalError(format!("Failed to serialize scores: {}", e)))?;

        let result = sqlx::query(
            r#"
            UPDATE companies
            SET overall_score = $2,
                team_health_score = $3,
                community_score = $4,
                adoption_score = $5,
                trend = $6,
                score_confidence = $7,
                scores = $8,
                scored_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(company_id)
        .bind(scores.overall_score)
        .bind(scores.team_health_score)
        .bind(scores.community_score)
        .bind(scores.adoption_score)
        .bind(scores.trend.as_str())
        .bind(scores.confidence)
        .bind(scores_json)
        .execute(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Company {} not found",
                company_id
            )));
        }

        Ok(())
    }

    /// Upsert a company's raw metrics snapshot from the ingestion webhook.
    ///
    /// Known slugs get their `index_data` replaced (and name/category
    /// refreshed when provided); unknown slugs are created, which requires a
    /// name. Returns the company id.
    pub async fn upsert_company_metrics(
        &self,
        slug: &str,
        name: Option<&str>,
        category: Option<&str>,
        index_data: &IndexData,
    ) -> Result<Uuid, AppError> {
        let index_json = serde_json::to_value(index_data).map_err(|e| {
            AppError::InternalError(format!("Failed to serialize index data: {}", e))
        })?;

        let existing =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM companies WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::DatabaseError)?;

        if existing.is_none() && name.is_none() {
            return Err(AppError::BadRequest(format!(
                "Unknown company slug '{}' and no name provided to create it",
                slug
            )));
        }

        let company_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO companies (slug, name, category, index_data, active)
            VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), $4, true)
            ON CONFLICT (slug)
            DO UPDATE SET
                name = COALESCE($2, companies.name),
                category = COALESCE($3, companies.category),
                index_data = EXCLUDED.index_data,
                updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(slug)
        .bind(name)
        .bind(category)
        .bind(index_json)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        tracing::info!("✓ Stored metrics for company {} → {}", slug, company_id);

        Ok(company_id)
    }
}
