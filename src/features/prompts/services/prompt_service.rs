use chrono::Utc;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::prompts::dtos::{
    CreatePromptDto, PromptQueryParams, PromptResponseDto, UpdatePromptDto,
};
use crate::features::prompts::models::Prompt;
use crate::shared::constants::DEL_FLAG_LIVE;

const COLUMNS: &str =
    "id, content, enabled, create_by, create_time, update_by, update_time, del_flag, remark";

/// Service for prompt record operations.
///
/// Every read and every soft-delete statement goes through
/// `live_predicate()`, so the exclusion of soft-deleted rows is decided in
/// one place rather than per call site. Mutations run inside explicit
/// transactions; an error on any path drops the transaction and rolls back.
pub struct PromptService {
    pool: PgPool,
}

impl PromptService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The predicate selecting live (not soft-deleted) rows.
    fn live_predicate() -> String {
        format!("del_flag = '{}'", DEL_FLAG_LIVE)
    }

    /// del_flag value stamped at soft-delete time.
    fn next_del_flag() -> String {
        Utc::now().timestamp_millis().to_string()
    }

    /// List live prompts matching the filter, paginated, oldest first.
    /// The total counts all matching rows independent of the page window.
    pub async fn list(&self, params: &PromptQueryParams) -> Result<(Vec<PromptResponseDto>, i64)> {
        let where_clause = format!(
            "{} AND ($1::text IS NULL OR content ILIKE '%' || $1 || '%') \
             AND ($2::int4 IS NULL OR enabled = $2)",
            Self::live_predicate()
        );

        let count_query = format!("SELECT COUNT(*) FROM ai_prompt WHERE {}", where_clause);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&params.content)
            .bind(params.enabled)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let query = format!(
            "SELECT {} FROM ai_prompt WHERE {} ORDER BY id LIMIT $3 OFFSET $4",
            COLUMNS, where_clause
        );
        let prompts: Vec<Prompt> = sqlx::query_as(&query)
            .bind(&params.content)
            .bind(params.enabled)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok((
            prompts.into_iter().map(PromptResponseDto::from).collect(),
            total,
        ))
    }

    /// All live prompts matching the filter, unpaginated (export path).
    pub async fn list_all(&self, params: &PromptQueryParams) -> Result<Vec<PromptResponseDto>> {
        let query = format!(
            "SELECT {} FROM ai_prompt WHERE {} \
             AND ($1::text IS NULL OR content ILIKE '%' || $1 || '%') \
             AND ($2::int4 IS NULL OR enabled = $2) \
             ORDER BY id",
            COLUMNS,
            Self::live_predicate()
        );
        let prompts: Vec<Prompt> = sqlx::query_as(&query)
            .bind(&params.content)
            .bind(params.enabled)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(prompts.into_iter().map(PromptResponseDto::from).collect())
    }

    /// Get a live prompt by id.
    pub async fn get_by_id(&self, id: i64) -> Result<PromptResponseDto> {
        let query = format!(
            "SELECT {} FROM ai_prompt WHERE {} AND id = $1",
            COLUMNS,
            Self::live_predicate()
        );
        let prompt: Option<Prompt> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        prompt
            .map(PromptResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Prompt with id {} not found", id)))
    }

    /// Insert a new prompt, stamping the creation audit fields from the
    /// acting principal. Returns the created record.
    pub async fn add(&self, dto: CreatePromptDto, operator: &str) -> Result<PromptResponseDto> {
        let query = format!(
            "INSERT INTO ai_prompt (content, enabled, create_by, create_time, del_flag, remark) \
             VALUES ($1, COALESCE($2::int4, 1), $3, $4, $5, $6) \
             RETURNING {}",
            COLUMNS
        );

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let prompt: Prompt = sqlx::query_as(&query)
            .bind(&dto.content)
            .bind(dto.enabled)
            .bind(operator)
            .bind(Utc::now())
            .bind(DEL_FLAG_LIVE)
            .bind(&dto.remark)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;

        Ok(PromptResponseDto::from(prompt))
    }

    /// Update a live prompt in place, re-stamping the update audit fields.
    /// Returns the affected row count (0 when no live row matches the id);
    /// creation audit fields are never touched.
    pub async fn edit(&self, dto: &UpdatePromptDto, operator: &str) -> Result<u64> {
        let query = format!(
            "UPDATE ai_prompt \
             SET content = COALESCE($1::text, content), \
                 enabled = COALESCE($2::int4, enabled), \
                 remark = COALESCE($3::varchar, remark), \
                 update_by = $4, \
                 update_time = $5 \
             WHERE {} AND id = $6",
            Self::live_predicate()
        );

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let result = sqlx::query(&query)
            .bind(&dto.content)
            .bind(dto.enabled)
            .bind(&dto.remark)
            .bind(operator)
            .bind(Utc::now())
            .bind(dto.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }

    /// Soft-delete a live prompt. The row stays in the table with del_flag
    /// set to the deletion timestamp; the update audit fields are
    /// re-stamped. Returns the affected row count.
    pub async fn remove(&self, id: i64, operator: &str) -> Result<u64> {
        let query = format!(
            "UPDATE ai_prompt SET del_flag = $1, update_by = $2, update_time = $3 \
             WHERE {} AND id = $4",
            Self::live_predicate()
        );

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let result = sqlx::query(&query)
            .bind(Self::next_del_flag())
            .bind(operator)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }

    /// Soft-delete a batch of live prompts in a single statement, so the
    /// batch commits or rolls back as a whole. An empty id list is a no-op
    /// returning 0, not an error.
    pub async fn batch_remove(&self, ids: &[i64], operator: &str) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let query = format!(
            "UPDATE ai_prompt SET del_flag = $1, update_by = $2, update_time = $3 \
             WHERE {} AND id = ANY($4)",
            Self::live_predicate()
        );

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let result = sqlx::query(&query)
            .bind(Self::next_del_flag())
            .bind(operator)
            .bind(Utc::now())
            .bind(ids)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_predicate_uses_sentinel() {
        assert_eq!(PromptService::live_predicate(), "del_flag = '1'");
    }

    #[test]
    fn test_next_del_flag_is_not_live() {
        let flag = PromptService::next_del_flag();
        assert_ne!(flag, DEL_FLAG_LIVE);
        // Timestamp-derived, so it must parse back as a number
        assert!(flag.parse::<i64>().is_ok());
    }
}
