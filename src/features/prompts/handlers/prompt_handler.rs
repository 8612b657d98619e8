use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::audit::{self, BusinessType};
use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{
    RequirePromptAdd, RequirePromptBatchRemove, RequirePromptEdit, RequirePromptExport,
    RequirePromptList, RequirePromptQuery, RequirePromptRemove,
};
use crate::features::prompts::dtos::{
    BatchRemoveDto, CreatePromptDto, PromptQueryParams, PromptResponseDto, UpdatePromptDto,
};
use crate::features::prompts::services::PromptService;
use crate::modules::export::write_sheet;
use crate::shared::types::{ApiResponse, Meta};

/// List prompt records with pagination and filters
#[utoipa::path(
    get,
    path = "/prompt/list",
    params(PromptQueryParams),
    responses(
        (status = 200, description = "Prompt records retrieved successfully", body = ApiResponse<Vec<PromptResponseDto>>),
        (status = 403, description = "Missing prompt:list permission")
    ),
    tag = "prompts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_prompts(
    RequirePromptList(_user): RequirePromptList,
    State(service): State<Arc<PromptService>>,
    Query(params): Query<PromptQueryParams>,
) -> Result<Json<ApiResponse<Vec<PromptResponseDto>>>> {
    let (prompts, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(prompts),
        None,
        Some(Meta { total }),
    )))
}

/// Export matching prompt records as a CSV download
#[utoipa::path(
    post,
    path = "/prompt/export",
    params(PromptQueryParams),
    responses(
        (status = 200, description = "CSV sheet of all matching records", content_type = "text/csv"),
        (status = 403, description = "Missing prompt:export permission")
    ),
    tag = "prompts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_prompts(
    RequirePromptExport(user): RequirePromptExport,
    State(service): State<Arc<PromptService>>,
    Query(params): Query<PromptQueryParams>,
) -> Result<Response> {
    let prompts = service.list_all(&params).await?;
    let sheet = write_sheet(&prompts)?;

    audit::record(&user.username, "Export prompt list", BusinessType::Export);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ai_prompt.csv\"",
            ),
        ],
        sheet,
    )
        .into_response())
}

/// Get a prompt record by id
#[utoipa::path(
    get,
    path = "/prompt/info/{id}",
    params(
        ("id" = i64, Path, description = "Prompt record id")
    ),
    responses(
        (status = 200, description = "Prompt record retrieved successfully", body = ApiResponse<PromptResponseDto>),
        (status = 404, description = "No live record with this id"),
        (status = 403, description = "Missing prompt:query permission")
    ),
    tag = "prompts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_prompt(
    RequirePromptQuery(_user): RequirePromptQuery,
    State(service): State<Arc<PromptService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PromptResponseDto>>> {
    let prompt = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(prompt), None, None)))
}

/// Create a new prompt record
#[utoipa::path(
    post,
    path = "/prompt/add",
    request_body = CreatePromptDto,
    responses(
        (status = 200, description = "Prompt record created", body = ApiResponse<PromptResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Missing prompt:add permission")
    ),
    tag = "prompts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_prompt(
    RequirePromptAdd(user): RequirePromptAdd,
    State(service): State<Arc<PromptService>>,
    AppJson(dto): AppJson<CreatePromptDto>,
) -> Result<Json<ApiResponse<PromptResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let prompt = service.add(dto, &user.username).await?;

    audit::record(&user.username, "Add prompt", BusinessType::Insert);

    Ok(Json(ApiResponse::success(Some(prompt), None, None)))
}

/// Update a prompt record in place
#[utoipa::path(
    post,
    path = "/prompt/edit",
    request_body = UpdatePromptDto,
    responses(
        (status = 200, description = "Affected row count (0 when no live record matches)", body = ApiResponse<u64>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Missing prompt:edit permission")
    ),
    tag = "prompts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn edit_prompt(
    RequirePromptEdit(user): RequirePromptEdit,
    State(service): State<Arc<PromptService>>,
    AppJson(dto): AppJson<UpdatePromptDto>,
) -> Result<Json<ApiResponse<u64>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let affected = service.edit(&dto, &user.username).await?;

    audit::record(&user.username, "Edit prompt", BusinessType::Update);

    Ok(Json(ApiResponse::success(Some(affected), None, None)))
}

/// Soft-delete a prompt record
#[utoipa::path(
    post,
    path = "/prompt/remove/{id}",
    params(
        ("id" = i64, Path, description = "Prompt record id")
    ),
    responses(
        (status = 200, description = "Affected row count (0 when no live record matches)", body = ApiResponse<u64>),
        (status = 403, description = "Missing prompt:remove permission")
    ),
    tag = "prompts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_prompt(
    RequirePromptRemove(user): RequirePromptRemove,
    State(service): State<Arc<PromptService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<u64>>> {
    let affected = service.remove(id, &user.username).await?;

    audit::record(&user.username, "Remove prompt", BusinessType::Delete);

    Ok(Json(ApiResponse::success(Some(affected), None, None)))
}

/// Soft-delete a batch of prompt records
#[utoipa::path(
    post,
    path = "/prompt/batchRemove",
    request_body = BatchRemoveDto,
    responses(
        (status = 200, description = "Affected row count (0 for an empty id list)", body = ApiResponse<u64>),
        (status = 403, description = "Missing prompt:batchRemove permission")
    ),
    tag = "prompts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn batch_remove_prompts(
    RequirePromptBatchRemove(user): RequirePromptBatchRemove,
    State(service): State<Arc<PromptService>>,
    AppJson(dto): AppJson<BatchRemoveDto>,
) -> Result<Json<ApiResponse<u64>>> {
    let affected = service.batch_remove(&dto.ids, &user.username).await?;

    audit::record(&user.username, "Batch remove prompts", BusinessType::Delete);

    Ok(Json(ApiResponse::success(Some(affected), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::prompts::routes;
    use crate::shared::constants::PERM_PROMPT_LIST;
    use crate::shared::test_helpers::{create_user_with_permissions, with_admin_auth, with_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use sqlx::postgres::PgPoolOptions;

    // A pool that never connects; these tests only exercise request paths
    // that are rejected before any query runs.
    fn lazy_service() -> Arc<PromptService> {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/prompt_admin_test")
            .unwrap();
        Arc::new(PromptService::new(pool))
    }

    #[tokio::test]
    async fn test_unauthenticated_request_is_rejected() {
        let server = TestServer::new(routes::routes(lazy_service())).unwrap();

        let response = server.get("/prompt/list").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_permission_is_forbidden() {
        let user = create_user_with_permissions(&[PERM_PROMPT_LIST]);
        let server = TestServer::new(with_user(routes::routes(lazy_service()), user)).unwrap();

        let response = server.post("/prompt/remove/1").await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_add_rejects_empty_content() {
        let server = TestServer::new(with_admin_auth(routes::routes(lazy_service()))).unwrap();

        let response = server
            .post("/prompt/add")
            .json(&json!({ "content": "" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_edit_rejects_missing_id() {
        let server = TestServer::new(with_admin_auth(routes::routes(lazy_service()))).unwrap();

        let response = server
            .post("/prompt/edit")
            .json(&json!({ "content": "updated" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_batch_remove_empty_ids_is_noop() {
        let server = TestServer::new(with_admin_auth(routes::routes(lazy_service()))).unwrap();

        // Empty set short-circuits in the service, so no database is needed
        let response = server
            .post("/prompt/batchRemove")
            .json(&json!({ "ids": [] }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"], json!(0));
    }
}
