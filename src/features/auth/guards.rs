//! Permission guards for the prompt resource.
//!
//! The auth middleware resolves the bearer token into an
//! `AuthenticatedUser` carrying permission strings; these guards run as
//! extractors before a handler body and reject the request when the
//! operation's permission string is missing. Handlers and services stay
//! permission-agnostic.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::{
    PERM_PROMPT_ADD, PERM_PROMPT_BATCH_REMOVE, PERM_PROMPT_EDIT, PERM_PROMPT_EXPORT,
    PERM_PROMPT_LIST, PERM_PROMPT_QUERY, PERM_PROMPT_REMOVE,
};
use axum::{extract::FromRequestParts, http::request::Parts};

fn require_permission(parts: &Parts, permission: &str) -> Result<AuthenticatedUser, AppError> {
    let user = parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

    if !user.has_permission(permission) {
        return Err(AppError::Forbidden(format!(
            "Missing required permission '{}'",
            permission
        )));
    }

    Ok(user.clone())
}

/// Guard for listing prompt records.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequirePromptList(user): RequirePromptList) { ... }
/// ```
pub struct RequirePromptList(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequirePromptList
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_permission(parts, PERM_PROMPT_LIST).map(RequirePromptList)
    }
}

/// Guard for exporting prompt records.
pub struct RequirePromptExport(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequirePromptExport
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_permission(parts, PERM_PROMPT_EXPORT).map(RequirePromptExport)
    }
}

/// Guard for reading a single prompt record.
pub struct RequirePromptQuery(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequirePromptQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_permission(parts, PERM_PROMPT_QUERY).map(RequirePromptQuery)
    }
}

/// Guard for creating a prompt record.
pub struct RequirePromptAdd(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequirePromptAdd
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_permission(parts, PERM_PROMPT_ADD).map(RequirePromptAdd)
    }
}

/// Guard for updating a prompt record.
pub struct RequirePromptEdit(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequirePromptEdit
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_permission(parts, PERM_PROMPT_EDIT).map(RequirePromptEdit)
    }
}

/// Guard for soft-deleting a single prompt record.
pub struct RequirePromptRemove(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequirePromptRemove
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_permission(parts, PERM_PROMPT_REMOVE).map(RequirePromptRemove)
    }
}

/// Guard for soft-deleting a batch of prompt records.
pub struct RequirePromptBatchRemove(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequirePromptBatchRemove
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_permission(parts, PERM_PROMPT_BATCH_REMOVE).map(RequirePromptBatchRemove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_user(user: AuthenticatedUser) -> Parts {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        parts.extensions.insert(user);
        parts
    }

    #[tokio::test]
    async fn test_guard_allows_matching_permission() {
        let mut parts = parts_with_user(AuthenticatedUser {
            sub: "s".to_string(),
            username: "alice".to_string(),
            permissions: vec![PERM_PROMPT_LIST.to_string()],
        });

        let guard = RequirePromptList::from_request_parts(&mut parts, &()).await;
        assert!(guard.is_ok());
    }

    #[tokio::test]
    async fn test_guard_rejects_missing_permission() {
        let mut parts = parts_with_user(AuthenticatedUser {
            sub: "s".to_string(),
            username: "alice".to_string(),
            permissions: vec![PERM_PROMPT_LIST.to_string()],
        });

        let guard = RequirePromptRemove::from_request_parts(&mut parts, &()).await;
        assert!(matches!(guard, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_guard_rejects_unauthenticated() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        let guard = RequirePromptList::from_request_parts(&mut parts, &()).await;
        assert!(matches!(guard, Err(AppError::Unauthorized(_))));
    }
}
