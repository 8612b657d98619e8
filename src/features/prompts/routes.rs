use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::prompts::{handlers, services::PromptService};

/// Routes for prompt record management. Every route sits behind the auth
/// middleware; per-operation permission checks live in the handler guards.
pub fn routes(service: Arc<PromptService>) -> Router {
    Router::new()
        .route(
            "/prompt/list",
            get(handlers::prompt_handler::list_prompts),
        )
        .route(
            "/prompt/export",
            post(handlers::prompt_handler::export_prompts),
        )
        .route(
            "/prompt/info/{id}",
            get(handlers::prompt_handler::get_prompt),
        )
        .route("/prompt/add", post(handlers::prompt_handler::add_prompt))
        .route("/prompt/edit", post(handlers::prompt_handler::edit_prompt))
        .route(
            "/prompt/remove/{id}",
            post(handlers::prompt_handler::remove_prompt),
        )
        .route(
            "/prompt/batchRemove",
            post(handlers::prompt_handler::batch_remove_prompts),
        )
        .with_state(service)
}
