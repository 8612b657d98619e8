use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::prompts::{dtos as prompts_dtos, handlers as prompts_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Prompts
        prompts_handlers::prompt_handler::list_prompts,
        prompts_handlers::prompt_handler::export_prompts,
        prompts_handlers::prompt_handler::get_prompt,
        prompts_handlers::prompt_handler::add_prompt,
        prompts_handlers::prompt_handler::edit_prompt,
        prompts_handlers::prompt_handler::remove_prompt,
        prompts_handlers::prompt_handler::batch_remove_prompts,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Prompts
            prompts_dtos::CreatePromptDto,
            prompts_dtos::UpdatePromptDto,
            prompts_dtos::BatchRemoveDto,
            prompts_dtos::PromptResponseDto,
            ApiResponse<prompts_dtos::PromptResponseDto>,
            ApiResponse<Vec<prompts_dtos::PromptResponseDto>>,
            ApiResponse<u64>,
        )
    ),
    tags(
        (name = "prompts", description = "AI prompt content management"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Prompt Admin API",
        version = "0.1.0",
        description = "API documentation for the AI prompt admin service",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
