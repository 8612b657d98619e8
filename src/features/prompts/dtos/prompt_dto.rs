use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::prompts::models::Prompt;
use crate::modules::export::SheetRow;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

// Helper functions for defaults
fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

// Query params for listing and exporting prompts
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct PromptQueryParams {
    /// Page number (1-indexed); ignored by export
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page; ignored by export
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Substring match on prompt content
    pub content: Option<String>,

    /// Filter by enabled flag (0 or 1, none = all)
    pub enabled: Option<i32>,
}

impl PromptQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePromptDto {
    /// Prompt text, required
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,

    /// Enabled flag, defaults to 1 (enabled) when omitted
    #[validate(range(min = 0, max = 1))]
    pub enabled: Option<i32>,

    #[validate(length(max = 500))]
    pub remark: Option<String>,
}

// Edit request; only content, enabled and remark are caller-writable
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePromptDto {
    pub id: i64,

    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,

    #[validate(range(min = 0, max = 1))]
    pub enabled: Option<i32>,

    #[validate(length(max = 500))]
    pub remark: Option<String>,
}

// Batch soft-delete request
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchRemoveDto {
    pub ids: Vec<i64>,
}

// Response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct PromptResponseDto {
    pub id: i64,
    pub content: String,
    pub enabled: i32,
    pub create_by: Option<String>,
    pub create_time: Option<DateTime<Utc>>,
    pub update_by: Option<String>,
    pub update_time: Option<DateTime<Utc>>,
    pub del_flag: String,
    pub remark: Option<String>,
}

impl From<Prompt> for PromptResponseDto {
    fn from(p: Prompt) -> Self {
        Self {
            id: p.id,
            content: p.content,
            enabled: p.enabled,
            create_by: p.create_by,
            create_time: p.create_time,
            update_by: p.update_by,
            update_time: p.update_time,
            del_flag: p.del_flag,
            remark: p.remark,
        }
    }
}

// Export columns mirror the fields a spreadsheet consumer cares about;
// audit stamps and ids stay out of the sheet.
impl SheetRow for PromptResponseDto {
    fn headers() -> Vec<&'static str> {
        vec!["content", "enabled", "remark"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.content.clone(),
            self.enabled.to_string(),
            self.remark.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_requires_content() {
        let dto = CreatePromptDto {
            content: "".to_string(),
            enabled: None,
            remark: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_valid() {
        let dto = CreatePromptDto {
            content: "You are a helpful assistant.".to_string(),
            enabled: Some(1),
            remark: Some("system prompt".to_string()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_out_of_range_enabled() {
        let dto = CreatePromptDto {
            content: "hello".to_string(),
            enabled: Some(2),
            remark: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_dto_rejects_empty_content() {
        let dto = UpdatePromptDto {
            id: 1,
            content: Some("".to_string()),
            enabled: None,
            remark: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_dto_partial_fields_valid() {
        let dto = UpdatePromptDto {
            id: 1,
            content: None,
            enabled: Some(0),
            remark: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_query_params_offset_and_limit() {
        let params = PromptQueryParams {
            page: 2,
            page_size: 20,
            content: None,
            enabled: None,
        };
        assert_eq!(params.offset(), 20);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_query_params_limit_clamped() {
        let params = PromptQueryParams {
            page: 1,
            page_size: 1000,
            content: None,
            enabled: None,
        };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_sheet_row_mapping() {
        let dto = PromptResponseDto {
            id: 42,
            content: "hello".to_string(),
            enabled: 1,
            create_by: Some("alice".to_string()),
            create_time: None,
            update_by: None,
            update_time: None,
            del_flag: "1".to_string(),
            remark: None,
        };

        assert_eq!(PromptResponseDto::headers(), vec!["content", "enabled", "remark"]);
        assert_eq!(dto.row(), vec!["hello".to_string(), "1".to_string(), "".to_string()]);
    }
}
