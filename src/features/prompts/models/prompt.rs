use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `ai_prompt` table.
///
/// `del_flag` holds the live sentinel (`"1"`) or an epoch-milliseconds
/// string stamped at soft-delete time; deleted rows stay in the table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Prompt {
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
