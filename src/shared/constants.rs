/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// SOFT DELETE
// =============================================================================

/// del_flag value marking a row as live. Soft deletion overwrites it with
/// an epoch-milliseconds string; every read query filters on this sentinel.
pub const DEL_FLAG_LIVE: &str = "1";

// =============================================================================
// PERMISSION CONSTANTS
// =============================================================================

/// List prompt records
pub const PERM_PROMPT_LIST: &str = "prompt:list";

/// Export prompt records as a spreadsheet
pub const PERM_PROMPT_EXPORT: &str = "prompt:export";

/// Read a single prompt record
pub const PERM_PROMPT_QUERY: &str = "prompt:query";

/// Create a prompt record
pub const PERM_PROMPT_ADD: &str = "prompt:add";

/// Update a prompt record
pub const PERM_PROMPT_EDIT: &str = "prompt:edit";

/// Soft-delete a single prompt record
pub const PERM_PROMPT_REMOVE: &str = "prompt:remove";

/// Soft-delete a batch of prompt records
pub const PERM_PROMPT_BATCH_REMOVE: &str = "prompt:batchRemove";
