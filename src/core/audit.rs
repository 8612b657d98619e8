//! Audit events for mutating and export operations.
//!
//! Events are emitted under the `audit` tracing target so operators can
//! route them to a dedicated sink with an `EnvFilter` directive like
//! `audit=info`. Handlers emit one event per successful operation, after
//! the service call returns.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessType {
    Insert,
    Update,
    Delete,
    Export,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Insert => "INSERT",
            BusinessType::Update => "UPDATE",
            BusinessType::Delete => "DELETE",
            BusinessType::Export => "EXPORT",
        }
    }
}

/// Emit one audit event for an operation performed by `operator`.
pub fn record(operator: &str, title: &str, business_type: BusinessType) {
    tracing::info!(
        target: "audit",
        operator = %operator,
        business_type = %business_type.as_str(),
        "{}",
        title
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_type_as_str() {
        assert_eq!(BusinessType::Insert.as_str(), "INSERT");
        assert_eq!(BusinessType::Update.as_str(), "UPDATE");
        assert_eq!(BusinessType::Delete.as_str(), "DELETE");
        assert_eq!(BusinessType::Export.as_str(), "EXPORT");
    }
}
