use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Subject claim from the token (stable account identifier)
    pub sub: String,
    /// Display name stamped into audit fields as the acting principal
    pub username: String,
    /// Permission strings resolved by the external authorization engine
    pub permissions: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if the user carries a specific permission string.
    /// The `*` permission grants everything.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission || p == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(permissions: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "sub-1".to_string(),
            username: "alice".to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_exact_permission_match() {
        let u = user(&["prompt:list", "prompt:query"]);
        assert!(u.has_permission("prompt:list"));
        assert!(u.has_permission("prompt:query"));
        assert!(!u.has_permission("prompt:remove"));
    }

    #[test]
    fn test_wildcard_grants_everything() {
        let u = user(&["*"]);
        assert!(u.has_permission("prompt:batchRemove"));
        assert!(u.has_permission("prompt:export"));
    }

    #[test]
    fn test_empty_permissions_deny_all() {
        let u = user(&[]);
        assert!(!u.has_permission("prompt:list"));
    }
}
