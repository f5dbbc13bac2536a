use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::ROLE_ADMIN;

/// Identity carried by a validated admin bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedAdmin {
    pub sub: String,
    pub roles: Vec<String>,
}

impl AuthenticatedAdmin {
    /// Identity with the admin role, as issued on a successful login
    pub fn admin(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            roles: vec![ROLE_ADMIN.to_string()],
        }
    }

    /// Check if the identity has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}
