//! The authenticated actor and its role checks.
//!
//! Services receive the user explicitly; nothing reads roles from ambient
//! state.

use serde::{Deserialize, Serialize};

use crate::domain::resource::ResourceSchema;

/// Role every user of the hospital admin needs.
pub const SERVICE_ACCESS_ROLE: &str = "hospital";
/// Role granting access to every resource.
pub const SERVICE_ADMIN_ROLE: &str = "hospital_admin";

/// Claims carried by the bearer token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    /// Expiry as a unix timestamp.
    pub exp: u64,
}

/// Returns whether `role` is present in `roles`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        check_role(role, &self.roles)
    }

    /// Whether the user may read records of the described resource.
    pub fn can_access(&self, schema: &ResourceSchema) -> bool {
        self.has_role(SERVICE_ACCESS_ROLE)
            && (self.has_role(SERVICE_ADMIN_ROLE) || self.has_role(schema.role))
    }
}
