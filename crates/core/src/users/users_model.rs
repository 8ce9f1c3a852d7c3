//! User domain models.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AVATAR_URL, DEFAULT_DISPLAY_NAME, ROLE_CARRIER, ROLE_DUAL_OPERATOR, ROLE_PROVIDER,
};

/// Marketplace role of a user.
///
/// Roles travel as plain strings on the wire. Anything outside the known set
/// is kept verbatim in [`Role::Unknown`] so it can be logged and round-tripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Fulfils shipments; browses requests published by companies.
    Carrier,
    /// Company that publishes offers; browses carrier offers.
    Provider,
    /// Allowed to see and publish both listing types.
    DualOperator,
    Unknown(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Carrier => ROLE_CARRIER,
            Role::Provider => ROLE_PROVIDER,
            Role::DualOperator => ROLE_DUAL_OPERATOR,
            Role::Unknown(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            ROLE_CARRIER => Role::Carrier,
            ROLE_PROVIDER => Role::Provider,
            ROLE_DUAL_OPERATOR => Role::DualOperator,
            other => Role::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub enterprise_name: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role,
            enterprise_name: None,
            profile_image_url: None,
        }
    }

    /// Name shown in the sidebar header.
    pub fn display_name(&self) -> &str {
        self.enterprise_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// Avatar shown in the sidebar header.
    pub fn avatar_url(&self) -> &str {
        self.profile_image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_AVATAR_URL)
    }
}
