use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Vendor,
}

impl UserRole {
    /// Unknown role strings fall back to the least-privileged role.
    pub fn parse(role: &str) -> UserRole {
        match role {
            "admin" => UserRole::Admin,
            _ => UserRole::Vendor,
        }
    }
}
