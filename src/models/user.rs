use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
    #[serde(other)]
    Unknown,
}

/// POST /auth/token body.
#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// POST /auth/token response envelope.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub result: Option<AuthResult>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuthResult {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub authenticated: bool,
}
