use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Superadmin,
}

impl Role {
    /// Badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Superadmin => "Süper Admin",
        }
    }
}

/// User listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub firm_id: i64,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `GET /superadmin/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersPayload {
    #[serde(default)]
    pub message: String,
    pub users: Vec<UserSummary>,
}
