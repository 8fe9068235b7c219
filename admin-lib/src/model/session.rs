use serde::{Deserialize, Serialize};

use super::Role;

/// The signed-in user, as returned by `GET /auth/sessions/current`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Server whose products this user sees.
    pub server_code: String,
    #[serde(default)]
    pub firm_id: Option<i64>,
}

impl Session {
    /// Initials of the user's name, e.g. `"Ayşe Nur Kaya"` → `"ANK"`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionPayload {
    pub session: Session,
}

/// Plain `{ "message": ... }` body.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub message: String,
}
