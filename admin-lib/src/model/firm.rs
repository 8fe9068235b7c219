use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Firm listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmSummary {
    pub id: i64,
    pub name: String,
    pub dia_server_code: String,
    pub dia_firm_code: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `GET /superadmin/firms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmsPayload {
    #[serde(default)]
    pub message: String,
    pub firms: Vec<FirmSummary>,
}

pub const FIRM_CODE_INVALID: &str = "Firma kodu geçerli bir sayı olmalıdır";
pub const PERIOD_CODE_INVALID: &str = "Dönem kodu 0 veya daha büyük olmalıdır";

/// Body of `PATCH /superadmin/firms/{id}`. Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_firm_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_period_code: Option<i64>,
}

impl FirmUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check the numeric codes: the firm code must be positive, the period
    /// code non-negative.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.dia_firm_code.is_some_and(|code| code <= 0) {
            return Err(FIRM_CODE_INVALID);
        }
        if self.dia_period_code.is_some_and(|code| code < 0) {
            return Err(PERIOD_CODE_INVALID);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FirmUpdatedPayload {
    pub updated_firm: FirmSummary,
}
