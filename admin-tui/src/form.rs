//! Firm edit form.

use admin_lib::model::{FIRM_CODE_INVALID, FirmSummary, FirmUpdate, PERIOD_CODE_INVALID};

pub const FORM_TITLE: &str = "Firmayı Düzenle";

const NAME: usize = 0;
const USERNAME: usize = 1;
const PASSWORD: usize = 2;
const API_KEY: usize = 3;
const FIRM_CODE: usize = 4;
const PERIOD_CODE: usize = 5;

pub const FIELD_LABELS: [&str; 6] = [
    "Firma Adı",
    "DIA Kullanıcı Adı",
    "DIA Şifresi",
    "API Anahtarı",
    "Firma Kodu",
    "Dönem Kodu",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmForm {
    pub firm_id: i64,
    fields: [String; 6],
    active: usize,
    error: Option<String>,
}

impl FirmForm {
    /// Form for `firm`, with the values the listing already knows filled in.
    pub fn for_firm(firm: &FirmSummary) -> Self {
        let mut fields: [String; 6] = Default::default();
        fields[NAME] = firm.name.clone();
        fields[FIRM_CODE] = firm.dia_firm_code.to_string();
        Self {
            firm_id: firm.id,
            fields,
            active: NAME,
            error: None,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn push(&mut self, c: char) {
        self.fields[self.active].push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.fields[self.active].pop();
        self.error = None;
    }

    pub fn next(&mut self) {
        self.active = (self.active + 1) % FIELD_LABELS.len();
    }

    pub fn previous(&mut self) {
        self.active = (self.active + FIELD_LABELS.len() - 1) % FIELD_LABELS.len();
    }

    /// Label and display value per field. The password is masked.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        FIELD_LABELS
            .iter()
            .zip(&self.fields)
            .enumerate()
            .map(|(i, (label, value))| {
                let shown = if i == PASSWORD {
                    "•".repeat(value.chars().count())
                } else {
                    value.clone()
                };
                (*label, shown)
            })
            .collect()
    }

    /// The request body. Blank fields are left out.
    pub fn to_update(&self) -> Result<FirmUpdate, &'static str> {
        let update = FirmUpdate {
            name: text(&self.fields[NAME]),
            dia_username: text(&self.fields[USERNAME]),
            dia_password: text(&self.fields[PASSWORD]),
            dia_api_key: text(&self.fields[API_KEY]),
            dia_firm_code: number(&self.fields[FIRM_CODE], FIRM_CODE_INVALID)?,
            dia_period_code: number(&self.fields[PERIOD_CODE], PERIOD_CODE_INVALID)?,
        };
        update.validate()?;
        Ok(update)
    }
}

fn text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn number(value: &str, invalid: &'static str) -> Result<Option<i64>, &'static str> {
    match text(value) {
        Some(value) => value.parse().map(Some).map_err(|_| invalid),
        None => Ok(None),
    }
}
