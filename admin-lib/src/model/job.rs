//! Product synchronization and its schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How often the synchronization job repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobUnit {
    Minute,
    Hour,
    #[default]
    Day,
    Month,
}

impl JobUnit {
    pub const ALL: [JobUnit; 4] = [Self::Minute, Self::Hour, Self::Day, Self::Month];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Minute => "Dakikada bir",
            Self::Hour => "Saatte bir",
            Self::Day => "Günde bir",
            Self::Month => "Ayda bir",
        }
    }

    /// The next unit, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Minute => Self::Hour,
            Self::Hour => Self::Day,
            Self::Day => Self::Month,
            Self::Month => Self::Minute,
        }
    }
}

/// Body of `POST /admin/jobs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSchedule {
    /// At least 1.
    pub frequency: u32,
    pub unit: JobUnit,
}

impl Default for JobSchedule {
    fn default() -> Self {
        Self {
            frequency: 1,
            unit: JobUnit::Day,
        }
    }
}

/// The server's synchronization job for one firm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub firm_id: i64,
    pub frequency: u32,
    pub unit: JobUnit,
    pub last_ran_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn schedule(&self) -> JobSchedule {
        JobSchedule {
            frequency: self.frequency,
            unit: self.unit,
        }
    }
}

/// `GET`/`POST /admin/jobs`. The job is missing until one is saved.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JobPayload {
    #[serde(default)]
    pub job: Option<Job>,
}

/// Row counts reported by `POST /admin/products/sync`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncCounts {
    pub inserted_product_rows_count: u64,
    pub updated_product_rows_count: u64,
    pub inserted_barcode_rows_count: u64,
    pub updated_barcode_rows_count: u64,
    pub deleted_product_rows_count: u64,
}

impl SyncCounts {
    /// One-line Turkish summary for a toast.
    pub fn summary(&self) -> String {
        format!(
            "{} tane yeni, {} tane değiştirilmiş, {} tane silinen ürün ve {} tane yeni, \
             {} tane değiştirilmiş barkod bulundu.",
            self.inserted_product_rows_count,
            self.updated_product_rows_count,
            self.deleted_product_rows_count,
            self.inserted_barcode_rows_count,
            self.updated_barcode_rows_count,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SyncPayload {
    pub new_row_counts: SyncCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cycle_and_labels() {
        let mut unit = JobUnit::Minute;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(unit.label());
            unit = unit.next();
        }
        assert_eq!(unit, JobUnit::Minute);
        assert_eq!(seen, vec!["Dakikada bir", "Saatte bir", "Günde bir", "Ayda bir"]);
    }

    #[test]
    fn test_sync_summary() {
        let counts = SyncCounts {
            inserted_product_rows_count: 3,
            updated_product_rows_count: 2,
            inserted_barcode_rows_count: 5,
            updated_barcode_rows_count: 1,
            deleted_product_rows_count: 0,
        };
        assert_eq!(
            counts.summary(),
            "3 tane yeni, 2 tane değiştirilmiş, 0 tane silinen ürün ve 5 tane yeni, \
             1 tane değiştirilmiş barkod bulundu."
        );
    }

    #[test]
    fn test_job_payload_without_job() {
        let payload: JobPayload = serde_json::from_str(r#"{"message":"Görev yok"}"#).unwrap();
        assert!(payload.job.is_none());
    }
}
