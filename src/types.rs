// src/types.rs
//! Data model: raw message input, classification output, cleanup records,
//! and batch reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder the caller substitutes when extraction returned nothing.
/// Extraction itself never emits these — it returns `None`.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_POSITION: &str = "Unknown Position";

/// Pipeline stage of a tracked application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Applied,
    Interviewing,
    Offered,
    Rejected,
    Ghosted,
}

/// A fetched message as the source hands it over, before validation.
/// Header fields are optional because real mailboxes contain malformed
/// payloads; `validate` turns a usable payload into a `RawMessage` and
/// rejects the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl MessagePayload {
    /// Reject payloads missing the headers classification depends on.
    /// A missing body falls back to the snippet; both missing is a reject.
    pub fn validate(self) -> Option<RawMessage> {
        let subject = self.subject?;
        let from = self.from?;
        let date = self.date?;
        let body = match (self.body, &self.snippet) {
            (Some(b), _) if !b.is_empty() => b,
            (_, Some(s)) if !s.is_empty() => s.clone(),
            _ => return None,
        };
        if from.trim().is_empty() {
            return None;
        }
        Some(RawMessage {
            id: self.id,
            thread_id: self.thread_id,
            subject,
            from,
            date,
            body,
            snippet: self.snippet,
        })
    }
}

/// Validated message input to the classifier. Read-only; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawMessage {
    pub id: String,
    pub thread_id: Option<String>,
    pub subject: String,
    /// Display-name + angle-bracket address, e.g. `"Sarah Johnson" <sarah@startup.io>`.
    pub from: String,
    pub date: DateTime<Utc>,
    pub body: String,
    pub snippet: Option<String>,
}

/// One accepted classification. Immutable once produced; only emitted when
/// `confidence` cleared the acceptance threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    pub is_job_related: bool,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub status: Status,
    /// Confidence in <0.0, 1.0>.
    pub confidence: f32,
    pub email_subject: String,
    pub email_from: String,
    pub date: DateTime<Utc>,
    /// Explainability trail: which patterns contributed to the decision.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

/// Already-persisted job record, input to the cleanup re-scorer. The raw
/// message is gone; only the stored fields are available.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobRecord {
    pub id: String,
    pub company: String,
    pub position: String,
    pub email_from: String,
    pub email_subject: String,
}

/// Cleanup re-score of one persisted record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityRecord {
    pub id: String,
    pub company: String,
    pub position: String,
    pub email_from: String,
    pub email_subject: String,
    /// Quality in 0..=10; starts at a neutral 5 and is adjusted additively.
    pub quality: u8,
    pub should_cleanup: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

/// Aggregate outcome of one scan batch.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanReport {
    pub total_scanned: usize,
    pub job_emails_found: usize,
    pub skipped_malformed: usize,
    pub results: Vec<ClassificationResult>,
}

/// Partition of persisted records by quality band.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CleanupPartition {
    /// quality < 3 or the notification re-check fired: delete.
    pub to_cleanup: Vec<QualityRecord>,
    /// quality 3..=5: surface for manual review.
    pub suspicious: Vec<QualityRecord>,
    /// quality >= 6: retain silently.
    pub good: Vec<QualityRecord>,
}

/// Outcome of a cleanup run. `deleted` may be lower than `requested` when
/// the store failed part-way; the caller detects partial failure from the gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupReport {
    pub requested: usize,
    pub deleted: usize,
    pub partition: CleanupPartition,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payload() -> MessagePayload {
        MessagePayload {
            id: "m1".into(),
            thread_id: None,
            subject: Some("Interview".into()),
            from: Some("sarah@startup.io".into()),
            date: Some(Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()),
            body: Some("hello".into()),
            snippet: None,
        }
    }

    #[test]
    fn payload_validation_accepts_complete_messages() {
        assert!(payload().validate().is_some());
    }

    #[test]
    fn payload_validation_rejects_missing_headers() {
        let mut p = payload();
        p.from = None;
        assert!(p.validate().is_none());

        let mut p = payload();
        p.body = None;
        p.snippet = None;
        assert!(p.validate().is_none());
    }

    #[test]
    fn snippet_backfills_missing_body() {
        let mut p = payload();
        p.body = None;
        p.snippet = Some("short preview".into());
        let m = p.validate().expect("snippet should back-fill body");
        assert_eq!(m.body, "short preview");
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Ghosted).unwrap(), "\"ghosted\"");
        assert_eq!(Status::default(), Status::Applied);
    }
}
