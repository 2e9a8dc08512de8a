// src/pipeline.rs
//! Batch drivers: the scan pass over freshly fetched messages and the
//! cleanup pass over already-persisted records.
//!
//! The pipeline owns no transport and no store; both are opaque async
//! collaborators behind traits. Classification itself is embarrassingly
//! parallel (pure per-message function), the driver runs it sequentially:
//! a latency choice, not a correctness requirement. Per-message failures
//! never abort a batch.

use crate::catalogs::Catalogs;
use crate::classifier::Classifier;
use crate::normalize::anon_hash;
use crate::scoring::quality;
use crate::types::{
    CleanupPartition, CleanupReport, JobRecord, MessagePayload, ScanReport,
};
use anyhow::Result;
use chrono::Utc;
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_MAX_MESSAGES: usize = 50;

pub const ENV_WINDOW_DAYS: &str = "JOBMAIL_SCAN_WINDOW_DAYS";
pub const ENV_MAX_MESSAGES: &str = "JOBMAIL_SCAN_MAX_MESSAGES";

/// One-time metrics registration (so series show up on an exporter).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("scan_messages_total", "Messages seen by the scan pipeline.");
        describe_counter!("scan_accepted_total", "Candidates above the confidence threshold.");
        describe_counter!(
            "scan_skipped_malformed_total",
            "Payloads skipped due to missing headers/body."
        );
        describe_counter!("cleanup_deleted_total", "Records deleted by the cleanup pass.");
    });
}

/// Time window and size cap a scan asks its message source for.
#[derive(Debug, Clone)]
pub struct ScanQuery {
    pub window_days: u32,
    pub max_messages: usize,
}

impl Default for ScanQuery {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }
}

impl ScanQuery {
    /// Defaults with optional env overrides, values parsed then clamped.
    pub fn from_env() -> Self {
        let mut q = Self::default();
        if let Some(d) = std::env::var(ENV_WINDOW_DAYS)
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
        {
            q.window_days = d.max(1);
        }
        if let Some(n) = std::env::var(ENV_MAX_MESSAGES)
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
        {
            q.max_messages = n.max(1);
        }
        q
    }
}

/// External collaborator that fetches candidate messages. Credentials and
/// transport policy (timeouts, retries) live behind this trait; the core
/// receives only message data.
#[async_trait::async_trait]
pub trait MessageSource {
    async fn fetch_recent(&self, query: &ScanQuery) -> Result<Vec<MessagePayload>>;
    fn name(&self) -> &'static str;
}

/// External collaborator that owns persisted job records.
#[async_trait::async_trait]
pub trait RecordStore {
    async fn list_records(&self) -> Result<Vec<JobRecord>>;
    /// Returns whether the record existed. Deleting an absent record is not
    /// an error (the delete path is idempotent).
    async fn delete_record(&self, id: &str) -> Result<bool>;
}

/// Cooperative cancellation: stops launching new per-message work while
/// results already produced are kept and reported.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Scan a batch of recent messages and collect accepted candidates.
///
/// Malformed payloads are logged and skipped, never surfaced as results and
/// never fatal to the batch; a source fetch failure is a batch-level error.
pub async fn scan(
    source: &dyn MessageSource,
    classifier: &Classifier,
    query: &ScanQuery,
    cancel: &CancelFlag,
) -> Result<ScanReport> {
    ensure_metrics_described();

    let payloads = source.fetch_recent(query).await.map_err(|e| {
        anyhow::anyhow!("message source `{}` failed: {}", source.name(), e)
    })?;

    let now = Utc::now();
    let mut report = ScanReport::default();

    for payload in payloads.into_iter().take(query.max_messages) {
        if cancel.is_cancelled() {
            info!(
                scanned = report.total_scanned,
                "scan cancelled; reporting partial batch"
            );
            break;
        }
        report.total_scanned += 1;
        counter!("scan_messages_total").increment(1);

        let id = anon_hash(&payload.id);
        let Some(msg) = payload.validate() else {
            warn!(target: "scan", %id, "skipping malformed payload");
            report.skipped_malformed += 1;
            counter!("scan_skipped_malformed_total").increment(1);
            continue;
        };

        if let Some(result) = classifier.classify(&msg, now) {
            counter!("scan_accepted_total").increment(1);
            report.results.push(result);
        }
    }

    report.job_emails_found = report.results.len();
    info!(
        source = source.name(),
        total = report.total_scanned,
        found = report.job_emails_found,
        skipped = report.skipped_malformed,
        "scan finished"
    );
    Ok(report)
}

/// Analyze mode: re-score persisted records and partition them by quality
/// band without touching the store.
pub fn analyze_records(catalogs: &Catalogs, records: &[JobRecord]) -> CleanupPartition {
    let mut partition = CleanupPartition::default();
    for record in records {
        let q = quality(catalogs, record);
        if q.should_cleanup {
            partition.to_cleanup.push(q);
        } else if q.quality <= 5 {
            partition.suspicious.push(q);
        } else {
            partition.good.push(q);
        }
    }
    partition
}

/// Cleanup mode: analyze, then delete everything in the cleanup band.
///
/// `deleted` counts records the store actually removed; comparing it with
/// `requested` lets the caller detect partial failure. A delete of an
/// already-absent record counts as success (idempotent).
pub async fn cleanup(
    store: &dyn RecordStore,
    catalogs: &Catalogs,
) -> Result<CleanupReport> {
    ensure_metrics_described();

    let records = store.list_records().await?;
    let partition = analyze_records(catalogs, &records);

    let requested = partition.to_cleanup.len();
    let mut deleted = 0usize;
    for q in &partition.to_cleanup {
        match store.delete_record(&q.id).await {
            Ok(_existed) => {
                deleted += 1;
                counter!("cleanup_deleted_total").increment(1);
            }
            Err(e) => {
                warn!(target: "cleanup", id = %anon_hash(&q.id), error = ?e, "delete failed");
            }
        }
    }

    info!(
        requested,
        deleted,
        suspicious = partition.suspicious.len(),
        good = partition.good.len(),
        "cleanup finished"
    );
    Ok(CleanupReport {
        requested,
        deleted,
        partition,
    })
}
