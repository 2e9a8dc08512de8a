// tests/cleanup_records.rs
// Cleanup re-scorer over a stub record store: partitioning, idempotent
// deletes, and partial-failure reporting.

use anyhow::Result;
use jobmail_analyzer::pipeline::{analyze_records, cleanup, RecordStore};
use jobmail_analyzer::{Catalogs, JobRecord};
use std::collections::HashSet;
use std::sync::Mutex;

struct StubStore {
    records: Vec<JobRecord>,
    present: Mutex<HashSet<String>>,
    fail_on: Option<String>,
}

impl StubStore {
    fn new(records: Vec<JobRecord>) -> Self {
        let present = records.iter().map(|r| r.id.clone()).collect();
        Self {
            records,
            present: Mutex::new(present),
            fail_on: None,
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for StubStore {
    async fn list_records(&self) -> Result<Vec<JobRecord>> {
        Ok(self.records.clone())
    }

    async fn delete_record(&self, id: &str) -> Result<bool> {
        if self.fail_on.as_deref() == Some(id) {
            anyhow::bail!("store rejected delete of {id}");
        }
        Ok(self.present.lock().unwrap().remove(id))
    }
}

fn record(id: &str, company: &str, position: &str, from: &str, subject: &str) -> JobRecord {
    JobRecord {
        id: id.into(),
        company: company.into(),
        position: position.into(),
        email_from: from.into(),
        email_subject: subject.into(),
    }
}

fn sample_records() -> Vec<JobRecord> {
    vec![
        record(
            "keep-1",
            "Initech",
            "Software Engineer",
            "jane.doe@initech.com",
            "Interview next steps",
        ),
        record(
            "drop-1",
            "LinkedIn",
            "Unknown Position",
            "jobs-noreply@linkedin.com",
            "Jobs for you",
        ),
        record(
            "review-1",
            "Unknown Company",
            "Unknown Position",
            "",
            "Hello again",
        ),
    ]
}

#[test]
fn scenario_digest_record_is_partitioned_for_deletion() {
    let catalogs = Catalogs::builtin();
    let p = analyze_records(&catalogs, &sample_records());

    assert_eq!(p.to_cleanup.len(), 1);
    assert_eq!(p.to_cleanup[0].id, "drop-1");
    assert!(p.to_cleanup[0].quality <= 2);
    assert_eq!(p.suspicious.len(), 1);
    assert_eq!(p.suspicious[0].id, "review-1");
    assert_eq!(p.good.len(), 1);
    assert_eq!(p.good[0].id, "keep-1");

    for q in p.to_cleanup.iter().chain(&p.suspicious).chain(&p.good) {
        assert!(q.quality <= 10, "quality out of range: {q:?}");
    }
}

#[tokio::test]
async fn cleanup_deletes_exactly_the_flagged_records() {
    let store = StubStore::new(sample_records());
    let report = cleanup(&store, &Catalogs::builtin()).await.unwrap();

    assert_eq!(report.requested, 1);
    assert_eq!(report.deleted, 1);

    let present = store.present.lock().unwrap();
    assert!(!present.contains("drop-1"));
    assert!(present.contains("keep-1"));
    assert!(present.contains("review-1"));
}

#[tokio::test]
async fn deleting_an_absent_record_is_not_an_error() {
    let store = StubStore::new(sample_records());
    store.present.lock().unwrap().remove("drop-1");

    let report = cleanup(&store, &Catalogs::builtin()).await.unwrap();
    assert_eq!(report.requested, 1);
    assert_eq!(report.deleted, 1, "idempotent delete still counts as done");
}

#[tokio::test]
async fn failed_delete_shows_up_as_partial_completion() {
    let mut records = sample_records();
    records.push(record(
        "drop-2",
        "Team",
        "x",
        "noreply@updates.example.com",
        "Unsubscribe from our newsletter",
    ));
    let mut store = StubStore::new(records);
    store.fail_on = Some("drop-2".into());

    let report = cleanup(&store, &Catalogs::builtin()).await.unwrap();
    assert_eq!(report.requested, 2);
    assert_eq!(report.deleted, 1, "caller must see the partial failure");
}
