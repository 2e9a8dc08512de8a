// src/lib.rs
// Public library surface. The crate has no wire protocol of its own: a
// caller owns message fetching and persistence and invokes the pipeline.

pub mod catalogs;
pub mod classifier;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod scoring;
pub mod status;
pub mod types;

// Extraction strategies (company, title)
pub mod extract;

// ---- Re-exports for stable public API ----
pub use crate::catalogs::Catalogs;
pub use crate::classifier::{Classifier, ClassifierConfig};
pub use crate::pipeline::{
    analyze_records, cleanup, scan, CancelFlag, MessageSource, RecordStore, ScanQuery,
};
pub use crate::types::{
    ClassificationResult, CleanupPartition, CleanupReport, JobRecord, MessagePayload,
    QualityRecord, RawMessage, ScanReport, Status,
};

/// Install a default `tracing` subscriber honoring `RUST_LOG`. Convenience
/// for binaries and examples embedding the library; calling it twice is a
/// no-op.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
