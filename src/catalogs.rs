// src/catalogs.rs
//! Pattern catalogs: pure data, no behavior.
//!
//! The catalogs are the observable contract of the classifier — every
//! accept/reject decision traces back to one of these lists. They deserialize
//! from TOML; the crate embeds a default set and a deployment may point
//! `JOBMAIL_CATALOGS_PATH` at its own file. Empty lists are a startup error:
//! the pipeline cannot meaningfully run without its pattern data and must
//! fail fast rather than silently classify everything as non-job-related.

use crate::types::Status;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_CATALOGS: &str = include_str!("../config/catalogs.toml");

pub const ENV_CATALOGS_PATH: &str = "JOBMAIL_CATALOGS_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct Catalogs {
    pub notification_senders: Vec<String>,
    pub notification_phrases: Vec<String>,
    pub automated_disclosures: Vec<String>,
    pub automated_subject_tags: Vec<String>,
    pub job_keywords: Vec<String>,
    pub job_site_domains: Vec<String>,
    pub recruiter_indicators: Vec<String>,
    pub excluded_domains: Vec<String>,
    pub generic_company_terms: Vec<String>,
    pub company_denylist: Vec<String>,
    pub title_stopwords: Vec<String>,
    pub curated_titles: Vec<String>,
    pub negative_signals: Vec<String>,
    pub status: StatusPhrases,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusPhrases {
    pub applied: Vec<String>,
    pub interviewing: Vec<String>,
    pub offered: Vec<String>,
    pub rejected: Vec<String>,
}

impl Catalogs {
    /// Built-in catalogs embedded at compile time.
    pub fn builtin() -> Self {
        // The embedded file is validated by tests; a broken build-time
        // catalog is a programmer error.
        Self::from_toml_str(DEFAULT_CATALOGS).expect("embedded catalogs are valid")
    }

    /// Parse catalogs from a TOML string and validate them.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cat: Catalogs = toml::from_str(toml_str)?;
        cat.validate()?;
        Ok(cat)
    }

    /// Load from `JOBMAIL_CATALOGS_PATH` if set, otherwise the built-ins.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var(ENV_CATALOGS_PATH).map(PathBuf::from) {
            Ok(path) => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    anyhow::anyhow!("failed to read catalogs at {}: {}", path.display(), e)
                })?;
                Self::from_toml_str(&content)
            }
            Err(_) => Ok(Self::builtin()),
        }
    }

    /// Fail fast on catalogs that cannot support classification.
    pub fn validate(&self) -> anyhow::Result<()> {
        fn non_empty(name: &str, list: &[String]) -> anyhow::Result<()> {
            if list.is_empty() {
                anyhow::bail!("catalog `{}` is empty", name);
            }
            Ok(())
        }
        non_empty("notification_senders", &self.notification_senders)?;
        non_empty("notification_phrases", &self.notification_phrases)?;
        non_empty("automated_disclosures", &self.automated_disclosures)?;
        non_empty("automated_subject_tags", &self.automated_subject_tags)?;
        non_empty("job_keywords", &self.job_keywords)?;
        non_empty("job_site_domains", &self.job_site_domains)?;
        non_empty("recruiter_indicators", &self.recruiter_indicators)?;
        non_empty("excluded_domains", &self.excluded_domains)?;
        non_empty("generic_company_terms", &self.generic_company_terms)?;
        non_empty("company_denylist", &self.company_denylist)?;
        non_empty("title_stopwords", &self.title_stopwords)?;
        non_empty("curated_titles", &self.curated_titles)?;
        non_empty("negative_signals", &self.negative_signals)?;
        non_empty("status.applied", &self.status.applied)?;
        non_empty("status.interviewing", &self.status.interviewing)?;
        non_empty("status.offered", &self.status.offered)?;
        non_empty("status.rejected", &self.status.rejected)?;
        Ok(())
    }

    /// Status keyword sets in their documented priority order. The order is
    /// a contract, not an iteration accident: the first set with any phrase
    /// contained in the content wins.
    pub fn status_priority(&self) -> [(Status, &[String]); 4] {
        [
            (Status::Applied, self.status.applied.as_slice()),
            (Status::Interviewing, self.status.interviewing.as_slice()),
            (Status::Offered, self.status.offered.as_slice()),
            (Status::Rejected, self.status.rejected.as_slice()),
        ]
    }
}
