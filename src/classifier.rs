// src/classifier.rs
//! The per-message classification engine.
//!
//! `classify` is a pure function of the message, the catalogs and the
//! supplied `now`: classifying the same message twice yields an identical
//! result. Stage order is a strict gate chain — notification filter first
//! (short-circuit, extracted fields from a notification are meaningless),
//! then the relatedness gate, then the independent extractors, then the
//! confidence threshold.

use crate::catalogs::Catalogs;
use crate::extract::{extract_company, extract_title};
use crate::filter::{is_job_related, notification_reason};
use crate::normalize::{anon_hash, fold, normalize_body};
use crate::scoring::{confidence, ConfidenceInput};
use crate::status::{classify_status, DEFAULT_GHOST_AFTER_DAYS};
use crate::types::{ClassificationResult, RawMessage};
use chrono::{DateTime, Utc};
use tracing::debug;

pub const DEFAULT_ACCEPT_THRESHOLD: f32 = 0.5;

pub const ENV_ACCEPT_THRESHOLD: &str = "JOBMAIL_ACCEPT_THRESHOLD";
pub const ENV_GHOST_AFTER_DAYS: &str = "JOBMAIL_GHOST_AFTER_DAYS";

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Minimum confidence for a candidate to be surfaced at all.
    pub accept_threshold: f32,
    /// Age after which a keyword-less application message counts as ghosted.
    pub ghost_after_days: i64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            accept_threshold: DEFAULT_ACCEPT_THRESHOLD,
            ghost_after_days: DEFAULT_GHOST_AFTER_DAYS,
        }
    }
}

impl ClassifierConfig {
    /// Defaults with optional env overrides, values parsed then clamped.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(t) = std::env::var(ENV_ACCEPT_THRESHOLD)
            .ok()
            .and_then(|s| s.trim().parse::<f32>().ok())
        {
            cfg.accept_threshold = t.clamp(0.0, 1.0);
        }
        if let Some(d) = std::env::var(ENV_GHOST_AFTER_DAYS)
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok())
        {
            cfg.ghost_after_days = d.max(1);
        }
        cfg
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    catalogs: Catalogs,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(catalogs: Catalogs, config: ClassifierConfig) -> Self {
        Self { catalogs, config }
    }

    /// Built-in catalogs + env-derived config.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(Catalogs::from_env()?, ClassifierConfig::from_env()))
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one message. `None` means the message was gated out or the
    /// candidate stayed below the acceptance threshold — absence, not an
    /// error. `now` is a parameter so the function stays deterministic.
    pub fn classify(&self, msg: &RawMessage, now: DateTime<Utc>) -> Option<ClassificationResult> {
        let id = anon_hash(&msg.id);
        let body = normalize_body(&msg.body);
        let content = format!("{} {}", msg.subject, body);

        if let Some(hit) =
            notification_reason(&self.catalogs, &msg.from, &msg.subject, &content)
        {
            debug!(target: "classify", %id, %hit, "rejected as notification");
            return None;
        }

        if !is_job_related(&self.catalogs, &msg.from, &content) {
            debug!(target: "classify", %id, "not job related");
            return None;
        }

        let mut reasons = Vec::new();

        let company = extract_company(&self.catalogs, &msg.from, &msg.subject, &body);
        if let Some(hit) = &company {
            reasons.push(format!("company:{}:{}", hit.strategy, hit.name));
        }
        let title = extract_title(&self.catalogs, &msg.subject, &body);
        if let Some(hit) = &title {
            reasons.push(format!("title:{}:{}", hit.pattern, hit.title));
        }
        let (status, status_hit) = classify_status(
            &self.catalogs,
            &content,
            msg.date,
            now,
            self.config.ghost_after_days,
        );
        if let Some(hit) = status_hit {
            reasons.push(hit);
        }

        let (score, score_reasons) = confidence(
            &self.catalogs,
            &ConfidenceInput {
                company: company.as_ref().map(|c| c.name.as_str()),
                job_title: title.as_ref().map(|t| t.title.as_str()),
                subject: &msg.subject,
                from: &msg.from,
                content: &fold(&content),
            },
        );
        reasons.extend(score_reasons);

        if score < self.config.accept_threshold {
            debug!(
                target: "classify",
                %id, score, threshold = self.config.accept_threshold,
                "below acceptance threshold"
            );
            return None;
        }

        debug!(target: "classify", %id, score, ?status, "accepted");
        Some(ClassificationResult {
            message_id: msg.id.clone(),
            thread_id: msg.thread_id.clone(),
            is_job_related: true,
            company: company.map(|c| c.name),
            job_title: title.map(|t| t.title),
            status,
            confidence: score,
            email_subject: msg.subject.clone(),
            email_from: msg.from.clone(),
            date: msg.date,
            reasons,
        })
    }
}
