// src/scoring.rs
//! Confidence scoring for fresh scan results and quality re-scoring for
//! already-persisted records.
//!
//! Both scorers are additive with clamped output, and both return the
//! reason trail alongside the score so every threshold decision stays
//! traceable to the signals that produced it.

use crate::catalogs::Catalogs;
use crate::filter::notification_reason;
use crate::normalize::{first_phrase_hit, fold};
use crate::types::{JobRecord, QualityRecord, UNKNOWN_COMPANY, UNKNOWN_POSITION};

/// Signals feeding the confidence score of one message.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceInput<'a> {
    pub company: Option<&'a str>,
    pub job_title: Option<&'a str>,
    pub subject: &'a str,
    pub from: &'a str,
    /// Folded subject+body concatenation.
    pub content: &'a str,
}

/// Combine extraction success, subject signals and negative signals into a
/// score in <0.0, 1.0>.
pub fn confidence(catalogs: &Catalogs, input: &ConfidenceInput<'_>) -> (f32, Vec<String>) {
    let mut score = 0.2f32;
    let mut reasons = Vec::new();

    match input.company {
        Some(c) if c.len() > 2 && !fold(c).contains("team") => {
            score += 0.4;
            reasons.push("company:specific(+0.4)".into());
        }
        Some(_) => {
            score += 0.2;
            reasons.push("company:generic(+0.2)".into());
        }
        None => {}
    }

    if input.job_title.is_some() {
        score += 0.3;
        reasons.push("title:extracted(+0.3)".into());
    }

    // Mutually exclusive subject bonus; highest applicable wins.
    let subject = fold(input.subject);
    let subject_bonus = if subject.contains("offer") || subject.contains("congratulations") {
        Some(("subject:offer(+0.5)", 0.5))
    } else if subject.contains("interview") || subject.contains("schedule") {
        Some(("subject:interview(+0.4)", 0.4))
    } else if subject.contains("application") && subject.contains("received") {
        Some(("subject:application_received(+0.3)", 0.3))
    } else if subject.contains("job") || subject.contains("position") {
        Some(("subject:job(+0.2)", 0.2))
    } else {
        None
    };
    if let Some((reason, bonus)) = subject_bonus {
        score += bonus;
        reasons.push(reason.into());
    }

    if let Some(hit) = first_phrase_hit(input.content, &catalogs.negative_signals) {
        score -= 0.4;
        reasons.push(format!("negative:{hit}(-0.4)"));
    }

    if sender_looks_personal(input.from) {
        score += 0.2;
        reasons.push("sender:personal(+0.2)".into());
    }

    (score.clamp(0.0, 1.0), reasons)
}

/// Heuristic for a human sender: a real address whose local part carries a
/// name shape (dot-separated or camelCased), and no noreply marker.
pub fn sender_looks_personal(from: &str) -> bool {
    let folded = fold(from);
    if !folded.contains('@') || folded.contains("noreply") || folded.contains("no-reply") {
        return false;
    }
    let addr = match (from.find('<'), from.find('>')) {
        (Some(a), Some(b)) if b > a => &from[a + 1..b],
        _ => from,
    };
    let Some(at) = addr.find('@') else {
        return false;
    };
    let local = &addr[..at];
    if local.contains('.') {
        return true;
    }
    local
        .chars()
        .zip(local.chars().skip(1))
        .any(|(a, b)| a.is_lowercase() && b.is_uppercase())
}

/// Re-score one persisted record on the 0..=10 quality scale and decide
/// whether it should be cleaned up.
pub fn quality(catalogs: &Catalogs, record: &JobRecord) -> QualityRecord {
    let mut q: i32 = 5;
    let mut reasons = Vec::new();

    if !record.company.is_empty() && record.company != UNKNOWN_COMPANY && record.company.len() > 2 {
        q += 2;
        reasons.push("company:present(+2)".into());
    }
    if !record.position.is_empty()
        && record.position != UNKNOWN_POSITION
        && record.position.len() > 3
    {
        q += 2;
        reasons.push("position:present(+2)".into());
    }

    let from_folded = fold(&record.email_from);
    if !record.email_from.is_empty()
        && !from_folded.contains("noreply")
        && !from_folded.contains("no-reply")
    {
        q += 1;
        reasons.push("sender:non_noreply(+1)".into());
    }

    // Notification re-check against the stored fields; the raw body is gone.
    let content = format!("{} {}", record.email_subject, record.company);
    let notification_hit =
        notification_reason(catalogs, &record.email_from, &record.email_subject, &content)
            .or_else(|| {
                // Exact match only; substring matching would flag real names
                // that merely embed a generic word.
                let company = fold(&record.company);
                catalogs
                    .generic_company_terms
                    .iter()
                    .find(|t| **t == company)
                    .map(|hit| format!("generic_company:{hit}"))
            });
    if let Some(hit) = &notification_hit {
        q -= 5;
        reasons.push(format!("notification:{hit}(-5)"));
    }

    if catalogs.company_denylist.iter().any(|d| d == &record.company) {
        q -= 3;
        reasons.push("company:denylist(-3)".into());
    }
    if fold(&record.email_subject).contains("unsubscribe") {
        q -= 3;
        reasons.push("subject:unsubscribe(-3)".into());
    }

    let quality = q.clamp(0, 10) as u8;
    QualityRecord {
        id: record.id.clone(),
        company: record.company.clone(),
        position: record.position.clone(),
        email_from: record.email_from.clone(),
        email_subject: record.email_subject.clone(),
        quality,
        should_cleanup: quality < 3 || notification_hit.is_some(),
        reasons,
    }
}
