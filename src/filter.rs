// src/filter.rs
//! The two gates in front of extraction: the notification filter (strict,
//! short-circuiting) and the job-relatedness detector.

use crate::catalogs::Catalogs;
use crate::normalize::{first_phrase_hit, fold};

/// Decide whether a message is an automated job-board/marketing
/// notification. Returns the matched pattern (as a `kind:pattern` marker)
/// so the rejection stays traceable; `None` means the gate passes.
///
/// Pure predicate over `(from, subject, content)`; `content` is expected to
/// be the subject+body concatenation.
pub fn notification_reason(
    catalogs: &Catalogs,
    from: &str,
    subject: &str,
    content: &str,
) -> Option<String> {
    let from_folded = fold(from);
    let subject_folded = fold(subject);
    let content_folded = fold(content);

    if let Some(hit) = first_phrase_hit(&from_folded, &catalogs.notification_senders) {
        return Some(format!("sender:{hit}"));
    }
    if let Some(hit) = first_phrase_hit(&content_folded, &catalogs.notification_phrases)
        .or_else(|| first_phrase_hit(&subject_folded, &catalogs.notification_phrases))
    {
        return Some(format!("phrase:{hit}"));
    }
    if let Some(hit) = first_phrase_hit(&content_folded, &catalogs.automated_disclosures) {
        return Some(format!("automated:{hit}"));
    }
    if let Some(hit) = first_phrase_hit(&subject_folded, &catalogs.automated_subject_tags) {
        return Some(format!("subject_tag:{hit}"));
    }
    None
}

/// Decide whether a surviving message concerns a job application at all.
/// Precondition: the notification filter already passed.
pub fn is_job_related(catalogs: &Catalogs, from: &str, content: &str) -> bool {
    let from_folded = fold(from);
    let content_folded = fold(content);

    if first_phrase_hit(&content_folded, &catalogs.job_keywords).is_some() {
        return true;
    }
    if first_phrase_hit(&from_folded, &catalogs.job_site_domains).is_some() {
        return true;
    }
    first_phrase_hit(&content_folded, &catalogs.recruiter_indicators).is_some()
        || first_phrase_hit(&from_folded, &catalogs.recruiter_indicators).is_some()
}
