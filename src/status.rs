// src/status.rs
//! Pipeline-stage classification.
//!
//! Ordered keyword-set matching over the message content. The priority
//! between sets (applied -> interviewing -> offered -> rejected) is an
//! explicit contract from `Catalogs::status_priority`. A keyword match
//! always wins; the date-based "ghosted" fallback applies only when no
//! keyword set matched, the content still mentions an application, and the
//! message is older than the configured window.

use crate::catalogs::Catalogs;
use crate::normalize::{first_phrase_hit, fold};
use crate::types::Status;
use chrono::{DateTime, Duration, Utc};

/// Default age after which a keyword-less "application" message counts as
/// ghosted.
pub const DEFAULT_GHOST_AFTER_DAYS: i64 = 14;

/// Classify message content into a pipeline stage, with the matched phrase
/// (if any) returned for the explainability trail.
pub fn classify_status(
    catalogs: &Catalogs,
    content: &str,
    date: DateTime<Utc>,
    now: DateTime<Utc>,
    ghost_after_days: i64,
) -> (Status, Option<String>) {
    let folded = fold(content);

    for (status, phrases) in catalogs.status_priority() {
        if let Some(hit) = first_phrase_hit(&folded, phrases) {
            return (status, Some(format!("status:{hit}")));
        }
    }

    let age = now.signed_duration_since(date);
    if age > Duration::days(ghost_after_days) && folded.contains("application") {
        return (
            Status::Ghosted,
            Some(format!("status:stale_application>{ghost_after_days}d")),
        );
    }

    (Status::Applied, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cat() -> Catalogs {
        Catalogs::builtin()
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn applied_phrases_win_first() {
        let (s, hit) = classify_status(
            &cat(),
            "We have received your application and will be in touch.",
            at(1),
            at(2),
            DEFAULT_GHOST_AFTER_DAYS,
        );
        assert_eq!(s, Status::Applied);
        assert!(hit.unwrap().contains("we have received your application"));
    }

    #[test]
    fn interview_phrase_classifies_interviewing() {
        let (s, _) = classify_status(
            &cat(),
            "Can we schedule an interview next week?",
            at(1),
            at(2),
            DEFAULT_GHOST_AFTER_DAYS,
        );
        assert_eq!(s, Status::Interviewing);
    }

    #[test]
    fn move_forward_without_a_scheduled_call_is_interviewing() {
        let (s, _) = classify_status(
            &cat(),
            "We'd like to move forward to the next stage with your candidacy.",
            at(1),
            at(2),
            DEFAULT_GHOST_AFTER_DAYS,
        );
        assert_eq!(s, Status::Interviewing);

        // "not moving forward" must still read as a rejection.
        let (s, _) = classify_status(
            &cat(),
            "We are not moving forward with your candidacy.",
            at(1),
            at(2),
            DEFAULT_GHOST_AFTER_DAYS,
        );
        assert_eq!(s, Status::Rejected);
    }

    #[test]
    fn offer_and_rejection_phrases() {
        let (s, _) = classify_status(
            &cat(),
            "Congratulations! Details of your compensation are attached.",
            at(1),
            at(2),
            DEFAULT_GHOST_AFTER_DAYS,
        );
        assert_eq!(s, Status::Offered);

        let (s, _) = classify_status(
            &cat(),
            "We decided to go in a different direction this quarter.",
            at(1),
            at(2),
            DEFAULT_GHOST_AFTER_DAYS,
        );
        assert_eq!(s, Status::Rejected);
    }

    #[test]
    fn keyword_match_beats_ghosted_fallback() {
        // Old message, but an explicit rejection phrase still wins.
        let (s, _) = classify_status(
            &cat(),
            "Unfortunately your application was not selected.",
            at(1),
            at(30),
            DEFAULT_GHOST_AFTER_DAYS,
        );
        assert_eq!(s, Status::Rejected);
    }

    #[test]
    fn stale_application_without_keywords_is_ghosted() {
        let (s, hit) = classify_status(
            &cat(),
            "Following up on my application from last month.",
            at(1),
            at(30),
            DEFAULT_GHOST_AFTER_DAYS,
        );
        assert_eq!(s, Status::Ghosted);
        assert!(hit.unwrap().contains("stale_application"));
    }

    #[test]
    fn default_is_applied() {
        let (s, hit) = classify_status(
            &cat(),
            "Nice meeting you at the conference.",
            at(1),
            at(2),
            DEFAULT_GHOST_AFTER_DAYS,
        );
        assert_eq!(s, Status::Applied);
        assert!(hit.is_none());
    }
}
