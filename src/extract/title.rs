// src/extract/title.rs
//! Multi-pattern role-title extraction.
//!
//! Ordered structural patterns over `subject + " " + content`, then a
//! curated literal title list, then generic/leveled fallbacks. First match
//! that survives validation wins. Accepted titles are normalized to title
//! case word by word; the normalization is idempotent.

use crate::catalogs::Catalogs;
use crate::normalize::{fold, title_case};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub struct TitleHit {
    pub title: String,
    pub pattern: &'static str,
}

static TITLE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    let word = r"[A-Za-z][A-Za-z/\- ]{1,58}?";
    vec![
        (
            "for_as",
            Regex::new(&format!(
                r"(?i)\b(?:for|as)\s+(?:an?\s+|the\s+)?(?P<t>{word})\s+(?:position|role|job|at)\b"
            ))
            .expect("for_as pattern"),
        ),
        (
            "title_of",
            Regex::new(&format!(
                r"(?i)\b(?:position|role|job|title)\s+of\s+(?P<t>[A-Za-z][A-Za-z/\- ]{{2,58}})"
            ))
            .expect("title_of pattern"),
        ),
        (
            "applied_for",
            Regex::new(&format!(
                r"(?i)\bappl(?:ied|ying)\s+for\s+(?:the\s+)?(?P<t>{word})\s+(?:position|role|job|at)\b"
            ))
            .expect("applied_for pattern"),
        ),
        (
            "interested_in",
            Regex::new(&format!(
                r"(?i)\b(?:interested\s+in|regarding)\s+(?:the\s+)?(?P<t>{word})\s+(?:position|role|opening|opportunity|at)\b"
            ))
            .expect("interested_in pattern"),
        ),
        (
            "opening_for",
            Regex::new(&format!(
                r"(?i)\b(?:opening|opportunity|vacancy)\s+for\s+(?:an?\s+)?(?P<t>{word})\s+(?:position|role|at)\b"
            ))
            .expect("opening_for pattern"),
        ),
    ]
});

/// Subject-line pattern: "Re: application ... for X" with X running to the
/// end of the subject.
static RE_SUBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^re:\s.{0,60}?\b(?:application|interested|interview)\b.{0,40}?\bfor\s+(?:the\s+)?(?P<t>[A-Za-z][A-Za-z/\- ]{2,58})$")
        .expect("subject pattern")
});

/// Generic "<something> engineer position" fallback.
static RE_GENERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?P<t>(?:[A-Za-z/\-]+\s+){0,3}(?:engineer|developer|designer|manager|analyst|scientist|architect|consultant|specialist|administrator|intern))\s+(?:position|role)\b",
    )
    .expect("generic pattern")
});

/// Leveled titles: "(senior|lead|...) <domain> engineer".
static RE_LEVELED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?P<t>(?:senior|lead|principal|staff|junior)\s+[A-Za-z/\-]+(?:\s+[A-Za-z/\-]+)?\s+(?:engineer|developer|designer|manager|analyst|scientist|architect))\b",
    )
    .expect("leveled pattern")
});

pub fn extract_title(catalogs: &Catalogs, subject: &str, content: &str) -> Option<TitleHit> {
    let haystack = format!("{subject} {content}");

    for (id, re) in TITLE_PATTERNS.iter() {
        if let Some(caps) = re.captures(&haystack) {
            if let Some(title) = validate(catalogs, caps.name("t").map_or("", |m| m.as_str())) {
                return Some(TitleHit { title, pattern: id });
            }
        }
    }

    if let Some(caps) = RE_SUBJECT.captures(subject.trim()) {
        if let Some(title) = validate(catalogs, caps.name("t").map_or("", |m| m.as_str())) {
            return Some(TitleHit { title, pattern: "subject_re" });
        }
    }

    // Curated literal titles; prefer the longest contained one so
    // "senior software engineer" beats "software engineer".
    let folded = fold(&haystack);
    if let Some(known) = catalogs
        .curated_titles
        .iter()
        .filter(|t| folded.contains(fold(t).as_str()))
        .max_by_key(|t| t.len())
    {
        return Some(TitleHit {
            title: title_case(known),
            pattern: "curated",
        });
    }

    if let Some(caps) = RE_GENERIC.captures(&haystack) {
        if let Some(title) = validate(catalogs, caps.name("t").map_or("", |m| m.as_str())) {
            return Some(TitleHit { title, pattern: "generic_role" });
        }
    }
    if let Some(caps) = RE_LEVELED.captures(&haystack) {
        if let Some(title) = validate(catalogs, caps.name("t").map_or("", |m| m.as_str())) {
            return Some(TitleHit { title, pattern: "leveled" });
        }
    }
    None
}

/// Post-match validation and canonicalization.
fn validate(catalogs: &Catalogs, raw: &str) -> Option<String> {
    // Keep word chars, spaces, slashes and hyphens only.
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '/' | '-' | '_'))
        .collect();
    let kept = kept.split_whitespace().collect::<Vec<_>>().join(" ");

    if kept.len() < 3 || kept.len() > 50 {
        return None;
    }
    if !kept.chars().any(|c| c.is_alphabetic()) {
        return None;
    }
    if kept.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let folded = fold(&kept);
    if catalogs.title_stopwords.iter().any(|s| s == &folded) {
        return None;
    }
    // A stopword at either edge means the capture grabbed filler ("your
    // interest in the") rather than a role name.
    let is_stop = |w: &str| catalogs.title_stopwords.iter().any(|s| s == w);
    let mut words = folded.split(' ');
    if words.next().is_some_and(is_stop) || words.next_back().is_some_and(is_stop) {
        return None;
    }
    Some(title_case(&kept))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> Catalogs {
        Catalogs::builtin()
    }

    #[test]
    fn for_position_pattern() {
        let hit = extract_title(
            &cat(),
            "Thanks for applying",
            "You applied for the Backend Engineer position at Initech.",
        )
        .unwrap();
        assert_eq!(hit.title, "Backend Engineer");
    }

    #[test]
    fn curated_title_in_subject() {
        let hit = extract_title(
            &cat(),
            "Interview Invitation - Full Stack Developer Role",
            "We would like to schedule an interview.",
        )
        .unwrap();
        assert_eq!(hit.title, "Full Stack Developer");
    }

    #[test]
    fn longest_curated_title_wins() {
        let hit = extract_title(
            &cat(),
            "Update",
            "Regarding the senior software engineer opening we discussed.",
        )
        .unwrap();
        assert_eq!(hit.title, "Senior Software Engineer");
    }

    #[test]
    fn leveled_pattern_fallback() {
        let hit = extract_title(
            &cat(),
            "Next steps",
            "We think you would thrive as our Lead Platform Engineer here.",
        )
        .unwrap();
        assert_eq!(hit.title, "Lead Platform Engineer");
    }

    #[test]
    fn stopword_captures_are_rejected() {
        assert!(validate(&cat(), "position").is_none());
        assert!(validate(&cat(), "the").is_none());
        assert!(validate(&cat(), "12345").is_none());
        assert!(validate(&cat(), "ab").is_none());
    }

    #[test]
    fn accepted_titles_are_title_cased_idempotently() {
        let t = validate(&cat(), "full stack developer").unwrap();
        assert_eq!(t, "Full Stack Developer");
        assert_eq!(title_case(&t), t);
    }

    #[test]
    fn filler_only_captures_are_rejected() {
        // "for ... position" fires, but the capture is all connective tissue.
        let hit = extract_title(
            &cat(),
            "Re: your application",
            "Thanks for your interest in the position.",
        );
        assert!(hit.is_none(), "got {hit:?}");
        assert!(validate(&cat(), "your interest in the").is_none());
    }

    #[test]
    fn marketing_blast_yields_nothing() {
        let hit = extract_title(
            &cat(),
            "Exciting opportunities at Company",
            "We have multiple positions available. Check out these roles...",
        );
        assert!(hit.is_none(), "got {hit:?}");
    }
}
