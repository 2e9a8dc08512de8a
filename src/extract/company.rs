// src/extract/company.rs
//! Multi-strategy employer-name extraction.
//!
//! Ordered strategies, first non-generic hit wins:
//! 1. sender domain (minus free-mail/job-board/ATS/notification domains)
//! 2. textual patterns over `subject + " " + body`
//! 3. sender display name (minus two-word personal names)
//!
//! Returns `None` when nothing survives the generic-term filters; callers
//! apply their own "Unknown Company" substitution policy.

use crate::catalogs::Catalogs;
use crate::normalize::fold;
use once_cell::sync::Lazy;
use regex::Regex;

/// A successful extraction plus the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyHit {
    pub name: String,
    pub strategy: &'static str,
}

/// Capitalized-phrase patterns, tried in order. No `(?i)`: the capital
/// letter requirement is what keeps these from matching arbitrary prose.
static COMPANY_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    let caps = r"[A-Z][\w&.'-]*(?:\s+[A-Z][\w&.'-]*)";
    vec![
        (
            "from_team",
            Regex::new(&format!(
                r"\b[Ff]rom\s+(?P<c>{caps}{{0,3}})\s+(?:[Tt]eam|[Hh]iring|HR|[Rr]ecruiting)\b"
            ))
            .expect("from_team pattern"),
        ),
        (
            "at_with_for",
            Regex::new(&format!(r"\b(?:at|with|for)\s+(?P<c>{caps}{{0,3}})")).expect("at pattern"),
        ),
        (
            "corporate_suffix",
            Regex::new(&format!(r"\b(?P<c>{caps}{{0,2}}),?\s+(?:Inc|Corp|LLC|Ltd)\b"))
                .expect("suffix pattern"),
        ),
        (
            "we_are",
            Regex::new(&format!(r"\b(?:[Ww]e are|I work at)\s+(?P<c>{caps}{{0,3}})"))
                .expect("we_are pattern"),
        ),
        (
            "standalone_line",
            Regex::new(&format!(r"(?m)^\s*(?P<c>{caps}{{0,2}})\s*$")).expect("line pattern"),
        ),
    ]
});

pub fn extract_company(
    catalogs: &Catalogs,
    from: &str,
    subject: &str,
    body: &str,
) -> Option<CompanyHit> {
    if let Some(name) = from_domain(catalogs, from) {
        return Some(CompanyHit { name, strategy: "domain" });
    }
    let haystack = format!("{subject} {body}");
    for (id, re) in COMPANY_PATTERNS.iter() {
        if let Some(caps) = re.captures(&haystack) {
            if let Some(name) = validate(catalogs, caps.name("c").map_or("", |m| m.as_str())) {
                return Some(CompanyHit { name, strategy: id });
            }
        }
    }
    if let Some(name) = from_display_name(catalogs, from) {
        return Some(CompanyHit { name, strategy: "display_name" });
    }
    None
}

/// Strategy 1: employer from the sender's mail domain.
fn from_domain(catalogs: &Catalogs, from: &str) -> Option<String> {
    let addr = address_part(from);
    let at = addr.find('@')?;
    let mut domain = addr[at + 1..].trim().to_ascii_lowercase();

    for prefix in ["www.", "mail.", "hr.", "jobs.", "careers.", "recruiting."] {
        if let Some(rest) = domain.strip_prefix(prefix) {
            domain = rest.to_string();
        }
    }

    let label = domain.split('.').next()?.trim_matches('-');
    if label.len() < 2 {
        return None;
    }
    if catalogs.excluded_domains.iter().any(|d| d == label) {
        return None;
    }

    // Trailing corporate suffixes: "acmecorp" -> "acme". Bare "co" is only
    // stripped after a hyphen so names like "cisco" stay intact.
    let mut core = label;
    for suffix in ["corp", "inc", "llc", "ltd"] {
        if let Some(rest) = core.strip_suffix(suffix) {
            let rest = rest.trim_end_matches('-');
            if rest.len() >= 3 {
                core = rest;
                break;
            }
        }
    }
    if let Some(rest) = core.strip_suffix("-co") {
        if rest.len() >= 3 {
            core = rest;
        }
    }

    let mut chars = core.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + chars.as_str())
}

/// Strategy 3: sender display name, unless it looks like a person.
fn from_display_name(catalogs: &Catalogs, from: &str) -> Option<String> {
    let lt = from.find('<')?;
    let display = from[..lt].trim().trim_matches('"').trim();
    if display.is_empty() || display.contains('@') {
        return None;
    }
    if looks_like_personal_name(display) {
        return None;
    }
    validate(catalogs, display)
}

/// Two capitalized words of length >= 2 each reads as "First Last".
fn looks_like_personal_name(s: &str) -> bool {
    let words: Vec<&str> = s.split_whitespace().collect();
    words.len() == 2
        && words.iter().all(|w| {
            w.len() >= 2 && w.chars().next().is_some_and(|c| c.is_uppercase())
        })
}

/// Generic-term and shape filtering applied to every candidate string.
fn validate(catalogs: &Catalogs, raw: &str) -> Option<String> {
    let mut candidate = raw.trim().to_string();

    // Drop trailing organizational words so "Acme Recruiting" -> "Acme".
    loop {
        let Some(last) = candidate.split_whitespace().last() else {
            return None;
        };
        if candidate.split_whitespace().count() > 1
            && catalogs.generic_company_terms.iter().any(|t| t == &fold(last))
        {
            candidate = candidate[..candidate.len() - last.len()].trim_end().to_string();
        } else {
            break;
        }
    }

    let stripped: String = candidate
        .trim_matches(|c: char| !c.is_alphanumeric())
        .trim()
        .to_string();
    if stripped.len() < 2 || stripped.len() > 50 {
        return None;
    }
    if stripped.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if catalogs.generic_company_terms.iter().any(|t| t == &fold(&stripped)) {
        return None;
    }
    // A generic leading word means the capture ran past the real phrase
    // boundary ("at Company We have..." captures "Company We").
    if let Some(first) = stripped.split_whitespace().next() {
        if catalogs.generic_company_terms.iter().any(|t| t == &fold(first)) {
            return None;
        }
    }
    Some(stripped)
}

/// Address inside angle brackets, or the whole header when there are none.
fn address_part(from: &str) -> &str {
    match (from.find('<'), from.find('>')) {
        (Some(a), Some(b)) if b > a => &from[a + 1..b],
        _ => from,
    }
}
