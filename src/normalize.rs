// src/normalize.rs
//! Text normalization primitives shared by every classifier stage.
//!
//! All catalog matching in this crate is plain substring containment over
//! lowercased, whitespace-collapsed text. Message bodies arrive as plain text
//! or near-plain HTML; `normalize_body` is the explicit HTML-to-text
//! precondition of the classifier, not an inline afterthought.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|</p>|</div>|</tr>|</li>").expect("break regex"));
static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
// Horizontal whitespace only; newlines are handled separately.
static RE_HSPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").expect("hspace regex"));
static RE_VSPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").expect("vspace regex"));

/// Normalize an email body to plain text: entities decoded, tags dropped,
/// curly quotes straightened, whitespace collapsed. Block-level tags and
/// hard line breaks survive as single newlines — line-oriented extraction
/// (signature blocks naming the employer) needs the line structure.
pub fn normalize_body(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);
    let text = RE_BREAKS.replace_all(&decoded, "\n");
    let text = RE_TAGS.replace_all(&text, " ");
    let text = text
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");
    let text = RE_HSPACE.replace_all(&text, " ");
    let text = RE_VSPACE.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Lowercase + collapse whitespace. Applied to both sides of every
/// catalog containment check.
pub fn fold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        let lc = ch.to_ascii_lowercase();
        if lc.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(lc);
            last_space = false;
        }
    }
    out.trim().to_string()
}

/// Case/whitespace-insensitive substring containment.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    let p = fold(phrase);
    if p.is_empty() {
        return true;
    }
    fold(text).contains(p.as_str())
}

/// Containment check against pre-folded text; returns the phrase that hit.
pub fn first_phrase_hit<'a>(folded_text: &str, phrases: &'a [String]) -> Option<&'a str> {
    phrases.iter().map(|p| p.as_str()).find(|p| {
        let needle = fold(p);
        !needle.is_empty() && folded_text.contains(needle.as_str())
    })
}

/// Short stable id for diagnostics; raw message text and addresses never
/// reach the logs.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    Sha256::digest(text.as_bytes())
        .iter()
        .take(6)
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Title-case a phrase word by word ("full stack developer" -> "Full Stack
/// Developer"). Idempotent: applying it twice yields the same string.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
