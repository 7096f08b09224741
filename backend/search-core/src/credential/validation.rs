//! Cheap local checks on credential candidates.
//!
//! These never talk to the provider. They only reject values that are
//! obviously not a key before a probe or an outbound request would spend a
//! network round trip on them.

use once_cell::sync::Lazy;
use regex::Regex;

/// Candidates shorter than this (after trimming) are rejected without a probe.
pub const MIN_CANDIDATE_LENGTH: usize = 5;

/// True when `candidate` is long enough to be worth probing.
pub fn is_plausible_candidate(candidate: &str) -> bool {
    candidate.trim().chars().count() >= MIN_CANDIDATE_LENGTH
}

/// Whole-value templates from sample `.env` files.
static TEMPLATE_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:your[-_ ]?(?:gemini[-_ ]?|google[-_ ]?)?api[-_ ]?key(?:[-_ ]?here)?|placeholder|replace[-_ ]?me|changeme|\.{3,})$",
    )
    .expect("template pattern is valid")
});

/// Detect template values copied from a sample `.env` file.
///
/// The whole trimmed value must be a template: a key that merely contains
/// `xxx` or `your` somewhere is not a placeholder. Returns the matched rule.
pub fn detect_placeholder(value: &str) -> Option<&'static str> {
    let lower = value.trim().to_lowercase();

    if lower.starts_with('<') && lower.ends_with('>') {
        return Some("<...>");
    }

    if TEMPLATE_VALUE.is_match(&lower) {
        return Some("template");
    }

    let mut chars = lower.chars();
    if let Some(first) = chars.next()
        && lower.chars().count() >= 3
        && chars.all(|c| c == first)
    {
        return Some("repeated_char");
    }

    None
}
