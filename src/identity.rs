//! Normalization of identity fields harvested from provider responses.
//!
//! Providers return names in wildly inconsistent shapes: stray whitespace,
//! trailing newlines, lowercased tokens, or nothing at all beyond an email
//! address. These helpers turn that free text into presentable first/last/full
//! names. All functions are pure and total; insufficient input yields `None`
//! rather than an error.

use std::sync::LazyLock;

use regex::Regex;

// First `letters[._]letters` substring of an email local part, e.g.
// "john.doe" or "jane_roe". Anchoring is intentionally absent: the first
// matching substring wins even when surrounded by digits or other text.
static NAME_IN_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([a-z]+)[._]([a-z]+)").expect("invalid name pattern"));

/// Name fields derived for a single contact.
///
/// `full` is always present whenever `first` or `last` is; all three are
/// `None` only when no plausible name could be derived.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Name {
    /// Given name, if one could be derived.
    pub first: Option<String>,
    /// Family name, if one could be derived.
    pub last: Option<String>,
    /// Composed display name, present whenever `first` or `last` is.
    pub full: Option<String>,
}

/// Normalizes a free-text name.
///
/// Strips a single trailing newline, collapses whitespace runs, trims, and
/// forces the first letter of each token to uppercase. The rest of each token
/// is left untouched, so an all-caps surname survives normalization.
/// Idempotent: applying it twice yields the same result as once.
pub fn normalize_name(name: Option<&str>) -> Option<String> {
    let name = name?;
    let name = name.strip_suffix('\n').unwrap_or(name);
    let normalized = name
        .split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ");
    Some(normalized)
}

/// Composes a display name from individual first and last names.
///
/// Returns `"first last"` when both are present, the sole present name when
/// only one is, and `None` when neither is.
pub fn full_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    match (first, last) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        (Some(first), None) => Some(first.to_string()),
        (None, Some(last)) => Some(last.to_string()),
        (None, None) => None,
    }
}

/// Derives a name from an email address or bare username.
///
/// Takes the local part before the first `@` (or the whole identifier when
/// there is none). A local part containing a `letters[._]letters` substring
/// splits into first and last name; anything else normalizes as a single
/// token with no last name.
pub fn email_to_name(identifier: &str) -> Name {
    let local_part = identifier.split('@').next().unwrap_or(identifier);

    if let Some(caps) = NAME_IN_EMAIL.captures(local_part) {
        let first = normalize_name(Some(&caps[1]));
        let last = normalize_name(Some(&caps[2]));
        let full = full_name(first.as_deref(), last.as_deref());
        return Name { first, last, full };
    }

    let single = normalize_name(Some(local_part));
    Name {
        first: single.clone(),
        last: None,
        full: single,
    }
}

fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
