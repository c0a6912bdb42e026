use once_cell::sync::Lazy;
use regex::Regex;

/// Relational annotations ("son/wife/daughter of") and anything after a colon
static RELATION_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bso\b|\bs/o\b|\bw/o\b|\bd/o\b|:").expect("relation separator pattern is valid")
});

/// Canonicalize a raw name
///
/// Lower-cases the input, drops every character that is not an ASCII letter
/// or whitespace, collapses whitespace runs to a single space and trims.
/// Never fails: empty or non-alphabetic input yields an empty string.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for ch in raw.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else if ch.is_whitespace() {
            pending_space = true;
        }
    }

    out
}

/// Leading personal-name segment of a name
///
/// Cuts at the first `so`, `s/o`, `w/o`, `d/o` (whole words) or `:`.
/// Returns the trimmed input when no separator is present.
pub fn extract_core_name(name: &str) -> &str {
    match RELATION_SEPARATOR.find(name) {
        Some(m) => name[..m.start()].trim(),
        None => name.trim(),
    }
}
