use std::cmp::Ordering;
use std::collections::HashMap;
use crate::core::normalize::normalize_name;

/// Tokens must be strictly longer than this to be kept
pub const MIN_TOKEN_LENGTH: usize = 2;

/// Tokens must occur at least this many times across the corpus
pub const MIN_TOKEN_OCCURRENCES: usize = 2;

/// Corpus-derived set of known name fragments
///
/// Built once over the reference column and shared read-only by every row
/// evaluation. Tokens are stored longest first, ties broken
/// lexicographically, so segmentation is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenDictionary {
    tokens: Vec<String>,
}

impl TokenDictionary {
    /// Build the dictionary from raw reference names
    ///
    /// Every value is normalized and split on whitespace. Tokens longer than
    /// [`MIN_TOKEN_LENGTH`] that occur at least [`MIN_TOKEN_OCCURRENCES`]
    /// times are kept. An empty corpus yields an empty dictionary.
    pub fn build<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();

        for name in names {
            let normalized = normalize_name(name.as_ref());
            for token in normalized.split_whitespace() {
                *counts.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        let tokens = counts
            .into_iter()
            .filter(|(token, count)| {
                token.chars().count() > MIN_TOKEN_LENGTH && *count >= MIN_TOKEN_OCCURRENCES
            })
            .map(|(token, _)| token);

        Self::from_tokens(tokens)
    }

    /// Dictionary from an explicit token list, bypassing frequency filtering
    ///
    /// Tokens are normalized; empty and duplicate entries are dropped.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens: Vec<String> = tokens
            .into_iter()
            .map(|t| normalize_name(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();

        tokens.sort_by(|a, b| segmentation_order(a, b));
        tokens.dedup();

        Self { tokens }
    }

    /// Tokens in segmentation order (longest first, then lexicographic)
    pub fn longest_first(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens
            .binary_search_by(|t| segmentation_order(t, token))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Longest first, then lexicographic
fn segmentation_order(a: &str, b: &str) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| a.cmp(b))
}
