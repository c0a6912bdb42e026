use std::collections::BTreeSet;
use strsim::normalized_levenshtein;
use crate::core::phonetic::PhoneticEncoder;

/// Lexical similarity scores between two names, each on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexicalScores {
    pub order_invariant: f64,
    pub partial: f64,
    pub set_overlap: f64,
}

/// Compute all three lexical scores for a pair of names
pub fn lexical_scores(a: &str, b: &str) -> LexicalScores {
    LexicalScores {
        order_invariant: token_sort_ratio(a, b),
        partial: partial_ratio(a, b),
        set_overlap: token_set_ratio(a, b),
    }
}

/// Check whether two full strings share a phonetic code
#[inline]
pub fn phonetic_match<E: PhoneticEncoder + ?Sized>(encoder: &E, a: &str, b: &str) -> bool {
    encoder.sounds_alike(a, b)
}

/// Edit-distance similarity (0-100)
///
/// Normalized Levenshtein similarity scaled to 100. Zero when either side is
/// empty.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Similarity independent of word order
///
/// Tokens of both names are sorted and re-joined before comparison.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Best-alignment substring similarity
///
/// Slides the shorter string across every equal-length window of the longer
/// one and keeps the best [`ratio`]. A perfect substring scores 100.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let window_len = shorter.chars().count();
    let longer_chars: Vec<char> = longer.chars().collect();
    if window_len == longer_chars.len() {
        return ratio(shorter, longer);
    }

    let mut best = 0.0_f64;
    let mut window = String::with_capacity(longer.len());
    for chunk in longer_chars.windows(window_len) {
        window.clear();
        window.extend(chunk);

        best = best.max(ratio(shorter, &window));
        if best >= 100.0 {
            break;
        }
    }

    best
}

/// Similarity from token set intersection and differences
///
/// With `t0` the sorted intersection, `t1 = t0 + (a - b)` and
/// `t2 = t0 + (b - a)`, the score is the best of `ratio(t0, t1)`,
/// `ratio(t0, t2)` and `ratio(t1, t2)`. Repeated and extra tokens on one
/// side therefore cost little.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = join(tokens_a.intersection(&tokens_b));
    let diff_ab = join(tokens_a.difference(&tokens_b));
    let diff_ba = join(tokens_b.difference(&tokens_a));

    let t1 = concat(&intersection, &diff_ab);
    let t2 = concat(&intersection, &diff_ba);

    ratio(&intersection, &t1)
        .max(ratio(&intersection, &t2))
        .max(ratio(&t1, &t2))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<'a, 'b: 'a>(tokens: impl Iterator<Item = &'a &'b str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn concat(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{} {}", head, tail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::phonetic::DoubleMetaphoneEncoder;

    #[test]
    fn test_ratio_bounds() {
        assert_eq!(ratio("ram", "ram"), 100.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("", "ram"), 0.0);
        assert_eq!(ratio("", ""), 0.0);
    }

    #[test]
    fn test_token_sort_ignores_order() {
        assert_eq!(token_sort_ratio("kumar ram", "ram kumar"), 100.0);
        assert!(token_sort_ratio("ram kumar", "ram singh") < 100.0);
    }

    #[test]
    fn test_partial_ratio_substring() {
        assert_eq!(partial_ratio("ram", "ramkumar so suresh"), 100.0);
        assert_eq!(partial_ratio("ramkumar so suresh", "ram"), 100.0);
        assert!(partial_ratio("smith", "maria") < 60.0);
    }

    #[test]
    fn test_partial_ratio_equal_length() {
        assert_eq!(partial_ratio("ram", "ram"), 100.0);
        assert!(partial_ratio("ram", "rom") > 60.0);
    }

    #[test]
    fn test_token_set_subset_scores_full() {
        assert_eq!(token_set_ratio("ram kumar", "ram kumar singh"), 100.0);
        assert_eq!(token_set_ratio("ram ram kumar", "kumar ram"), 100.0);
    }

    #[test]
    fn test_token_set_disjoint() {
        let score = token_set_ratio("jon smith", "maria garcia");
        assert!(score < 50.0, "Disjoint names scored {}", score);
    }

    #[test]
    fn test_token_set_empty() {
        assert_eq!(token_set_ratio("", "ram"), 0.0);
        assert_eq!(token_set_ratio("ram", "   "), 0.0);
    }

    #[test]
    fn test_scores_in_range() {
        let pairs = [
            ("ram kumar", "kumar ram"),
            ("jon smith", "maria garcia"),
            ("a", "abcdefgh"),
            ("sita devi", "sita"),
        ];
        for (a, b) in pairs {
            let scores = lexical_scores(a, b);
            for score in [scores.order_invariant, scores.partial, scores.set_overlap] {
                assert!((0.0..=100.0).contains(&score), "{} / {} -> {}", a, b, score);
            }
        }
    }

    #[test]
    fn test_appending_shared_token_does_not_lower_scores() {
        let reference = "ram kumar singh";
        let before = lexical_scores("ram", reference);
        let after = lexical_scores("ram kumar", reference);

        assert!(after.order_invariant >= before.order_invariant);
        assert!(after.set_overlap >= before.set_overlap);
    }

    #[test]
    fn test_phonetic_match() {
        let encoder = DoubleMetaphoneEncoder;

        assert!(phonetic_match(&encoder, "steven", "stephen"));
        assert!(!phonetic_match(&encoder, "jon smith", "maria garcia"));
    }
}
