use rayon::prelude::*;
use crate::models::{RawNamePair, EvidenceVector, MatchThresholds, ReconcileSummary, Verdict};
use crate::core::{
    dictionary::TokenDictionary,
    normalize::{extract_core_name, normalize_name},
    phonetic::{DoubleMetaphoneEncoder, PhoneticEncoder},
    similarity::{lexical_scores, partial_ratio, phonetic_match, LexicalScores},
    splitter::split_joined_name,
};

/// Result of reconciling a batch of records
#[derive(Debug)]
pub struct ReconcileResult {
    /// One evidence vector per input record, in input order
    pub evidence: Vec<EvidenceVector>,
    pub summary: ReconcileSummary,
}

/// Name match orchestrator
///
/// # Pipeline Stages
/// 1. Token dictionary over the reference column (once per batch)
/// 2. Normalization and relational-suffix stripping
/// 3. Dictionary-driven splitting of the subject name
/// 4. Lexical, phonetic and token-level signals
/// 5. Threshold policy
#[derive(Debug, Clone)]
pub struct NameMatcher<E = DoubleMetaphoneEncoder> {
    thresholds: MatchThresholds,
    encoder: E,
}

impl NameMatcher {
    pub fn new(thresholds: MatchThresholds) -> Self {
        Self {
            thresholds,
            encoder: DoubleMetaphoneEncoder,
        }
    }

    pub fn with_default_thresholds() -> Self {
        Self::new(MatchThresholds::default())
    }
}

impl<E: PhoneticEncoder> NameMatcher<E> {
    /// Matcher with an alternate phonetic algorithm
    pub fn with_encoder(thresholds: MatchThresholds, encoder: E) -> Self {
        Self { thresholds, encoder }
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    /// Reconcile a batch of records
    ///
    /// Builds the token dictionary over every reference name first, then
    /// evaluates each record independently in parallel. Evidence comes back
    /// in input order.
    pub fn reconcile(&self, pairs: &[RawNamePair]) -> ReconcileResult {
        let dictionary =
            TokenDictionary::build(pairs.iter().map(|pair| pair.reference_name.as_str()));

        tracing::debug!(
            "Built token dictionary with {} tokens from {} reference names",
            dictionary.len(),
            pairs.len()
        );

        let evidence: Vec<EvidenceVector> = pairs
            .par_iter()
            .map(|pair| self.evaluate(pair, &dictionary))
            .collect();

        let matched = evidence.iter().filter(|e| e.is_match()).count();
        let summary = ReconcileSummary {
            total_rows: evidence.len(),
            matched,
            mismatched: evidence.len() - matched,
            dictionary_size: dictionary.len(),
        };

        tracing::info!(
            "Reconciled {} rows: {} matching, {} mismatched",
            summary.total_rows,
            summary.matched,
            summary.mismatched
        );

        ReconcileResult { evidence, summary }
    }

    /// Decide whether one record's names denote the same person
    ///
    /// Pure function of the pair, the dictionary and the thresholds.
    pub fn evaluate(&self, pair: &RawNamePair, dictionary: &TokenDictionary) -> EvidenceVector {
        let subject = normalize_name(&pair.subject_name);
        let reference = normalize_name(&pair.reference_name);

        // Compare against the person's own name, not the "s/o ..." annotation
        let core = extract_core_name(&reference);
        let target = if core.is_empty() { reference.as_str() } else { core };

        let farmer_split = split_joined_name(&subject, dictionary);

        let scores = lexical_scores(&farmer_split, target);

        let phonetic = phonetic_match(&self.encoder, &farmer_split, target)
            || phonetic_match(&self.encoder, &subject, target);

        let token_match = self.token_match(&subject, &reference);

        let remark = self.decide(&scores, phonetic, token_match);

        tracing::trace!(
            "{:?} vs {:?}: split={:?} main={:.1} partial={:.1} set={:.1} phonetic={} token={} -> {}",
            subject,
            reference,
            farmer_split,
            scores.order_invariant,
            scores.partial,
            scores.set_overlap,
            phonetic,
            token_match,
            remark
        );

        EvidenceVector {
            farmer_split,
            score_main: scores.order_invariant,
            score_partial: scores.partial,
            score_set: scores.set_overlap,
            phonetic_match: phonetic,
            token_match,
            remark,
        }
    }

    /// Check whether any single reference token decides the match
    ///
    /// True as soon as one token of `reference` is well contained in
    /// `subject` (partial score at or above the token threshold) or sounds
    /// like the whole subject name.
    pub fn token_match(&self, subject: &str, reference: &str) -> bool {
        reference.split_whitespace().any(|token| {
            partial_ratio(subject, token) >= self.thresholds.token
                || phonetic_match(&self.encoder, subject, token)
        })
    }

    /// Apply the threshold policy; the first satisfied path wins
    pub fn decide(&self, scores: &LexicalScores, phonetic: bool, token_match: bool) -> Verdict {
        let t = &self.thresholds;

        let strong_lexical = scores.order_invariant >= t.main;
        let combined_lexical = scores.order_invariant >= t.loose
            && scores.partial > t.partial
            && scores.set_overlap > t.set;

        if strong_lexical || combined_lexical || phonetic || token_match {
            Verdict::Matching
        } else {
            Verdict::Mismatch
        }
    }
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::with_default_thresholds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(main: f64, partial: f64, set: f64) -> LexicalScores {
        LexicalScores {
            order_invariant: main,
            partial,
            set_overlap: set,
        }
    }

    #[test]
    fn test_joined_name_with_annotation_matches() {
        let matcher = NameMatcher::with_default_thresholds();
        let dictionary = TokenDictionary::from_tokens(["kumar"]);
        let pair = RawNamePair::new("ramkumar s/o suresh", "ram kumar");

        let evidence = matcher.evaluate(&pair, &dictionary);

        let split: Vec<&str> = evidence.farmer_split.split_whitespace().collect();
        assert!(split.contains(&"kumar"));
        assert!(split.contains(&"ram"));
        assert!(evidence.token_match);
        assert_eq!(evidence.remark, Verdict::Matching);
    }

    #[test]
    fn test_unrelated_names_mismatch() {
        let matcher = NameMatcher::with_default_thresholds();
        let pair = RawNamePair::new("jon smith", "maria garcia");

        let evidence = matcher.evaluate(&pair, &TokenDictionary::default());

        assert!(evidence.score_main < 60.0);
        assert!(!evidence.phonetic_match);
        assert!(!evidence.token_match);
        assert_eq!(evidence.remark, Verdict::Mismatch);
    }

    #[test]
    fn test_phonetic_variant_matches() {
        let matcher = NameMatcher::with_default_thresholds();
        let pair = RawNamePair::new("Steven", "STEPHEN");

        let evidence = matcher.evaluate(&pair, &TokenDictionary::default());

        assert!(evidence.phonetic_match);
        assert_eq!(evidence.remark, Verdict::Matching);
    }

    #[test]
    fn test_reference_annotation_stripped() {
        let matcher = NameMatcher::with_default_thresholds();
        let pair = RawNamePair::new("ramesh kumar", "Ramesh Kumar S/O Suresh Prasad");

        let evidence = matcher.evaluate(&pair, &TokenDictionary::default());

        assert_eq!(evidence.score_main, 100.0);
        assert_eq!(evidence.remark, Verdict::Matching);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let matcher = NameMatcher::with_default_thresholds();
        let dictionary = TokenDictionary::from_tokens(["kumar", "singh", "devi"]);
        let pair = RawNamePair::new("sitadevi singh", "sita devi w/o ram singh");

        let first = matcher.evaluate(&pair, &dictionary);
        let second = matcher.evaluate(&pair, &dictionary);

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_names_mismatch() {
        let matcher = NameMatcher::with_default_thresholds();
        let pair = RawNamePair::new("", "");

        let evidence = matcher.evaluate(&pair, &TokenDictionary::default());

        assert_eq!(evidence.farmer_split, "");
        assert_eq!(evidence.score_main, 0.0);
        assert!(!evidence.phonetic_match);
        assert!(!evidence.token_match);
        assert_eq!(evidence.remark, Verdict::Mismatch);
    }

    #[test]
    fn test_initials_only_reference_evaluates() {
        let matcher = NameMatcher::with_default_thresholds();
        let pair = RawNamePair::new("LL", "L.L. Meena");

        let evidence = matcher.evaluate(&pair, &TokenDictionary::default());

        assert!(evidence.token_match);
        assert_eq!(evidence.remark, Verdict::Matching);

        let result = matcher.reconcile(&[pair]);
        assert_eq!(result.evidence.len(), 1);
    }

    #[test]
    fn test_shared_first_name_is_not_phonetic_match() {
        let matcher = NameMatcher::with_default_thresholds();
        let pair = RawNamePair::new("ramesh kumar", "ramesh krishnan");

        let evidence = matcher.evaluate(&pair, &TokenDictionary::default());

        assert!(!evidence.phonetic_match);
    }

    #[test]
    fn test_token_match_on_single_reference_token() {
        let matcher = NameMatcher::with_default_thresholds();

        assert!(matcher.token_match("bhagwati", "smt bhagwati bai"));
        assert!(!matcher.token_match("jon smith", "maria garcia"));
        assert!(!matcher.token_match("ram", ""));
    }

    #[test]
    fn test_decide_paths() {
        let matcher = NameMatcher::with_default_thresholds();

        assert_eq!(matcher.decide(&scores(70.0, 0.0, 0.0), false, false), Verdict::Matching);
        assert_eq!(matcher.decide(&scores(65.0, 71.0, 81.0), false, false), Verdict::Matching);
        assert_eq!(matcher.decide(&scores(10.0, 10.0, 10.0), true, false), Verdict::Matching);
        assert_eq!(matcher.decide(&scores(10.0, 10.0, 10.0), false, true), Verdict::Matching);
        assert_eq!(matcher.decide(&scores(69.9, 100.0, 100.0), false, false), Verdict::Matching);
    }

    #[test]
    fn test_decide_loose_path_uses_strict_bounds() {
        let matcher = NameMatcher::with_default_thresholds();

        // partial and set must be strictly above their thresholds
        assert_eq!(matcher.decide(&scores(65.0, 70.0, 90.0), false, false), Verdict::Mismatch);
        assert_eq!(matcher.decide(&scores(65.0, 90.0, 80.0), false, false), Verdict::Mismatch);
        assert_eq!(matcher.decide(&scores(59.9, 90.0, 90.0), false, false), Verdict::Mismatch);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = MatchThresholds {
            main: 95.0,
            ..MatchThresholds::default()
        };
        let matcher = NameMatcher::new(strict);

        assert_eq!(matcher.decide(&scores(80.0, 0.0, 0.0), false, false), Verdict::Mismatch);
    }

    #[test]
    fn test_reconcile_preserves_order_and_counts() {
        let matcher = NameMatcher::with_default_thresholds();
        let pairs = vec![
            RawNamePair::new("ramkumar", "ram kumar"),
            RawNamePair::new("jon smith", "maria garcia"),
            RawNamePair::new("shyam kumar", "shyam kumar s/o mohan"),
        ];

        let result = matcher.reconcile(&pairs);

        assert_eq!(result.evidence.len(), 3);
        assert_eq!(result.summary.total_rows, 3);
        assert_eq!(result.summary.dictionary_size, 1);
        assert_eq!(result.evidence[0].farmer_split, "kumar ram");
        assert_eq!(result.evidence[1].remark, Verdict::Mismatch);
        assert_eq!(result.evidence[2].remark, Verdict::Matching);
        assert_eq!(result.summary.matched + result.summary.mismatched, 3);
    }

    #[test]
    fn test_reconcile_empty_batch() {
        let matcher = NameMatcher::with_default_thresholds();

        let result = matcher.reconcile(&[]);

        assert!(result.evidence.is_empty());
        assert_eq!(result.summary, ReconcileSummary::default());
    }
}
