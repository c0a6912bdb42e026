use serde::{Deserialize, Serialize};
use std::fmt;

/// The two unprocessed name fields of one record
///
/// `subject_name` is the freeform farmer name, `reference_name` the
/// authoritative registry (PFMS) name. Both are already coerced to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNamePair {
    #[serde(rename = "farmerName", default)]
    pub subject_name: String,
    #[serde(rename = "pfmsFarmerName", default)]
    pub reference_name: String,
}

impl RawNamePair {
    pub fn new(subject_name: impl Into<String>, reference_name: impl Into<String>) -> Self {
        Self {
            subject_name: subject_name.into(),
            reference_name: reference_name.into(),
        }
    }
}

/// Final decision for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Name matching")]
    Matching,
    #[serde(rename = "Mismatch")]
    Mismatch,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Matching => "Name matching",
            Verdict::Mismatch => "Mismatch",
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Matching)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-record evidence bundle
///
/// Field names follow the derived output columns of the reconciled table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceVector {
    /// Subject name after dictionary-driven re-segmentation
    pub farmer_split: String,
    /// Order-invariant (token sort) score, 0-100
    pub score_main: f64,
    /// Best-alignment substring score, 0-100
    pub score_partial: f64,
    /// Token set overlap score, 0-100
    pub score_set: f64,
    pub phonetic_match: bool,
    pub token_match: bool,
    pub remark: Verdict,
}

impl EvidenceVector {
    /// Derived column names, in output order
    pub const COLUMNS: [&'static str; 7] = [
        "farmer_split",
        "score_main",
        "score_partial",
        "score_set",
        "phonetic_match",
        "token_match",
        "remark",
    ];

    pub fn is_match(&self) -> bool {
        self.remark.is_match()
    }
}

/// Threshold policy for the match decision
///
/// A record matches when any of these paths holds:
/// 1. `score_main >= main`
/// 2. `score_main >= loose && score_partial > partial && score_set > set`
/// 3. the phonetic flag is set
/// 4. a single reference token matches (`partial_ratio >= token` or phonetic)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    pub main: f64,
    pub loose: f64,
    pub partial: f64,
    pub set: f64,
    pub token: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            main: 70.0,
            loose: 60.0,
            partial: 70.0,
            set: 80.0,
            token: 60.0,
        }
    }
}

/// Aggregate counts for a reconciled batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    #[serde(rename = "totalRows")]
    pub total_rows: usize,
    pub matched: usize,
    pub mismatched: usize,
    #[serde(rename = "dictionarySize")]
    pub dictionary_size: usize,
}
