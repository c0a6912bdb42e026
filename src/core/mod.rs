// Core algorithm exports
pub mod dictionary;
pub mod matcher;
pub mod normalize;
pub mod phonetic;
pub mod similarity;
pub mod splitter;

pub use dictionary::TokenDictionary;
pub use matcher::{NameMatcher, ReconcileResult};
pub use normalize::{normalize_name, extract_core_name};
pub use phonetic::{PhoneticEncoder, DoubleMetaphoneEncoder};
pub use similarity::{lexical_scores, partial_ratio, token_set_ratio, token_sort_ratio, LexicalScores};
pub use splitter::split_joined_name;
