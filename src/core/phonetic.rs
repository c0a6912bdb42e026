use rphonetic::DoubleMetaphone;

/// Upper bound on code length; long enough that whole names are never cut short
pub const MAX_CODE_LENGTH: usize = 256;

/// Words shorter than this are coded as their own letters
const MIN_ENCODABLE_LENGTH: usize = 3;

/// Phonetic encoding capability
///
/// Implementations return every code a word may sound like (e.g. primary and
/// alternate). Two strings are phonetically equivalent when their code sets
/// intersect.
pub trait PhoneticEncoder: Send + Sync {
    fn encode(&self, word: &str) -> Vec<String>;

    /// Check whether two strings share at least one non-empty code
    fn sounds_alike(&self, a: &str, b: &str) -> bool {
        let codes_a = self.encode(a);
        if codes_a.is_empty() {
            return false;
        }
        let codes_b = self.encode(b);

        codes_a.iter().any(|code| codes_b.contains(code))
    }
}

/// Double Metaphone encoder (primary + alternate code)
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleMetaphoneEncoder;

impl PhoneticEncoder for DoubleMetaphoneEncoder {
    fn encode(&self, word: &str) -> Vec<String> {
        let word = word.trim();
        if word.is_empty() {
            return vec![];
        }

        // rphonetic underflows on some two-letter words ("ll")
        if word.len() < MIN_ENCODABLE_LENGTH {
            return vec![word.to_ascii_uppercase()];
        }

        let result = DoubleMetaphone::new(MAX_CODE_LENGTH).double_metaphone(word);
        let primary = result.primary().to_string();
        let alternate = result.alternate().to_string();

        let mut codes = Vec::with_capacity(2);
        if !primary.is_empty() {
            codes.push(primary);
        }
        if !alternate.is_empty() && !codes.contains(&alternate) {
            codes.push(alternate);
        }

        codes
    }
}
