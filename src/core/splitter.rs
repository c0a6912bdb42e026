use crate::core::dictionary::TokenDictionary;

/// Recover token boundaries in a run-together name
///
/// Dictionary tokens are tried longest first. Each token found in the
/// remaining text is emitted as its own piece and its first occurrence is cut
/// out. Whatever text is left afterwards becomes the final piece. Pieces are
/// joined with single spaces.
///
/// With an empty dictionary, or when no token occurs, the trimmed input is
/// returned unchanged.
pub fn split_joined_name(name: &str, dictionary: &TokenDictionary) -> String {
    let mut remaining = name.trim().to_string();
    let mut pieces: Vec<String> = Vec::new();

    for token in dictionary.longest_first() {
        if let Some(start) = remaining.find(token) {
            remaining.replace_range(start..start + token.len(), "");
            pieces.push(token.to_string());
        }
    }

    if pieces.is_empty() {
        return remaining;
    }

    let rest = remaining.split_whitespace().collect::<Vec<_>>().join(" ");
    if !rest.is_empty() {
        pieces.push(rest);
    }

    pieces.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_joined_name() {
        let dictionary = TokenDictionary::from_tokens(["kumar"]);

        assert_eq!(split_joined_name("ramkumar", &dictionary), "kumar ram");
    }

    #[test]
    fn test_empty_dictionary_returns_input() {
        let dictionary = TokenDictionary::default();

        assert_eq!(split_joined_name("ramkumar", &dictionary), "ramkumar");
        assert_eq!(split_joined_name(" ram kumar ", &dictionary), "ram kumar");
    }

    #[test]
    fn test_no_hits_returns_input() {
        let dictionary = TokenDictionary::from_tokens(["singh", "devi"]);

        assert_eq!(split_joined_name("ramkumar", &dictionary), "ramkumar");
    }

    #[test]
    fn test_longest_token_wins() {
        // "kumari" must be carved out before "kumar" can pre-empt it
        let dictionary = TokenDictionary::from_tokens(["kumar", "kumari"]);

        assert_eq!(split_joined_name("sitakumari", &dictionary), "kumari sita");
    }

    #[test]
    fn test_multiple_tokens_and_remainder() {
        let dictionary = TokenDictionary::from_tokens(["kumar", "singh"]);

        assert_eq!(
            split_joined_name("ramkumarsingh", &dictionary),
            "kumar singh ram"
        );
    }

    #[test]
    fn test_remainder_whitespace_collapsed() {
        let dictionary = TokenDictionary::from_tokens(["kumar"]);

        assert_eq!(
            split_joined_name("ram kumar singh", &dictionary),
            "kumar ram singh"
        );
    }

    #[test]
    fn test_only_first_occurrence_removed() {
        let dictionary = TokenDictionary::from_tokens(["devi"]);

        assert_eq!(split_joined_name("devidevi", &dictionary), "devi devi");
    }

    #[test]
    fn test_fully_consumed_input() {
        let dictionary = TokenDictionary::from_tokens(["kumar"]);

        assert_eq!(split_joined_name("kumar", &dictionary), "kumar");
    }
}
