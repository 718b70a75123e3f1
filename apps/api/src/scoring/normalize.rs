//! Text normalization: the canonical token form both sides of a score share.

/// Lower-cases the input and replaces every maximal run of characters that are
/// not letters, digits, or underscore with exactly one space.
///
/// Splitting the result on whitespace yields only word-character tokens.
/// Idempotent: normalizing already-normalized text is a no-op.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_gap = false;

    for c in lowered.chars() {
        if is_word_char(c) {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push(' ');
            in_gap = true;
        }
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_collapses_punctuation() {
        assert_eq!(
            normalize("Build a REST API -- with Node.js!"),
            "build a rest api with node js "
        );
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_keeps_digits_and_underscores() {
        assert_eq!(normalize("snake_case v2_0"), "snake_case v2_0");
    }

    #[test]
    fn test_leading_and_trailing_runs_become_single_spaces() {
        assert_eq!(normalize("...hello!!!"), " hello ");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "already normalized text",
            "  Mixed CASE,\twith\n\nweird   spacing?!",
            "Ünïcode Œuvre — ﬁne",
            "100% of $5.00",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_no_uppercase_and_no_double_spaces() {
        let out = normalize("A  B\t\tC\n\nD -- E");
        assert!(!out.chars().any(|c| c.is_uppercase()));
        assert!(!out.contains("  "));
    }

    #[test]
    fn test_tokens_are_word_characters_only() {
        let out = normalize("foo-bar, baz (qux) 42!");
        for token in out.split_whitespace() {
            assert!(
                token.chars().all(|c| c.is_alphanumeric() || c == '_'),
                "token {token:?} contains non-word characters"
            );
        }
    }
}
