use unicode_normalization::UnicodeNormalization;

/// Unicode apostrophe variants allowed through the validity filter
const APOSTROPHES: [char; 4] = ['\'', '\u{2018}', '\u{2019}', '\u{02bc}'];

/// Normalize raw text for tokenization: NFKC, lowercase, curly quotes and
/// dashes mapped to ASCII, non-word punctuation stripped (apostrophes kept
/// for contractions), whitespace runs collapsed.
pub fn normalize(text: &str) -> String {
    let text = text.trim();

    if text.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len());

    for c in text.nfkc() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{02bc}' => out.push('\''),
            '\u{201c}' | '\u{201d}' => out.push(' '),
            '\u{2013}' | '\u{2014}' | '-' => out.push(' '),
            '\'' => out.push('\''),
            c if c.is_alphanumeric() => {
                out.extend(c.to_lowercase());
            }
            c if c.is_whitespace() => out.push(' '),
            // Everything else is non-word punctuation
            _ => out.push(' '),
        }
    }

    // Collapse whitespace runs
    let mut collapsed = String::with_capacity(out.len());
    let mut last_was_space = true;
    for c in out.chars() {
        if c == ' ' {
            if !last_was_space {
                collapsed.push(' ');
            }
            last_was_space = true;
        } else {
            collapsed.push(c);
            last_was_space = false;
        }
    }

    collapsed.trim_end().to_string()
}

/// Strict pre-pass applied before lemmatization; classification never sees
/// a token this rejects.
pub fn is_valid_token(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }

    let chars: Vec<char> = token.chars().collect();

    if chars.len() < 2 {
        return false;
    }

    if chars.iter().all(|c| c.is_ascii_digit()) {
        return false;
    }

    // Garbled or non-Latin input: code points above Latin-1 that are not
    // whitelisted apostrophe/quote variants
    if chars
        .iter()
        .any(|c| (*c as u32) > 255 && !APOSTROPHES.contains(c))
    {
        return false;
    }

    // More than half punctuation
    let punct = chars
        .iter()
        .filter(|c| !c.is_alphanumeric() && !APOSTROPHES.contains(c))
        .count();
    if punct * 2 > chars.len() {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_maps_quotes() {
        assert_eq!(normalize("Don\u{2019}t STOP\u{2014}now"), "don't stop now");
    }

    #[test]
    fn normalize_strips_punctuation_and_collapses_whitespace() {
        assert_eq!(normalize("Hello,   world!  (really)"), "hello world really");
        assert_eq!(normalize("  \n\t "), "");
    }

    #[test]
    fn normalize_keeps_contractions() {
        assert_eq!(normalize("it's fine"), "it's fine");
    }

    #[test]
    fn short_and_numeric_tokens_are_invalid() {
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("a"));
        assert!(!is_valid_token("42"));
        assert!(!is_valid_token("1234567"));
        assert!(is_valid_token("4x4"));
    }

    #[test]
    fn punctuation_heavy_tokens_are_invalid() {
        assert!(!is_valid_token("!!!"));
        assert!(!is_valid_token("-->"));
        assert!(is_valid_token("it's"));
    }

    #[test]
    fn garbled_unicode_is_invalid_but_latin1_passes() {
        assert!(!is_valid_token("\u{30ab}\u{30bf}")); // katakana
        assert!(!is_valid_token("wor\u{fffd}d"));
        assert!(is_valid_token("na\u{ef}ve"));
        assert!(is_valid_token("don\u{2019}t"));
    }
}
