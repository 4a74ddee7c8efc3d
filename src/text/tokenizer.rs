use crate::state::WordFrequency;
use crate::text::is_stop_word;

/// Splits text into lowercase tokens
///
/// A token is a maximal run of ASCII letters and digits. Every other
/// character, including non-ASCII letters such as `é` or `ß`, ends the current
/// run. Accented and non-Latin words are therefore split or dropped; this is a
/// known limitation of the ASCII-only alphabet.
///
/// # Examples
///
/// ```
/// use crawl_ledger::text::tokenize;
///
/// assert_eq!(tokenize("Hello, World! 123"), vec!["hello", "world", "123"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            current.push(c.to_ascii_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Counted words of a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageWords {
    /// Number of counted tokens
    pub total: u64,

    /// Per-token counts for this page, in first-seen order
    pub frequencies: WordFrequency,
}

/// Filters tokens and counts the survivors
///
/// A token is counted when it is longer than one character and is not a stop
/// word. The sum of `frequencies` always equals `total`.
pub fn count_words<I, S>(tokens: I) -> PageWords
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut page = PageWords::default();

    for token in tokens {
        let token: String = token.into();
        if token.len() <= 1 || is_stop_word(&token) {
            continue;
        }
        page.frequencies.add(&token, 1);
        page.total += 1;
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_punctuation_and_digits() {
        assert_eq!(tokenize("Hello, World! 123"), vec!["hello", "world", "123"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,.;!  ").is_empty());
    }

    #[test]
    fn test_tokenize_mixed_alphanumeric_run() {
        assert_eq!(tokenize("CS122A and ICS-31"), vec!["cs122a", "and", "ics", "31"]);
    }

    #[test]
    fn test_tokenize_non_ascii_letters_separate() {
        assert_eq!(tokenize("café naïve"), vec!["caf", "na", "ve"]);
        assert!(tokenize("日本語").is_empty());
    }

    #[test]
    fn test_tokenize_apostrophes_split() {
        assert_eq!(tokenize("don't"), vec!["don", "t"]);
    }

    #[test]
    fn test_count_drops_single_characters() {
        let page = count_words(tokenize("a b c x y z hello"));
        assert_eq!(page.frequencies.iter().collect::<Vec<_>>(), vec![("hello", 1)]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_count_drops_stop_words() {
        let page = count_words(tokenize("The world and the people of the world"));
        assert_eq!(
            page.frequencies.iter().collect::<Vec<_>>(),
            vec![("world", 2), ("people", 1)]
        );
        assert_eq!(page.total, 3);
        assert_eq!(page.frequencies.get("world"), 2);
        assert_eq!(page.frequencies.get("people"), 1);
        assert_eq!(page.frequencies.get("the"), 0);
    }

    #[test]
    fn test_count_hello_world_example() {
        let page = count_words(tokenize("Hello, World! 123"));
        assert_eq!(
            page.frequencies.iter().collect::<Vec<_>>(),
            vec![("hello", 1), ("world", 1), ("123", 1)]
        );
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_frequency_sum_matches_total() {
        let text = "Machine learning, machine vision and learning theory: 2024 2024 2024";
        let page = count_words(tokenize(text));
        assert_eq!(page.frequencies.total(), page.total);
    }
}
