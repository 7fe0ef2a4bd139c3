//! Keyword tokenization for the frequency table.

use std::iter::FusedIterator;

/// Tokens at or below this many characters are dropped. This stands in for
/// a stop-word list and also drops short terms such as "ai" or "go".
pub const KEYWORD_LENGTH_THRESHOLD: usize = 3;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lower-cased word tokens of `text` longer than
/// `KEYWORD_LENGTH_THRESHOLD`, in order of occurrence.
///
/// The returned iterator borrows `text` and is `Clone`, so it can be
/// restarted by cloning it before consumption.
pub fn extract_keywords(text: &str) -> Keywords<'_> {
    Keywords { rest: text }
}

#[derive(Debug, Clone)]
pub struct Keywords<'a> {
    rest: &'a str,
}

impl Iterator for Keywords<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let start = self.rest.find(is_word_char)?;
            let tail = &self.rest[start..];
            let end = tail.find(|c: char| !is_word_char(c)).unwrap_or(tail.len());
            self.rest = &tail[end..];

            let token = tail[..end].to_lowercase();
            if token.chars().count() > KEYWORD_LENGTH_THRESHOLD {
                return Some(token);
            }
        }
    }
}

impl FusedIterator for Keywords<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<String> {
        extract_keywords(text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(collect("").is_empty());
        assert!(collect("   ...!? ").is_empty());
    }

    #[test]
    fn test_three_letter_words_are_dropped() {
        assert!(collect("The cat sat").is_empty());
        assert_eq!(collect("The cats sat"), vec!["cats"]);
    }

    #[test]
    fn test_lowercases_and_keeps_order() {
        assert_eq!(
            collect("Rust, PYTHON and Golang: which one?"),
            vec!["rust", "python", "golang", "which"]
        );
    }

    #[test]
    fn test_splits_on_non_word_characters() {
        assert_eq!(
            collect("async/await-heavy code_base v2024"),
            vec!["async", "await", "heavy", "code_base", "v2024"]
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(collect("café").contains(&"café".to_string()));
        assert!(collect("été").is_empty());
    }

    #[test]
    fn test_iterator_is_restartable() {
        let keywords = extract_keywords("big data tools");
        let first: Vec<_> = keywords.clone().collect();
        let second: Vec<_> = keywords.collect();
        assert_eq!(first, vec!["data", "tools"]);
        assert_eq!(first, second);
    }
}
