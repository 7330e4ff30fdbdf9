//! Word-level helpers shared by extraction and summarization.

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keeps the first `limit` whitespace-separated words, joined by single spaces.
pub fn truncate_words(text: &str, limit: usize) -> String {
    text.split_whitespace().take(limit).collect::<Vec<_>>().join(" ")
}

/// Collapses runs of whitespace (including newlines) into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the first sentence of `text`, cut to at most `max_chars` characters.
pub fn first_sentence(text: &str, max_chars: usize) -> Option<String> {
    let sentence = text.trim().split('.').next()?.trim();
    if sentence.is_empty() {
        return None;
    }
    Some(sentence.chars().take(max_chars).collect::<String>().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one\ttwo\n\nthree  "), 3);
    }

    #[test]
    fn test_truncate_words_keeps_order() {
        let text = (0..2000).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let truncated = truncate_words(&text, 900);
        let words: Vec<&str> = truncated.split(' ').collect();
        assert_eq!(words.len(), 900);
        assert_eq!(words[0], "w0");
        assert_eq!(words[899], "w899");
    }

    #[test]
    fn test_truncate_words_short_input() {
        assert_eq!(truncate_words("a  b\nc", 10), "a b c");
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(
            first_sentence("Rates rise again. Markets fall.", 120).as_deref(),
            Some("Rates rise again")
        );
        assert_eq!(first_sentence("abcdef", 3).as_deref(), Some("abc"));
        assert_eq!(first_sentence("   ", 10), None);
    }
}
