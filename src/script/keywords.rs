//! Keyword extraction from loose transcript text.
//!
//! Tokens are whitespace-delimited after punctuation stripping; long
//! tokens additionally emit their non-overlapping 2-character chunks (a
//! trailing odd character is dropped) to approximate sub-word matching in
//! languages written without spaces.

/// Keywords kept per extraction, first-seen order.
pub const MAX_KEYWORDS: usize = 15;

/// Function words excluded from keyword sets. Covers the common Mandarin
/// particles alongside English fillers.
const STOP_WORDS: &[&str] = &[
    "的", "了", "是", "在", "我", "有", "和", "就", "不", "人", "都", "一个", "我们", "这个",
    "那个", "什么", "可以", "这样", "因为", "所以", "但是", "然后",
    "the", "a", "an", "is", "are", "was", "were", "be", "to", "of", "and", "or", "in", "on",
    "at", "it", "this", "that", "with", "for", "as", "so",
];

/// Extract up to [`MAX_KEYWORDS`] keywords: punctuation stripped, tokens of
/// at least two characters kept unless stop words, non-overlapping 2-char
/// chunks added for tokens of four or more characters, deduplicated
/// preserving first-seen order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    let mut push_unique = |keywords: &mut Vec<String>, candidate: String| {
        if keywords.len() < MAX_KEYWORDS && !keywords.contains(&candidate) {
            keywords.push(candidate);
        }
    };

    for token in cleaned.split_whitespace() {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() < 2 || STOP_WORDS.contains(&token) {
            continue;
        }
        push_unique(&mut keywords, token.to_string());
        if chars.len() >= 4 {
            // Non-overlapping bigrams approximate sub-word units in
            // languages written without spaces; windows straddling two
            // chunks are skipped.
            for pair in chars.chunks_exact(2) {
                push_unique(&mut keywords, pair.iter().collect());
            }
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_nothing() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   ,.!?  ").is_empty());
    }

    #[test]
    fn short_tokens_and_stop_words_dropped() {
        let ks = extract_keywords("a is the presentation");
        assert_eq!(ks, ["presentation", "pr", "es", "en", "ta", "ti", "on"]);
    }

    #[test]
    fn punctuation_is_stripped() {
        let ks = extract_keywords("slide, deck!");
        assert_eq!(ks, ["slide", "sl", "id", "deck", "de", "ck"]);
    }

    #[test]
    fn long_tokens_emit_nonoverlapping_bigrams() {
        let ks = extract_keywords("项目背景介绍");
        assert_eq!(ks, ["项目背景介绍", "项目", "背景", "介绍"]);
        // Straddling windows like "目背" are not emitted.
        assert!(!ks.contains(&"目背".to_string()));
    }

    #[test]
    fn extraction_is_order_preserving_and_deduplicating() {
        let ks = extract_keywords("项目项目背景");
        let mut seen = std::collections::HashSet::new();
        for k in &ks {
            assert!(seen.insert(k.clone()), "duplicate keyword {k:?}");
        }
        assert_eq!(ks[0], "项目项目背景");
    }

    #[test]
    fn keyword_count_is_capped() {
        let text = (0..40).map(|i| format!("word{i:02}")).collect::<Vec<_>>().join(" ");
        let ks = extract_keywords(&text);
        assert_eq!(ks.len(), MAX_KEYWORDS);
    }

    #[test]
    fn ascii_is_lowercased() {
        let ks = extract_keywords("Presentation CONTROL");
        assert!(ks.contains(&"presentation".to_string()));
        assert!(ks.contains(&"control".to_string()));
    }
}
