//! Keyword matching helpers shared by the rule-based classifiers.
//!
//! All classifiers lowercase their input once and then match terms with
//! word boundaries, so `"rate"` matches "interest rate" but not "accurate".
//! Boundaries are decided per `char`, so typographic punctuation such as
//! curly quotes or an em-dash separates words like ASCII punctuation does.

/// Lowercase `text` and fold typographic apostrophes and quotes to ASCII.
///
/// Keyword tables are written with `'`, while phone and desktop keyboards
/// often produce `’`.
pub fn fold_lower(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// Returns `true` when `term` occurs in `haystack` delimited by non-alphanumeric
/// characters (or the string edges).
///
/// `haystack` is expected to be lowercased already. Multi-word terms such as
/// `"should i"` are matched as a whole.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    let mut start = 0;
    while let Some(pos) = haystack[start..].find(term) {
        let begin = start + pos;
        let end = begin + term.len();

        if !word_char_before(haystack, begin) && !word_char_after(haystack, end) {
            return true;
        }

        // Advance past the first char of this match (UTF-8 safe)
        start = begin
            + haystack[begin..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
    }
    false
}

/// Returns `true` when `term` occurs at the start of a word in `haystack`.
///
/// Used for stems like `"terminat"` that should match "terminate",
/// "termination" and "terminating".
pub fn contains_stem(haystack: &str, stem: &str) -> bool {
    if stem.is_empty() {
        return false;
    }

    haystack
        .match_indices(stem)
        .any(|(begin, _)| !word_char_before(haystack, begin))
}

/// Count how many distinct terms from `terms` appear in `haystack`.
pub fn count_terms(haystack: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| contains_term(haystack, t)).count()
}

/// Terms from `terms` found in `haystack`, in table order.
pub fn matched_terms<'a>(haystack: &str, terms: &[&'a str]) -> Vec<&'a str> {
    terms
        .iter()
        .copied()
        .filter(|t| contains_term(haystack, t))
        .collect()
}

/// Returns `true` if any term from `terms` appears in `haystack`.
pub fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| contains_term(haystack, t))
}

/// Count every (possibly repeated) occurrence of `term` as a whole word.
pub fn count_occurrences(haystack: &str, term: &str) -> usize {
    haystack
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| *w == term)
        .count()
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn word_char_before(haystack: &str, index: usize) -> bool {
    haystack[..index].chars().next_back().is_some_and(is_word_char)
}

fn word_char_after(haystack: &str, index: usize) -> bool {
    haystack[index..].chars().next().is_some_and(is_word_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_term_word_boundaries() {
        assert!(contains_term("what is the interest rate today", "rate"));
        assert!(!contains_term("that is accurate", "rate"));
        assert!(contains_term("rate", "rate"));
        assert!(contains_term("rate?", "rate"));
    }

    #[test]
    fn test_contains_term_multi_word() {
        assert!(contains_term("should i quit my job", "should i"));
        assert!(!contains_term("shoulder injury", "should i"));
    }

    #[test]
    fn test_contains_term_skips_embedded_match_then_finds_later() {
        assert!(contains_term("accurate rate", "rate"));
    }

    #[test]
    fn test_contains_stem() {
        assert!(contains_stem("considering termination", "terminat"));
        assert!(!contains_stem("exterminate", "terminat"));
    }

    #[test]
    fn test_count_terms_distinct() {
        let terms = ["legal", "lawsuit", "fire"];
        assert_eq!(count_terms("legal legal lawsuit", &terms), 2);
        assert_eq!(count_terms("nothing here", &terms), 0);
    }

    #[test]
    fn test_count_occurrences() {
        assert_eq!(count_occurrences("this or that or the other", "or"), 2);
        assert_eq!(count_occurrences("order", "or"), 0);
    }

    #[test]
    fn test_typographic_punctuation_is_a_boundary() {
        assert!(contains_term("tell me the \u{201C}latest\u{201D}", "latest"));
        assert!(contains_term("should i\u{2014}honestly\u{2014}fire him?", "fire"));
        assert!(contains_term("wait\u{2026}should i", "should i"));
        assert!(contains_stem("the \u{2018}termination\u{2019} letter", "terminat"));
    }

    #[test]
    fn test_non_ascii_letters_still_join_words() {
        assert!(!contains_term("caf\u{e9}rate", "rate"));
        assert!(!contains_stem("\u{e9}terminate", "terminat"));
        assert!(contains_term("na\u{ef}ve rate", "rate"));
    }

    #[test]
    fn test_fold_lower() {
        assert_eq!(fold_lower("What\u{2019}s the \u{201C}Latest\u{201D}"), "what's the \"latest\"");
        assert_eq!(fold_lower("CAN\u{2019}T"), "can't");
    }

    #[test]
    fn test_empty_term_never_matches() {
        assert!(!contains_term("anything", ""));
        assert!(!contains_stem("anything", ""));
    }
}
