//! Forbidden-phrase linter.
//!
//! User-facing text must never talk about internal reasoning, model names,
//! or tool execution. Messages this crate constructs are checked with
//! [`lint_message`], and a hit is a [`DomainError::ContractViolation`].
//! Text produced by a downstream model is not ours to fail on; it goes
//! through [`redact_forbidden`] instead.

use crate::core::error::DomainError;
use crate::core::text::{contains_term, fold_lower};

/// Phrases that must never reach the user.
pub const FORBIDDEN_PHRASES: &[&str] = &[
    "chain-of-thought",
    "chain of thought",
    "internally",
    "my reasoning",
    "my internal",
    "as an ai",
    "language model",
    "system prompt",
    "tool call",
    "tool execution",
    "executing a tool",
    "scratchpad",
    "step by step reasoning",
    "llm",
    "gpt",
    "claude",
    "gemini",
];

/// First forbidden phrase found in `text`, if any (case-insensitive, whole words).
pub fn find_forbidden_phrase(text: &str) -> Option<&'static str> {
    let lower = fold_lower(text);
    FORBIDDEN_PHRASES
        .iter()
        .copied()
        .find(|phrase| contains_term(&lower, phrase))
}

/// Fail loudly if `text` contains a forbidden phrase.
///
/// `context` names the field being checked (e.g. `"assistant_message"`) and
/// ends up in the error for debugging.
pub fn lint_message(text: &str, context: &str) -> Result<(), DomainError> {
    match find_forbidden_phrase(text) {
        Some(phrase) => Err(DomainError::ContractViolation {
            phrase: phrase.to_string(),
            context: context.to_string(),
        }),
        None => Ok(()),
    }
}

/// Lint every string in `texts`, stopping at the first violation.
pub fn lint_all<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    context: &str,
) -> Result<(), DomainError> {
    texts
        .into_iter()
        .try_for_each(|text| lint_message(text, context))
}

/// Drop every sentence of model output that contains a forbidden phrase.
///
/// Returns the cleaned text and the number of sentences removed. Sentence
/// boundaries are `.`, `!`, `?` and newlines; line structure is kept.
pub fn redact_forbidden(text: &str) -> (String, usize) {
    if find_forbidden_phrase(text).is_none() {
        return (text.to_string(), 0);
    }

    let mut removed = 0usize;
    let mut lines_out: Vec<String> = Vec::new();

    for line in text.lines() {
        let mut kept = String::new();
        for sentence in split_sentences(line) {
            if find_forbidden_phrase(sentence).is_some() {
                removed += 1;
            } else {
                kept.push_str(sentence);
            }
        }
        let kept = kept.trim().to_string();
        if !kept.is_empty() || line.trim().is_empty() {
            lines_out.push(kept);
        }
    }

    (lines_out.join("\n").trim().to_string(), removed)
}

/// Split a line into sentences, keeping the terminator and trailing space
/// attached to each piece.
fn split_sentences(line: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let mut end = i + c.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if next.is_whitespace() {
                    end = j + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            pieces.push(&line[start..end]);
            start = end;
        }
    }
    if start < line.len() {
        pieces.push(&line[start..]);
    }
    pieces
}
