//! Consequence detection: is this a consequential, hard-to-reverse decision?
//!
//! Fires on decision framing ("should I…"), irreversibility vocabulary, or an
//! action verb paired with a decision object ("accept the offer"). Drives the
//! stress-test brief and is independent of evidence necessity.

use crate::core::text::{contains_any, contains_stem, fold_lower};
use regex::Regex;
use std::sync::LazyLock;

const DECISION_FRAMES: &[&str] = &[
    "should i",
    "should we",
    "what's the best move",
    "what is the best move",
    "best move",
    "is it worth",
    "whether to",
    "whether i should",
    "torn between",
    "can't decide",
    "cannot decide",
];

/// Stems, matched at word starts ("terminat" covers terminate/termination).
const IRREVERSIBLE_STEMS: &[&str] = &["terminat", "divorc", "evict", "bankrupt", "resign", "layoff"];

/// Whole words only: as prefixes these hit "firewall", "quite" and "suede".
const IRREVERSIBLE_WORDS: &[&str] = &[
    "fire",
    "fired",
    "firing",
    "quit",
    "quits",
    "quitting",
    "sue",
    "sued",
    "suing",
    "lawsuit",
    "publish",
    "published",
    "publishing",
    "lay off",
    "laid off",
    "break up",
];

static ACTION_ON_DECISION_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:accept|reject|declin|sign|tak|turn(?:ing)? down|leav|buy|sell|launch|cancel|hir|clos)\w*\b.{0,40}?\b(?:offer|job|contract|deal|company|house|position|role|partnership|funding|acquisition|lease|round)\b",
    )
    .expect("action/object pattern is valid")
});

/// Stateless consequence detector.
pub struct ConsequenceDetector;

impl ConsequenceDetector {
    pub fn detect(text: &str) -> bool {
        let lower = fold_lower(text.trim());
        contains_any(&lower, DECISION_FRAMES)
            || contains_any(&lower, IRREVERSIBLE_WORDS)
            || IRREVERSIBLE_STEMS.iter().any(|stem| contains_stem(&lower, stem))
            || ACTION_ON_DECISION_OBJECT.is_match(&lower)
    }
}
