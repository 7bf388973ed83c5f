//! Evidence-necessity classification.
//!
//! A request needs externally sourced evidence when it asks about recent
//! events, markets or statistics. Personal drafting and opinion requests
//! never do.

use crate::core::text::{contains_any, fold_lower};
use regex::Regex;
use std::sync::LazyLock;

const RECENCY_TERMS: &[&str] = &[
    "latest",
    "current",
    "currently",
    "today",
    "tonight",
    "yesterday",
    "this week",
    "this month",
    "this year",
    "recent",
    "recently",
    "right now",
    "up to date",
    "breaking",
];

const NEWS_MARKET_TERMS: &[&str] = &[
    "news",
    "headline",
    "headlines",
    "election",
    "stock",
    "stocks",
    "market",
    "markets",
    "price",
    "prices",
    "inflation",
    "interest rate",
    "interest rates",
    "earnings",
    "ipo",
    "crypto",
    "bitcoin",
    "gdp",
    "unemployment",
    "mortgage rates",
    "exchange rate",
];

const STATISTIC_TERMS: &[&str] = &[
    "percentage",
    "percent",
    "rate",
    "rates",
    "statistic",
    "statistics",
    "data on",
    "how many",
    "average",
    "median",
    "survey",
    "study",
    "studies",
];

const DRAFTING_VERBS: &[&str] = &[
    "write", "draft", "rewrite", "rephrase", "compose", "edit", "proofread", "polish",
];

const OPINION_MARKERS: &[&str] = &[
    "what do you think",
    "your opinion",
    "your view",
    "in your view",
    "do you like",
    "would you rather",
    "your favorite",
    "your favourite",
];

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern is valid"));

/// Stateless evidence-necessity classifier.
pub struct EvidenceClassifier;

impl EvidenceClassifier {
    pub fn requires_evidence(text: &str) -> bool {
        let lower = fold_lower(text.trim());
        if is_personal_drafting(&lower) || contains_any(&lower, OPINION_MARKERS) {
            return false;
        }
        contains_any(&lower, RECENCY_TERMS)
            || YEAR.is_match(&lower)
            || contains_any(&lower, NEWS_MARKET_TERMS)
            || contains_any(&lower, STATISTIC_TERMS)
    }
}

fn is_personal_drafting(lower: &str) -> bool {
    let stripped = lower
        .strip_prefix("please ")
        .or_else(|| lower.strip_prefix("help me "))
        .or_else(|| lower.strip_prefix("can you "))
        .unwrap_or(lower);
    stripped
        .split_whitespace()
        .next()
        .is_some_and(|first| DRAFTING_VERBS.contains(&first))
}
