//! Best-effort parser for the synthesis reply.
//!
//! The synthesis prompt asks for labelled sections ("Decision:", "Risks:",
//! "Evidence:", "Recommendation:", "Safer:", "Bolder:"). Replies are free
//! text, so parsing never fails: if no section marker is found the whole
//! reply becomes an [`SynthesisOutput::Unstructured`] interpretation.

use serde::Serialize;

/// Parsed synthesis reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum SynthesisOutput {
    Structured(StructuredSynthesis),
    Unstructured { interpretation: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredSynthesis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bolder: Option<String>,
}

impl StructuredSynthesis {
    fn text_slot(&mut self, section: Section) -> Option<&mut Option<String>> {
        match section {
            Section::Decision => Some(&mut self.decision),
            Section::Interpretation => Some(&mut self.interpretation),
            Section::Evidence => Some(&mut self.evidence),
            Section::Recommendation => Some(&mut self.recommendation),
            Section::Safer => Some(&mut self.safer),
            Section::Bolder => Some(&mut self.bolder),
            Section::Risks => None,
        }
    }
}

impl SynthesisOutput {
    pub fn structured(&self) -> Option<&StructuredSynthesis> {
        match self {
            SynthesisOutput::Structured(s) => Some(s),
            SynthesisOutput::Unstructured { .. } => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        self.structured().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Decision,
    Interpretation,
    Risks,
    Evidence,
    Recommendation,
    Safer,
    Bolder,
}

/// Marker labels, lowercase, without the trailing colon.
const MARKERS: &[(&str, Section)] = &[
    ("decision", Section::Decision),
    ("decision being tested", Section::Decision),
    ("interpretation", Section::Interpretation),
    ("summary", Section::Interpretation),
    ("risks", Section::Risks),
    ("top risks", Section::Risks),
    ("evidence", Section::Evidence),
    ("recommendation", Section::Recommendation),
    ("best move", Section::Recommendation),
    ("safer", Section::Safer),
    ("safer alternative", Section::Safer),
    ("safer option", Section::Safer),
    ("bolder", Section::Bolder),
    ("bolder alternative", Section::Bolder),
    ("bolder option", Section::Bolder),
];

/// Parse a synthesis reply.
pub fn parse_synthesis(text: &str) -> SynthesisOutput {
    let mut current: Option<Section> = None;
    let mut found_any = false;
    let mut buckets: Vec<(Section, Vec<String>)> = Vec::new();
    let mut preamble: Vec<String> = Vec::new();

    for line in text.lines() {
        if let Some((section, rest)) = match_marker(line) {
            found_any = true;
            current = Some(section);
            buckets.push((section, Vec::new()));
            if !rest.is_empty() {
                push_line(&mut buckets, rest);
            }
            continue;
        }
        match current {
            Some(_) => push_line(&mut buckets, line),
            None => preamble.push(line.to_string()),
        }
    }

    if !found_any {
        return SynthesisOutput::Unstructured {
            interpretation: text.trim().to_string(),
        };
    }

    let mut out = StructuredSynthesis::default();
    for (section, lines) in buckets {
        if section == Section::Risks {
            out.risks.extend(list_items(&lines));
            continue;
        }
        let body = join_block(&lines);
        // first occurrence of a section wins
        if !body.is_empty()
            && let Some(slot) = out.text_slot(section)
            && slot.is_none()
        {
            *slot = Some(body);
        }
    }

    if out.interpretation.is_none() {
        let pre = join_block(&preamble);
        if !pre.is_empty() {
            out.interpretation = Some(pre);
        }
    }

    SynthesisOutput::Structured(out)
}

fn push_line(buckets: &mut [(Section, Vec<String>)], line: &str) {
    if let Some((_, lines)) = buckets.last_mut() {
        lines.push(line.to_string());
    }
}

/// Recognize `Label:` at the start of a line, tolerating markdown
/// decoration (`**Label:**`, `## Label`, `- Label:`).
fn match_marker(line: &str) -> Option<(Section, &str)> {
    let trimmed = line
        .trim()
        .trim_start_matches(['#', '*', '-', '_', ' '])
        .trim_start();

    let (label, rest) = match trimmed.split_once(':') {
        Some((label, rest)) => (label, rest),
        // "## Risks" with no colon
        None if line.trim_start().starts_with('#') => (trimmed, ""),
        None => return None,
    };
    let label = label.trim_end_matches(['*', '_', ' ']).to_lowercase();
    let section = MARKERS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, section)| *section)?;
    let rest = rest.trim_start_matches(['*', '_']).trim();
    Some((section, rest))
}

fn join_block(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Bullet or numbered items; a single prose line becomes one item.
fn list_items(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|l| strip_bullet(l.trim()))
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim_start_matches(['-', '*', '•']).trim_start();
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let after = &line[digits..];
        if let Some(stripped) = after.strip_prefix('.').or_else(|| after.strip_prefix(')')) {
            return stripped.trim_start();
        }
    }
    line
}
