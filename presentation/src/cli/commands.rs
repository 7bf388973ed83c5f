//! CLI command definitions

use clap::Parser;
use parley_domain::{CapabilityMap, CouncilMode, Intent, OutputFormat, Utterance};
use std::path::PathBuf;

/// CLI arguments for parley
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(author, version, about = "Decide how to respond before responding")]
#[command(long_about = r#"
Parley decides how to respond to a request before anything is generated:
answer, ask clarifying questions, ask for confirmation, or explain that a
needed integration is not connected yet.

With --council, several independent advisors each give one perspective
through a fixed lens. In work mode their views are combined, and
consequential decisions get a stress-test brief.

Configuration files are loaded from (in priority order):
1. PARLEY_* environment variables
2. --config <path>     Explicit config file
3. ./parley.toml       Project-level config
4. ~/.config/parley/config.toml   Global config

Example:
  parley "Can you explain how compound interest works?"
  parley --council "Should I accept the job offer or stay where I am?"
  parley --intent send_email --capability email=false "Email the team the update"
"#)]
pub struct Cli {
    /// The request text (not required with --show-config)
    pub text: Option<String>,

    /// Declared intent (explain, draft, decide, send_email, ...)
    #[arg(long, value_name = "INTENT")]
    pub intent: Option<Intent>,

    /// The request continues an earlier conversation
    #[arg(long)]
    pub previous_context: bool,

    /// Files were attached to the request
    #[arg(long)]
    pub attachments: bool,

    /// Integration availability as name=bool (can be specified multiple times)
    #[arg(long = "capability", value_name = "NAME=BOOL", value_parser = parse_capability)]
    pub capabilities: Vec<(String, bool)>,

    /// Ask the council of advisors
    #[arg(long)]
    pub council: bool,

    /// Council sub-mode (overrides config)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<CouncilMode>,

    /// Output format (overrides config)
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Build the utterance from the positional text and flags.
    ///
    /// Returns `None` when no non-blank text was given.
    pub fn utterance(&self) -> Option<Utterance> {
        let text = self.text.as_deref()?;
        let mut utterance = Utterance::try_new(text)?
            .with_previous_context(self.previous_context)
            .with_attachments(self.attachments)
            .with_capabilities(self.capability_map());
        if let Some(intent) = self.intent {
            utterance = utterance.with_intent(intent);
        }
        Some(utterance)
    }

    pub fn capability_map(&self) -> CapabilityMap {
        let mut map = CapabilityMap::new();
        for (name, available) in &self.capabilities {
            map.insert(name.clone(), *available);
        }
        map
    }
}

/// Parse `name=bool`. Accepts true/false, yes/no, on/off and 1/0.
fn parse_capability(raw: &str) -> Result<(String, bool), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=BOOL, got '{}'", raw))?;
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err("capability name is empty".to_string());
    }
    let available = match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => true,
        "false" | "no" | "off" | "0" => false,
        other => return Err(format!("invalid capability value '{}'", other)),
    };
    Ok((name, available))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_domain::Capability;

    #[test]
    fn test_parse_capability() {
        assert_eq!(parse_capability("email=true"), Ok(("email".to_string(), true)));
        assert_eq!(parse_capability("CRM = off"), Ok(("crm".to_string(), false)));
        assert!(parse_capability("email").is_err());
        assert!(parse_capability("=true").is_err());
        assert!(parse_capability("email=maybe").is_err());
    }

    #[test]
    fn test_full_command_line() {
        let cli = Cli::try_parse_from([
            "parley",
            "--intent",
            "send_email",
            "--capability",
            "email=false",
            "--capability",
            "calendar=true",
            "--council",
            "--mode",
            "work",
            "-o",
            "json",
            "-vv",
            "Email the team the update",
        ])
        .unwrap();

        assert_eq!(cli.intent, Some(Intent::SendEmail));
        assert_eq!(cli.mode, Some(CouncilMode::Work));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert!(cli.council);

        let utterance = cli.utterance().unwrap();
        assert_eq!(utterance.intent(), Some(Intent::SendEmail));
        assert!(!utterance.capabilities().is_available(Capability::Email));
        assert!(utterance.capabilities().is_available(Capability::Calendar));
    }

    #[test]
    fn test_blank_text_gives_no_utterance() {
        let cli = Cli::try_parse_from(["parley", "   "]).unwrap();
        assert!(cli.utterance().is_none());

        let cli = Cli::try_parse_from(["parley", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.utterance().is_none());
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!(Cli::try_parse_from(["parley", "--mode", "turbo", "hi"]).is_err());
    }
}
