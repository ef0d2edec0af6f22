use crate::config::{api_key_from_env, load_config, CopyTarget};
use crate::openai_client::OpenAiTranslator;
use crate::session::{run, Session, ViewState};
use crate::terminal::TerminalHost;
use anyhow::{anyhow, Result};
use clap::Parser;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "yakusu", version, about = "Translate English into Japanese and get feedback on the English")]
pub struct Cli {
    /// English text to translate and evaluate
    pub text: String,
    /// Model override (defaults from config)
    #[arg(long)]
    pub model: Option<String>,
    /// Payload to put on the clipboard (defaults from config)
    #[arg(long, value_enum)]
    pub copy: Option<CopyTarget>,
}

/// Outcome of one invocation, for the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

pub async fn handle_translate(args: Cli) -> Result<Outcome> {
    let mut cfg = load_config()?;
    if let Some(m) = args.model.clone() { cfg.openai.model = m; }
    if let Some(c) = args.copy {
        cfg.output.copy = c;
        cfg.output.copy_to_clipboard = true;
    }

    if args.text.trim().is_empty() {
        return Err(anyhow!("Nothing to translate"));
    }

    let api_key = cfg.resolve_api_key(api_key_from_env())?;
    let translator = OpenAiTranslator::new(
        api_key,
        cfg.openai.model.clone(),
        &cfg.openai.base_url,
        Duration::from_secs(cfg.openai.timeout_secs),
    )?;

    let mut host = TerminalHost::new(cfg.output.notifications, cfg.copy_target())?;
    let mut session = Session::new(args.text.as_str(), translator.model())
        .copy_target(cfg.copy_target());

    run(&mut session, translator.translate(&args.text), &mut host).await?;

    let outcome = match session.state() {
        ViewState::Succeeded(_) => Outcome::Succeeded,
        _ => Outcome::Failed,
    };
    info!(?outcome, "Done");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_the_single_positional_argument() {
        let cli = Cli::try_parse_from(["yakusu", "I has went to school yesterday."]).unwrap();
        assert_eq!(cli.text, "I has went to school yesterday.");
        assert!(cli.model.is_none());
        assert!(cli.copy.is_none());
    }

    #[test]
    fn copy_target_can_be_chosen() {
        let cli = Cli::try_parse_from(["yakusu", "--copy", "feedback", "hello"]).unwrap();
        assert_eq!(cli.copy, Some(CopyTarget::Feedback));
        assert!(Cli::try_parse_from(["yakusu", "--copy", "everything", "hello"]).is_err());
    }

    #[test]
    fn model_can_be_overridden() {
        let cli = Cli::try_parse_from(["yakusu", "--model", "gpt-4o", "hello"]).unwrap();
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn text_is_required() {
        assert!(Cli::try_parse_from(["yakusu"]).is_err());
    }
}
