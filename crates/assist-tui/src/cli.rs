//! Command-line arguments and the headless `organize` mode.
//!
//! `organize` drives the same `Session` the TUI uses, so validation, upload
//! gating and error messages are identical; notices that would be toasts
//! become errors (non-zero exit) or a line on stderr.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use assist_proto::client::OrganizeClient;
use assist_proto::config::Config;
use assist_proto::model::InputMode;
use assist_proto::upload;

use crate::session::{Effect, Outcome, Session};
use crate::widgets::toast::Severity;

/// Sort a song list into genres with the organize backend.
#[derive(Parser, Debug)]
#[command(name = "music-assistant")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides backend.base_url)
    #[arg(long, value_name = "URL", env = "MUSIC_ASSISTANT_BACKEND")]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Organize once and print the result instead of opening the TUI
    Organize(OrganizeArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct OrganizeArgs {
    /// Song list as text, one song per line ("-" reads stdin)
    #[arg(long)]
    pub text: Option<String>,

    /// A .txt file holding the song list
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// A Spotify playlist link
    #[arg(long, value_name = "URL")]
    pub link: Option<String>,
}

/// Warnings and errors abort; anything else goes to stderr.
fn settle(outcome: Outcome) -> anyhow::Result<Option<Effect>> {
    if let Some(notice) = outcome.notice {
        match notice.severity {
            Severity::Warning | Severity::Error => bail!(notice.message),
            Severity::Info | Severity::Success => eprintln!("{}", notice.message),
        }
    }
    Ok(outcome.effect)
}

/// Run one submission headlessly. Returns the rendered result.
pub async fn organize(args: OrganizeArgs, config: &Config) -> anyhow::Result<String> {
    let client = OrganizeClient::from_config(config)?;
    let mut session = Session::new(config.upload.accepted_media_type.clone());

    if let Some(link) = args.link {
        session.select_mode(InputMode::SpotifyLink);
        session.set_link_value(link);
    } else if let Some(text) = args.text {
        session.select_mode(InputMode::Text);
        let text = if text == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read song list from stdin")?;
            buf
        } else {
            text
        };
        session.set_text_value(text);
    } else if let Some(path) = args.file {
        session.select_mode(InputMode::File);
        if let Some(Effect::ReadFile { path, name }) = settle(session.accept_file(&path))? {
            let content = upload::read_text_file(&path)
                .await
                .map_err(|e| e.root_cause().to_string());
            settle(session.file_loaded(&name, content))?;
        }
    }

    let Some(Effect::SendRequest(request)) = settle(session.submit())? else {
        bail!("nothing to submit");
    };
    debug!("one-shot {}", request.describe());
    let response = client.organize(&request).await;
    settle(session.finish_submission(response))?;
    Ok(session.view().to_plain_text())
}
