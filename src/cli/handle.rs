//! Handle CLI command - run a webhook event through the defect handler

use crate::models::{DefectdConfig, IssueEvent, NoteEvent};
use crate::services::{build_manager, DefectService, HandleOutcome};
use crate::Result;
use anyhow::Context;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct HandleArgs {
    /// Config file (YAML, or TOML with a .toml extension)
    #[arg(short, long)]
    pub config: PathBuf,

    /// JSON event payload
    #[arg(short, long)]
    pub event: PathBuf,

    /// The payload is a note (comment) event instead of an issue event
    #[arg(long)]
    pub note: bool,
}

pub async fn run(args: HandleArgs) -> Result<()> {
    let config = DefectdConfig::load(&args.config)?;
    let manager = build_manager(&config.manager)?;
    let service = DefectService::new(&config.issue, manager)?;

    let payload = std::fs::read_to_string(&args.event)
        .with_context(|| format!("Failed to read event {}", args.event.display()))?;

    let outcome = if args.note {
        let event: NoteEvent =
            serde_json::from_str(&payload).context("Failed to parse note event")?;
        service.handle_note_event(&event).await?
    } else {
        let event: IssueEvent =
            serde_json::from_str(&payload).context("Failed to parse issue event")?;
        service.handle_issue_event(&event).await?
    };

    match &outcome {
        HandleOutcome::Ignored => {
            println!("{}", "ℹ️  Event ignored".yellow());
        }
        HandleOutcome::Rejected { comment } => {
            println!("{}", "❌ Report rejected, comment to post:".red().bold());
            println!("{}", comment);
        }
        HandleOutcome::Accepted { record, comment } => {
            println!(
                "{}",
                format!("✅ Defect {} accepted, comment to post:", record.issue.number)
                    .green()
                    .bold()
            );
            println!("{}", comment);
        }
    }

    Ok(())
}
