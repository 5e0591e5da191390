//! Check CLI command

use crate::models::{DefectdConfig, IssueIdentity, SeverityLevel};
use crate::services::{DefectService, StdoutManager};
use crate::Result;
use anyhow::Context;
use clap::Args;
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct CheckArgs {
    /// File holding the issue body ("-" reads stdin)
    pub body: PathBuf,

    /// Config file (YAML, or TOML with a .toml extension)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Issue number
    #[arg(long, default_value = "")]
    pub number: String,

    /// Organization / namespace owning the issue
    #[arg(long, default_value = "")]
    pub org: String,

    /// Repository name
    #[arg(long, default_value = "")]
    pub repo: String,

    /// Issue status
    #[arg(long, default_value = "open")]
    pub status: String,

    /// Print the record as JSON
    #[arg(short, long)]
    pub json: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let config = DefectdConfig::load(&args.config)?;
    let service = DefectService::new(&config.issue, Box::new(StdoutManager))?;
    let body = read_body(&args.body)?;

    let issue = IssueIdentity::new(args.number, args.org, args.repo, args.status);
    let record = service.check(&body, issue)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{}", "✅ Defect report is valid".green().bold());
    println!("   Kernel:          {}", record.kernel);
    println!("   Component:       {}", record.component);
    println!("   System version:  {}", record.system_version);
    println!("   Severity:        {}", paint_severity(record.severity_level));
    if record.affected_version.is_empty() {
        println!("   Affected:        {}", "none".dimmed());
    } else {
        println!("   Affected:        {}", record.affected_version.join(", "));
    }
    println!("   ABI:             {}", record.abi);

    Ok(())
}

fn paint_severity(level: SeverityLevel) -> colored::ColoredString {
    match level {
        SeverityLevel::Critical => level.as_str().red().bold(),
        SeverityLevel::High => level.as_str().red(),
        SeverityLevel::Moderate => level.as_str().yellow(),
        SeverityLevel::Low => level.as_str().blue(),
    }
}

fn read_body(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read issue body from stdin")?;
        return Ok(body);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read issue body {}", path.display()))
}
