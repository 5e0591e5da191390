use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use defectd::cli::check::CheckArgs;
use defectd::cli::handle::HandleArgs;
use defectd::Result;
use std::io;

#[derive(Parser)]
#[command(name = "defectd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Defect report extractor and validator", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and validate a defect report body
    Check(CheckArgs),

    /// Run an issue or note event through the defect handler
    Handle(HandleArgs),

    /// Print the blank defect template
    Template,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", format!("Error: Failed to create tokio runtime: {}", e).red());
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check(args) => {
            defectd::cli::check::run(args)?;
        }

        Commands::Handle(args) => {
            println!("{}", "🔎 Handling event...".cyan());
            defectd::cli::handle::run(args).await?;
        }

        Commands::Template => {
            defectd::cli::template::run();
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "defectd", &mut io::stdout());
        }
    }

    Ok(())
}
