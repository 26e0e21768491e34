//! prco - check out GitHub pull requests

mod cli;

use anstream::eprintln;
use clap::{Parser, Subcommand};
use cli::checkout::{CheckoutOptions, run_checkout};
use cli::style::Stylize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "prco",
    author,
    version,
    about = "Check out GitHub pull requests into your local repository",
    arg_required_else_help = true
)]
struct Args {
    /// Path to the repository
    #[arg(long, global = true, default_value = ".")]
    path: PathBuf,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check out a pull request in git
    Checkout {
        /// PR number, URL, or head branch (`branch` or `owner:branch`)
        #[arg(value_name = "NUMBER | URL | BRANCH")]
        pr: String,

        /// Look the PR up in this repository instead ([HOST/]OWNER/REPO)
        #[arg(long, short = 'R')]
        repo: Option<String>,

        /// Show the git operations without running them
        #[arg(long)]
        dry_run: bool,

        /// Preview the plan and ask before running it
        #[arg(long)]
        confirm: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Checkout {
            pr,
            repo,
            dry_run,
            confirm,
        } => {
            run_checkout(
                &args.path,
                CheckoutOptions {
                    selector: pr,
                    repo,
                    dry_run,
                    confirm,
                },
            )
            .await
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "checkout failed");
        eprintln!("{} {e}", "error:".error());
        std::process::exit(1);
    }
}
