//! Checkout command - check out a pull request locally

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow, check, spinner_style};
use anstream::println;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use pr_checkout::checkout::{CheckoutPlan, create_checkout_plan, execute_checkout};
use pr_checkout::error::{Error, Result};
use pr_checkout::platform::{create_platform_service, fetch_pull_request, parse_pr_selector};
use pr_checkout::repo::SystemGit;
use pr_checkout::types::PullRequest;
use std::path::Path;
use std::time::Duration;

/// Options for the checkout command
#[derive(Debug, Clone, Default)]
pub struct CheckoutOptions {
    /// PR number, URL, or head branch
    pub selector: String,
    /// Repository override (`[HOST/]OWNER/REPO`)
    pub repo: Option<String>,
    /// Show the plan without running it
    pub dry_run: bool,
    /// Preview plan and prompt for confirmation before executing
    pub confirm: bool,
}

/// Run the checkout command
#[allow(clippy::future_not_send)]
pub async fn run_checkout(path: &Path, options: CheckoutOptions) -> Result<()> {
    // =========================================================================
    // Phase 1: GATHER
    // =========================================================================

    let ctx = CommandContext::new(path)?;
    let selector = parse_pr_selector(&options.selector)?;
    let repo_config = ctx.lookup_repo(&selector, options.repo.as_deref())?;
    let platform = create_platform_service(&repo_config).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching pull request {}...", selector.emphasis()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let pr = match fetch_pull_request(platform.as_ref(), &selector).await {
        Ok(pr) => pr,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    spinner.finish_with_message(format!(
        "{} PR {}: {}",
        check(),
        pr_link(&pr).accent(),
        pr.title
    ));

    // =========================================================================
    // Phase 2: PLAN
    // =========================================================================

    let plan = create_checkout_plan(
        &ctx.remotes,
        &pr,
        &ctx.repo,
        repo_config.host_or_default(),
    )?;

    if options.dry_run {
        print_plan(&plan);
        println!("{}", "Run without --dry-run to execute.".muted());
        return Ok(());
    }

    if options.confirm || ctx.config.checkout.confirm {
        print_plan(&plan);
        if !Confirm::new()
            .with_prompt("Proceed with checkout?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    // =========================================================================
    // Phase 3: EXECUTE
    // =========================================================================

    let runner = SystemGit::in_dir(&ctx.workdir);
    let result = execute_checkout(&plan, &runner, &CliProgress);

    if let Some(failed) = &result.failed_step {
        println!();
        println!(
            "{} {} of {} steps completed; stopped at: {}",
            "⚠".warn(),
            result.applied.len(),
            plan.len(),
            failed.to_string().warn()
        );
    }

    result.into_result()
}

/// PR number, as a terminal hyperlink when supported
fn pr_link(pr: &PullRequest) -> String {
    let label = format!("#{}", pr.number);
    if supports_hyperlinks::supports_hyperlinks() {
        terminal_link::Link::new(&label, &pr.url).to_string()
    } else {
        label
    }
}

/// Print the resolved checkout for --dry-run and --confirm
fn print_plan(plan: &CheckoutPlan) {
    println!("{}:", "Checkout plan".emphasis());
    println!();
    println!("  Base remote: {}", plan.base_remote.accent());
    println!(
        "  Head remote: {}",
        plan.head_remote
            .as_deref()
            .map_or_else(|| "(none, using pull ref)".muted(), |r| r.accent())
    );
    println!("  Branch:      {}", plan.branch_name.accent());
    println!();

    println!("  {}:", "Steps".emphasis());
    for step in &plan.steps {
        println!("    {} git {}", arrow(), step.to_git_args().join(" "));
    }
    println!();
}
