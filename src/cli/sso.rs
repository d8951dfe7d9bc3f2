//! SSO group-mapping commands

use std::process::ExitCode;

use clap::Args;
use colored::Colorize;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::cli::progress::Spinner;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::AtlanClient;
use crate::error::{Error, Result};
use crate::models::MappingDisplay;
use crate::models::display::common::or_dash;
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::sso::{
    CleanupMode, CleanupSummary, ConfirmDeletion, MappingReport, OrphanDiagnostic,
    OrphanedMapping,
};

/// Arguments shared by the SSO commands.
#[derive(Args, Debug, Clone)]
pub struct SsoArgs {
    /// Alias of the identity provider (e.g. okta, azure)
    #[arg(long)]
    pub sso_alias: String,

    /// Only consider mappings recorded against this Atlan group name
    #[arg(long)]
    pub group_name: Option<String>,
}

/// Asks on the terminal before each deletion.
struct PromptConfirm;

impl ConfirmDeletion for PromptConfirm {
    fn confirm(&mut self, mapping: &OrphanedMapping) -> Result<bool> {
        let mapper = &mapping.mapper;
        let prompt = format!(
            "Delete mapping {} (group '{}', IdP group '{}'): {}?",
            or_dash(mapper.id.as_deref()),
            or_dash(mapper.group_name()),
            or_dash(mapper.attribute_value()),
            mapping.reason_summary()
        );

        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }
}

/// Fetch and classify with a spinner running.
async fn run_diagnostic(client: &AtlanClient, args: &SsoArgs) -> Result<MappingReport> {
    let spinner = Spinner::start(&format!(
        "Checking group mappings of '{}'...",
        args.sso_alias
    ));
    let report = OrphanDiagnostic::new(client)
        .diagnose(&args.sso_alias, args.group_name.as_deref())
        .await;
    spinner.finish_and_clear();
    report
}

fn print_summary(report: &MappingReport, sso_alias: &str) {
    println!("{}", format!("SSO group mappings for '{}'", sso_alias).bold());
    println!("  {} {} valid", "✓".green(), report.valid.len());
    let orphaned = format!("{} orphaned", report.orphaned.len());
    if report.has_orphans() {
        println!("  {} {}", "✗".red(), orphaned.red());
    } else {
        println!("  {} {}", "✓".green(), orphaned);
    }
    if !report.suspicious.is_empty() {
        println!(
            "  {} {} suspicious (missing data)",
            "⚠".yellow(),
            report.suspicious.len()
        );
    }
    if !report.duplicate_group_names.is_empty() {
        println!(
            "  {} duplicate group names: {}",
            "⚠".yellow(),
            report.duplicate_group_names.join(", ")
        );
    }
}

/// Rows worth attention: orphaned, then suspicious.
fn problem_rows(report: &MappingReport) -> Vec<MappingDisplay> {
    report
        .orphaned
        .iter()
        .map(MappingDisplay::from)
        .chain(report.suspicious.iter().map(MappingDisplay::from))
        .collect()
}

/// Run the diagnose command. Fails (exit code 1) when orphans are found.
pub async fn diagnose(opts: &GlobalOptions, args: &SsoArgs) -> Result<ExitCode> {
    let ctx = CommandContext::new(opts)?;
    let report = run_diagnostic(&ctx.client, args).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&report)?),
        OutputFormat::Table => problem_rows(&report).print(ctx.format)?,
        OutputFormat::Pretty => {
            print_summary(&report, &args.sso_alias);
            let rows = problem_rows(&report);
            if !rows.is_empty() {
                println!();
                rows.print(ctx.format)?;
                println!(
                    "\nRun {} to remove orphaned mappings.",
                    format!("atlanop sso cleanup --sso-alias {}", args.sso_alias).cyan()
                );
            }
        }
    }

    Ok(if report.has_orphans() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Run the list command: every mapping with its classification.
pub async fn list(opts: &GlobalOptions, args: &SsoArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let report = run_diagnostic(&ctx.client, args).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&report)?),
        OutputFormat::Table => MappingDisplay::rows(&report).print(ctx.format)?,
        OutputFormat::Pretty => {
            MappingDisplay::rows(&report).print(ctx.format)?;
            println!();
            print_summary(&report, &args.sso_alias);
        }
    }

    Ok(())
}

/// Ask for a typed `yes` before an unattended batch delete.
fn confirm_batch(count: usize, sso_alias: &str) -> Result<bool> {
    eprintln!(
        "{} {} mappings will be deleted from '{}'. This cannot be undone.",
        "⚠".yellow(),
        count,
        sso_alias
    );
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Type 'yes' to continue")
        .allow_empty(true)
        .interact_text()?;
    Ok(answer.trim() == "yes")
}

fn print_cleanup_summary(summary: &CleanupSummary, total: usize) {
    println!(
        "{} Deleted {} of {} orphaned mappings",
        "✓".green(),
        summary.deleted,
        total
    );
    if summary.skipped > 0 {
        println!("  Kept {} at your request", summary.skipped);
    }
    for failure in &summary.failed {
        eprintln!(
            "{} {}: {}",
            "✗".red(),
            or_dash(failure.mapper_id.as_deref().or(failure.mapper_name.as_deref())),
            failure.error
        );
    }
}

/// Run the cleanup command.
pub async fn cleanup(opts: &GlobalOptions, args: &SsoArgs, non_interactive: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut diagnostic = OrphanDiagnostic::new(&*ctx.client);

    let spinner = Spinner::start(&format!(
        "Checking group mappings of '{}'...",
        args.sso_alias
    ));
    let report = diagnostic
        .diagnose(&args.sso_alias, args.group_name.as_deref())
        .await;
    spinner.finish_and_clear();
    let report = report?;

    if !report.has_orphans() {
        match ctx.format {
            OutputFormat::Json => println!("{}", format_json(&CleanupSummary::default())?),
            _ => println!("{} No orphaned mappings found", "✓".green()),
        }
        return Ok(());
    }

    if ctx.format != OutputFormat::Json {
        problem_rows(&report).print(ctx.format)?;
        println!();
    }

    let total = report.orphaned.len();
    let mut prompt = PromptConfirm;
    let mode = if non_interactive {
        if !confirm_batch(total, &args.sso_alias)? {
            eprintln!("Cancelled.");
            return Ok(());
        }
        CleanupMode::Batch
    } else {
        CleanupMode::Interactive(&mut prompt)
    };

    let summary = diagnostic
        .cleanup(&args.sso_alias, &report.orphaned, mode)
        .await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&summary)?),
        _ => print_cleanup_summary(&summary, total),
    }

    if summary.failed.is_empty() {
        Ok(())
    } else {
        Err(Error::Other(format!(
            "{} of {} deletions failed",
            summary.failed.len(),
            total
        )))
    }
}
