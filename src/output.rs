use std::path::Path;

use clap::ValueEnum;
use colored::Colorize;

use crate::error::Result;
use crate::model::{ItemOutcome, MigrationPlan, MigrationReport, OutcomeStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

pub fn print_report(report: &MigrationReport, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(report)?),
        Format::Pretty => {
            println!(
                "{}",
                format!(
                    "Migrated {} of {} posts from {} to {}",
                    report.migrated,
                    report.outcomes.len(),
                    report.source_root.display(),
                    report.destination_root.display()
                )
                .bold()
            );
            for outcome in &report.outcomes {
                print_outcome_pretty(outcome);
            }
            if report.aborted {
                println!("{}", "Stopped at first failure (--fail-fast)".yellow());
            }
        }
        Format::Minimal => {
            println!("{:8} {:24} DESTINATION", "STATUS", "SOURCE");
            println!("{}", "-".repeat(60));
            for outcome in &report.outcomes {
                let target = match outcome.status {
                    OutcomeStatus::Migrated => outcome
                        .destination
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    OutcomeStatus::Failed => outcome.error_code.clone().unwrap_or_default(),
                };
                println!(
                    "{:8} {:24} {}",
                    outcome.status.to_string(),
                    truncate_name(&file_label(&outcome.source), 24),
                    target
                );
            }
        }
    }
    Ok(())
}

fn print_outcome_pretty(outcome: &ItemOutcome) {
    let name = file_label(&outcome.source);
    match outcome.status {
        OutcomeStatus::Migrated => {
            let dest = outcome
                .destination
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            println!("  {} {} -> {}", "ok".green(), name, dest);
        }
        OutcomeStatus::Failed => {
            let message = outcome.error.as_deref().unwrap_or("unknown error");
            println!("  {} {}: {}", "failed".red(), name, message);
        }
    }
}

pub fn print_plan(plan: &MigrationPlan, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(plan)?),
        Format::Pretty => {
            println!(
                "{}",
                format!(
                    "Dry run: {} posts from {} (no files written)",
                    plan.item_count,
                    plan.source_root.display()
                )
                .bold()
            );
            for item in &plan.items {
                let name = file_label(&item.source);
                let Some(dest) = item.destination.as_deref() else {
                    let message = item.error.as_deref().unwrap_or("cannot derive tokens");
                    println!("  {} {}: {}", "skip".red(), name, message);
                    continue;
                };

                let mut flags = Vec::new();
                if item.conflict {
                    flags.push("conflict".red().to_string());
                }
                if item.truncated {
                    flags.push("truncated-slug".yellow().to_string());
                }
                if item.date_suspect {
                    flags.push("odd-date".yellow().to_string());
                }
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(" "))
                };
                let date = item.date.as_deref().unwrap_or("-");
                println!("  {} ({}) -> {}{}", name, date, dest.display(), flags);
            }
            if plan.conflicts > 0 {
                println!(
                    "{}",
                    format!("{} posts would fail with a destination conflict", plan.conflicts)
                        .red()
                );
            }
        }
        Format::Minimal => {
            println!("dry-run {} {}", plan.item_count, plan.source_root.display());
            for item in &plan.items {
                let slug = item.slug.as_deref().unwrap_or("-");
                let marker = if item.error.is_some() {
                    "!"
                } else if item.conflict {
                    "x"
                } else {
                    " "
                };
                println!(
                    "{} {:24} {}",
                    marker,
                    truncate_name(&file_label(&item.source), 24),
                    slug
                );
            }
        }
    }
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() > max_len {
        let truncated: String = name.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        name.to_string()
    }
}
