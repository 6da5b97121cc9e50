//! Cross-library matching command.

use crate::cli::commands::{run_with_progress, save_last_paths};
use crate::core::title::MatchMode;
use crate::models::config::load_config;
use crate::models::media::{CrossScanReport, ScanStatus};
use crate::utils::fs::format_file_size;
use colored::Colorize;
use std::path::PathBuf;

/// Match movie folders across library roots and print the duplicate groups.
pub async fn cross_scan(roots: &[PathBuf], mode: &str, format: &str) -> anyhow::Result<()> {
    let mode: MatchMode = mode.parse()?;
    let config = load_config()?;
    let roots = roots.to_vec();

    let report = run_with_progress(|engine, progress, cancel| {
        let roots = roots.clone();
        let config = config.clone();
        async move {
            engine
                .scan_cross_library(roots, mode, config, Some(progress), cancel)
                .await
        }
    })
    .await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_report(&report),
    }

    save_last_paths(report.roots.clone());
    Ok(())
}

fn print_report(report: &CrossScanReport) {
    println!(
        "{} {} roots, {} mode, {} duplicate groups",
        "Cross-library scan:".bold(),
        report.roots.len(),
        report.mode,
        report.groups.len()
    );
    println!();

    for group in &report.groups {
        println!("{}", group.key.bold());
        for member in &group.members {
            let marker = if member.recommended {
                " [BEST]".green().bold().to_string()
            } else {
                String::new()
            };
            println!(
                "  {:>6.1}  {} ({}, {} files){}",
                member.folder.score.total,
                member.folder.path.display(),
                format_file_size(member.folder.total_size),
                member.folder.files.len(),
                marker
            );
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("{}", "Warnings:".yellow().bold());
        for warning in &report.warnings {
            println!(
                "  {}: {}",
                warning.path.display().to_string().yellow(),
                warning.reason
            );
        }
        println!();
    }

    if report.status == ScanStatus::Cancelled {
        println!("{}", "Scan cancelled - results are partial.".yellow());
    }
}
