//! Single-library scan command.

use crate::cli::commands::{run_with_progress, save_last_paths};
use crate::models::config::load_config;
use crate::models::media::{LibraryScanReport, ScanStatus};
use crate::utils::fs::format_file_size;
use colored::Colorize;
use std::path::Path;

/// Scan one library root and print its duplicate candidates.
pub async fn scan_library(root: &Path, format: &str) -> anyhow::Result<()> {
    let config = load_config()?;
    let root = root.to_path_buf();

    let report = run_with_progress(|engine, progress, cancel| {
        let root = root.clone();
        async move {
            engine
                .scan_single_library(root, config, Some(progress), cancel)
                .await
        }
    })
    .await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_report(&report),
    }

    save_last_paths([report.root.clone()]);
    Ok(())
}

fn print_report(report: &LibraryScanReport) {
    println!(
        "{} {}",
        "Library:".bold(),
        report.root.display().to_string().cyan()
    );
    println!(
        "{} movie folders, {} duplicate candidates",
        report.folders.len(),
        report.duplicate_folders().count()
    );
    println!();

    for folder in report.duplicate_folders() {
        println!(
            "{} ({} files, {})",
            folder.name.bold(),
            folder.files.len(),
            format_file_size(folder.total_size)
        );
        for file in &folder.files {
            let marker = if file.recommended {
                " [BEST]".green().bold().to_string()
            } else {
                String::new()
            };
            println!(
                "  {:>6.1}  {} ({}){}",
                file.score.total,
                file.file.filename,
                format_file_size(file.file.size),
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
