//! Standalone scoring command.

use crate::core::quality;
use colored::Colorize;

/// Score a name and size without touching the filesystem.
pub fn score_name(name: &str, size_bytes: u64, format: &str) -> anyhow::Result<()> {
    let score = quality::score(name, size_bytes);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&score)?);
        return Ok(());
    }

    println!("{} {}", "Name:".bold(), name);
    println!(
        "{} {} | {} | {}",
        "Detected:".bold(),
        score.attributes.resolution,
        score.attributes.codec,
        score.attributes.source
    );
    println!(
        "{} size {:.1} | codec {:.1} | resolution {:.1} | source {:.1}",
        "Factors:".bold(),
        score.size_factor,
        score.codec_factor,
        score.resolution_factor,
        score.source_factor
    );
    println!("{} {:.2}", "Total:".bold(), score.total);
    Ok(())
}
