use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::ranking::formatter::RankingResult;

/// Overwrites `path` with the ranking as `name,source_reference,score`, ranked order.
pub fn write_ranking_csv(path: &Path, ranking: &RankingResult) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    writer.write_record(["name", "source_reference", "score"])?;
    for candidate in ranking.candidates() {
        let score = format!("{:.4}", candidate.presented_score());
        writer.write_record([
            candidate.name.as_str(),
            candidate.source_reference.as_str(),
            score.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
