//! Batch pipeline: folder of PDFs + profile → ranked candidates.
//!
//! Blocking and single-threaded. Every call lists, extracts, normalizes and
//! fits from scratch; nothing is shared between calls.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::ranking::extractor::TextExtractor;
use crate::ranking::formatter::{rank, RankingResult, ScoredCandidate};
use crate::ranking::identifier::identify;
use crate::ranking::normalizer::normalize;
use crate::ranking::profile::TargetProfile;
use crate::ranking::vector_space::{score_candidates, VectorizerConfig};

/// Extension a file needs to be picked up. Matched case-sensitively on the raw name bytes.
const PDF_EXTENSION: &[u8] = b".pdf";

/// One résumé that passed extraction, before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub identifier: String,
    pub source_reference: String,
    pub normalized_text: String,
}

/// A PDF left out of the batch, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionFailure {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub ranking: RankingResult,
    pub failures: Vec<ExtractionFailure>,
    pub pdf_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The folder holds no PDFs. `folder_created` is set when it did not exist.
    NoPdfs { folder_created: bool },
    /// PDFs were found but none produced usable text.
    NothingExtracted { failures: Vec<ExtractionFailure> },
    Ranked(BatchReport),
}

/// Ranks every PDF in `folder` against `profile`.
///
/// Only folder-level I/O fails the call. Per-file problems end up in
/// `failures` and the rest of the batch continues.
pub fn rank_folder(
    folder: &Path,
    profile: &TargetProfile,
    extractor: &dyn TextExtractor,
    config: VectorizerConfig,
) -> Result<BatchOutcome> {
    info!(folder = %folder.display(), "starting ranking batch");

    if !folder.exists() {
        fs::create_dir_all(folder)
            .with_context(|| format!("Failed to create folder {}", folder.display()))?;
        info!(folder = %folder.display(), "folder created; place PDF files there");
        return Ok(BatchOutcome::NoPdfs {
            folder_created: true,
        });
    }

    let pdfs = list_pdfs(folder)?;
    if pdfs.is_empty() {
        info!(folder = %folder.display(), "no PDF files found");
        return Ok(BatchOutcome::NoPdfs {
            folder_created: false,
        });
    }
    info!(count = pdfs.len(), "PDF files found");

    let (candidates, failures) = collect_candidates(folder, &pdfs, extractor);
    if !failures.is_empty() {
        warn!(
            failed = failures.len(),
            total = pdfs.len(),
            "some PDF files were excluded"
        );
    }
    if candidates.is_empty() {
        warn!("no PDF file could be processed");
        return Ok(BatchOutcome::NothingExtracted { failures });
    }

    info!(
        processed = candidates.len(),
        profile_terms = profile.normalized_text().split_whitespace().count(),
        "scoring candidates"
    );
    let ranking = score_batch(candidates, profile, config);

    if let Some(top) = ranking.recommended() {
        info!(
            name = %top.name,
            file = %top.source_reference,
            score = %format!("{:.4} ({:.1}%)", top.score, top.percentage()),
            "recommended candidate"
        );
    }

    Ok(BatchOutcome::Ranked(BatchReport {
        ranking,
        failures,
        pdf_count: pdfs.len(),
    }))
}

/// Scores already-extracted candidates. Batch order is the tie-break order.
pub fn score_batch(
    candidates: Vec<Candidate>,
    profile: &TargetProfile,
    config: VectorizerConfig,
) -> RankingResult {
    let texts: Vec<&str> = candidates
        .iter()
        .map(|c| c.normalized_text.as_str())
        .collect();
    let scores = score_candidates(&texts, profile.normalized_text(), config);

    let scored = candidates
        .into_iter()
        .zip(scores)
        .map(|(c, score)| ScoredCandidate {
            identifier: c.identifier,
            source_reference: c.source_reference,
            score,
        })
        .collect();

    rank(scored)
}

/// PDF file names directly inside `folder`, sorted so batch order is reproducible.
/// Names need not be valid UTF-8.
pub fn list_pdfs(folder: &Path) -> Result<Vec<OsString>> {
    let entries = fs::read_dir(folder)
        .with_context(|| format!("Failed to list folder {}", folder.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list folder {}", folder.display()))?;
        let name = entry.file_name();
        if has_pdf_extension(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn has_pdf_extension(name: &OsStr) -> bool {
    name.as_encoded_bytes().ends_with(PDF_EXTENSION)
}

fn collect_candidates(
    folder: &Path,
    pdfs: &[OsString],
    extractor: &dyn TextExtractor,
) -> (Vec<Candidate>, Vec<ExtractionFailure>) {
    let mut candidates = Vec::new();
    let mut failures = Vec::new();

    for name in pdfs {
        // Lossy only for reporting; the file itself is opened by its real name.
        let file = name.to_string_lossy().into_owned();
        match extractor.extract(&folder.join(name)) {
            Ok(text) => {
                let candidate = Candidate {
                    identifier: identify(&text, &file),
                    source_reference: file.clone(),
                    normalized_text: normalize(&text),
                };
                debug!(
                    file = %file,
                    name = %candidate.identifier,
                    words = candidate.normalized_text.split_whitespace().count(),
                    "candidate processed"
                );
                candidates.push(candidate);
            }
            Err(e) => {
                warn!(file = %file, error = %e, "skipping PDF");
                failures.push(ExtractionFailure {
                    file,
                    reason: e.to_string(),
                });
            }
        }
    }

    (candidates, failures)
}
