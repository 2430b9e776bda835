//! Axum route handlers for the Ranking API.

use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::ranking::export::write_ranking_csv;
use crate::ranking::formatter::{LegacyRankedCandidate, RankedCandidate, RankingResult};
use crate::ranking::pipeline::{rank_folder, BatchOutcome};
use crate::ranking::profile::{TargetProfile, DEFAULT_PROFILE};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RankRequest {
    #[serde(default, alias = "profile")]
    pub perfil: Option<String>,
}

/// An empty body is a request for the default profile.
fn parse_request(body: &[u8]) -> Result<RankRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RankRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

/// POST /api/v1/rankings
///
/// Ranks every PDF in the configured folder against the requested profile.
/// A missing body or a profile under 20 characters ranks against the default profile.
pub async fn handle_rank(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<RankedCandidate>>, AppError> {
    let ranking = run_ranking(&state, &body).await?;
    Ok(Json(ranking.presented()))
}

/// POST /analizar
///
/// Same ranking, in the `{nombre, archivo, puntaje}` shape the Node.js front-end reads.
pub async fn handle_rank_legacy(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<LegacyRankedCandidate>>, AppError> {
    let ranking = run_ranking(&state, &body).await?;
    Ok(Json(ranking.presented_legacy()))
}

async fn run_ranking(state: &AppState, body: &[u8]) -> Result<RankingResult, AppError> {
    let request = parse_request(body)?;

    let profile = TargetProfile::resolve(request.perfil.as_deref(), DEFAULT_PROFILE);
    info!(
        default_profile = profile.is_default(),
        profile = %profile.preview(80),
        "ranking request received"
    );

    let folder = state.config.cv_folder.clone();
    let vectorizer = state.config.vectorizer;
    let extractor = state.extractor.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        rank_folder(&folder, &profile, extractor.as_ref(), vectorizer)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("ranking task failed: {e}")))??;

    let report = match outcome {
        BatchOutcome::Ranked(report) => report,
        BatchOutcome::NoPdfs { .. } => {
            return Err(AppError::NoCandidates(
                "No PDF files found in the candidate folder.".to_string(),
            ))
        }
        BatchOutcome::NothingExtracted { failures } => {
            return Err(AppError::NoCandidates(format!(
                "None of the {} PDF files produced readable text.",
                failures.len()
            )))
        }
    };

    info!(
        candidates = report.ranking.len(),
        excluded = report.failures.len(),
        pdfs = report.pdf_count,
        "ranking completed"
    );

    if let Some(path) = &state.config.ranking_csv_path {
        match write_ranking_csv(path, &report.ranking) {
            Ok(()) => info!(path = %path.display(), "ranking table written"),
            Err(e) => error!(path = %path.display(), "failed to write ranking table: {e:#}"),
        }
    }

    for row in report.ranking.candidates() {
        info!(
            rank = row.rank,
            name = %row.name,
            score = %format!("{:.2}%", row.percentage()),
            "ranked"
        );
    }

    Ok(report.ranking)
}
