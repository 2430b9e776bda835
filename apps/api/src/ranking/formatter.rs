//! Ranking Formatter: orders scored candidates and prepares them for presentation.

use serde::{Deserialize, Serialize};

/// Decimal places kept when a score leaves the engine (JSON body, CSV table).
pub const SCORE_DECIMALS: i32 = 4;

/// A candidate after scoring, still in batch order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub identifier: String,
    pub source_reference: String,
    pub score: f64,
}

/// One row of the final ranking. `rank` starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub name: String,
    pub source_reference: String,
    /// Raw cosine similarity in [0, 1].
    pub score: f64,
}

impl RankedCandidate {
    /// Score as emitted at the boundary: fraction rounded to `SCORE_DECIMALS`.
    pub fn presented_score(&self) -> f64 {
        round_score(self.score)
    }

    pub fn percentage(&self) -> f64 {
        self.score * 100.0
    }
}

/// Row shape served on the legacy `/analizar` path. `puntaje` is the same
/// rounded fraction as `RankedCandidate::score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRankedCandidate {
    pub nombre: String,
    pub archivo: String,
    pub puntaje: f64,
}

impl From<&RankedCandidate> for LegacyRankedCandidate {
    fn from(c: &RankedCandidate) -> Self {
        LegacyRankedCandidate {
            nombre: c.name.clone(),
            archivo: c.source_reference.clone(),
            puntaje: c.presented_score(),
        }
    }
}

/// Candidates ordered by descending score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingResult {
    candidates: Vec<RankedCandidate>,
}

impl RankingResult {
    pub fn candidates(&self) -> &[RankedCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// The top-ranked candidate, if any.
    pub fn recommended(&self) -> Option<&RankedCandidate> {
        self.candidates.first()
    }

    /// Rows for the external contract, scores rounded.
    pub fn presented(&self) -> Vec<RankedCandidate> {
        self.candidates
            .iter()
            .map(|c| RankedCandidate {
                score: c.presented_score(),
                ..c.clone()
            })
            .collect()
    }

    pub fn presented_legacy(&self) -> Vec<LegacyRankedCandidate> {
        self.candidates.iter().map(LegacyRankedCandidate::from).collect()
    }
}

/// Sorts by descending score. Equal scores keep their batch order.
pub fn rank(scored: Vec<ScoredCandidate>) -> RankingResult {
    let mut scored = scored;
    // `sort_by` is stable; `total_cmp` gives NaN a fixed place instead of panicking.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let candidates = scored
        .into_iter()
        .enumerate()
        .map(|(idx, c)| RankedCandidate {
            rank: idx + 1,
            name: c.identifier,
            source_reference: c.source_reference,
            score: c.score,
        })
        .collect();

    RankingResult { candidates }
}

/// Rounds half away from zero to `SCORE_DECIMALS` places.
pub fn round_score(score: f64) -> f64 {
    let factor = 10_f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}
