use std::sync::Arc;

use crate::config::Config;
use crate::ranking::extractor::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds configuration only; no ranking state survives a request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
