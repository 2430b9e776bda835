// Candidate ranking engine.
// Flow: PDF folder → extractor → identifier + normalizer → vector space → formatter.
// Each request is an independent batch; no model or vocabulary outlives it.

pub mod export;
pub mod extractor;
pub mod formatter;
pub mod handlers;
pub mod identifier;
pub mod normalizer;
pub mod pipeline;
pub mod profile;
pub mod vector_space;
