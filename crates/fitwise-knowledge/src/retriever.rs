// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cosine-similarity retrieval over the current index snapshot.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::index::EmbeddingIndex;

/// Text of a query made before any index was built.
pub const NOT_READY_MESSAGE: &str = "Knowledge base embeddings are not initialized.";

/// Text of a query that ranked nothing.
pub const NO_MATCH_MESSAGE: &str = "No relevant information found in the knowledge base.";

/// Separator between passages in the rendered result.
const PASSAGE_SEPARATOR: &str = " \n";

/// Why a result does or does not carry passages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalStatus {
    /// Passages ranked by descending similarity.
    Ranked,
    /// No snapshot to search yet.
    NotReady,
    /// A snapshot exists but nothing was selected (empty index or `top_k` of 0).
    NoMatches,
    /// Embedding the query failed.
    Unavailable(String),
}

/// One selected passage and its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPassage {
    /// Position of the passage in the corpus.
    pub index: usize,
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalResult {
    pub status: RetrievalStatus,
    pub passages: Vec<ScoredPassage>,
}

impl RetrievalResult {
    fn empty(status: RetrievalStatus) -> Self {
        Self {
            status,
            passages: Vec::new(),
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.status == RetrievalStatus::Ranked
    }

    /// Plain text for a tool caller: the passages, or a fixed message.
    pub fn to_text(&self) -> String {
        match &self.status {
            RetrievalStatus::Ranked => self
                .passages
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(PASSAGE_SEPARATOR),
            RetrievalStatus::NotReady | RetrievalStatus::Unavailable(_) => {
                NOT_READY_MESSAGE.to_string()
            }
            RetrievalStatus::NoMatches => NO_MATCH_MESSAGE.to_string(),
        }
    }
}

/// Answers free-text queries against an [`EmbeddingIndex`].
#[derive(Clone)]
pub struct Retriever {
    index: Arc<EmbeddingIndex>,
}

impl Retriever {
    pub fn new(index: Arc<EmbeddingIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &Arc<EmbeddingIndex> {
        &self.index
    }

    /// The `top_k` passages most similar to `text`.
    ///
    /// Never fails: every problem is reported through the result status.
    pub async fn query(&self, text: &str, top_k: usize) -> RetrievalResult {
        let Some(snapshot) = self.index.snapshot() else {
            return RetrievalResult::empty(RetrievalStatus::NotReady);
        };
        if top_k == 0 || snapshot.is_empty() {
            return RetrievalResult::empty(RetrievalStatus::NoMatches);
        }

        let adapter = match self.index.model().adapter().await {
            Ok(adapter) => adapter,
            Err(e) => return RetrievalResult::empty(RetrievalStatus::Unavailable(e.to_string())),
        };
        if adapter.identity() != snapshot.model_id() {
            warn!(index_model = snapshot.model_id(), query_model = %adapter.identity(), "model mismatch");
            return RetrievalResult::empty(RetrievalStatus::Unavailable(
                "index was built with a different model".into(),
            ));
        }

        let query_vector = match self.index.model().embed(vec![text.to_string()]).await {
            Ok(mut vectors) => vectors.swap_remove(0),
            Err(e) => {
                warn!(error = %e, "query embedding failed");
                return RetrievalResult::empty(RetrievalStatus::Unavailable(e.to_string()));
            }
        };

        let ranked = rank(&query_vector, snapshot.vectors(), top_k);
        debug!(candidates = snapshot.len(), returned = ranked.len(), "query ranked");
        if ranked.is_empty() {
            return RetrievalResult::empty(RetrievalStatus::NoMatches);
        }
        RetrievalResult {
            status: RetrievalStatus::Ranked,
            passages: ranked
                .into_iter()
                .map(|(index, score)| ScoredPassage {
                    index,
                    text: snapshot.passages()[index].clone(),
                    score,
                })
                .collect(),
        }
    }
}

/// Cosine similarity; 0 when either vector has zero length or the
/// dimensions differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom > 0.0 { dot / denom } else { 0.0 }
}

/// Indices of the `top_k` best vectors with their scores, best first.
///
/// The sort is stable, so equal scores keep corpus order. NaN scores
/// rank last.
pub fn rank(query: &[f32], vectors: &[Vec<f32>], top_k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = vectors
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let score = cosine_similarity(query, v);
            (i, if score.is_nan() { f32::NEG_INFINITY } else { score })
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(top_k);
    scored
}
