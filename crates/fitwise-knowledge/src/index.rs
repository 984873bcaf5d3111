// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Double-buffered embedding index over corpus passages.
//!
//! A rebuild embeds the new corpus off to the side and then swaps a single
//! pointer, so a query holds either the complete old snapshot or the
//! complete new one.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use fitwise_core::FitwiseError;
use tracing::{info, warn};

use crate::corpus::CorpusDocument;
use crate::model::EmbeddingModel;

/// Passages and their vectors, aligned by position.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    passages: Vec<String>,
    vectors: Vec<Vec<f32>>,
    model_id: String,
}

/// Handle to an immutable snapshot returned by [`EmbeddingIndex::rebuild`].
pub type IndexHandle = Arc<IndexSnapshot>;

impl IndexSnapshot {
    /// Fails unless there is exactly one vector per passage.
    pub fn new(
        passages: Vec<String>,
        vectors: Vec<Vec<f32>>,
        model_id: impl Into<String>,
    ) -> Result<Self, FitwiseError> {
        if passages.len() != vectors.len() {
            return Err(FitwiseError::Embedding(format!(
                "{} passages but {} vectors",
                passages.len(),
                vectors.len()
            )));
        }
        Ok(Self {
            passages,
            vectors,
            model_id: model_id.into(),
        })
    }

    pub fn passages(&self) -> &[String] {
        &self.passages
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    /// Identity of the adapter that produced the vectors.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

/// The current searchable snapshot for one corpus.
pub struct EmbeddingIndex {
    model: Arc<EmbeddingModel>,
    current: ArcSwapOption<IndexSnapshot>,
}

impl EmbeddingIndex {
    pub fn new(model: Arc<EmbeddingModel>) -> Self {
        Self {
            model,
            current: ArcSwapOption::empty(),
        }
    }

    /// The model shared by indexing and querying.
    pub fn model(&self) -> &Arc<EmbeddingModel> {
        &self.model
    }

    /// Re-embeds every passage of `doc` and publishes the result.
    ///
    /// On failure the index is cleared, so `is_ready` reports false until a
    /// later rebuild succeeds.
    pub async fn rebuild(&self, doc: &CorpusDocument) -> Result<IndexHandle, FitwiseError> {
        match self.embed_document(doc).await {
            Ok(snapshot) => {
                let handle = Arc::new(snapshot);
                self.current.store(Some(Arc::clone(&handle)));
                info!(passages = handle.len(), model = handle.model_id(), "embedding index rebuilt");
                Ok(handle)
            }
            Err(e) => {
                self.current.store(None);
                warn!(error = %e, "embedding index rebuild failed");
                Err(e)
            }
        }
    }

    async fn embed_document(&self, doc: &CorpusDocument) -> Result<IndexSnapshot, FitwiseError> {
        let adapter = self.model.adapter().await?;
        let passages = doc.passages().to_vec();
        let vectors = if passages.is_empty() {
            Vec::new()
        } else {
            self.model.embed(passages.clone()).await?
        };
        IndexSnapshot::new(passages, vectors, adapter.identity())
    }

    /// True once a rebuild has completed and not been invalidated since.
    pub fn is_ready(&self) -> bool {
        self.current.load().is_some()
    }

    /// The snapshot queries should run against, if any.
    pub fn snapshot(&self) -> Option<IndexHandle> {
        self.current.load_full()
    }

    pub fn clear(&self) {
        self.current.store(None);
    }
}

#[cfg(test)]
mod tests {
    use fitwise_test_utils::{FailingEmbedder, MockEmbedder};

    use super::*;

    fn index() -> EmbeddingIndex {
        EmbeddingIndex::new(Arc::new(EmbeddingModel::from_adapter(Arc::new(
            MockEmbedder::new(),
        ))))
    }

    #[test]
    fn snapshot_rejects_misaligned_vectors() {
        let err = IndexSnapshot::new(vec!["a".into(), "b".into()], vec![vec![1.0]], "m").unwrap_err();
        assert!(matches!(err, FitwiseError::Embedding(_)));
    }

    #[tokio::test]
    async fn not_ready_before_first_rebuild() {
        let index = index();
        assert!(!index.is_ready());
        assert!(index.snapshot().is_none());
    }

    #[tokio::test]
    async fn rebuild_aligns_vectors_with_passages() {
        let index = index();
        let doc = CorpusDocument::from_passages(["I like running", "I eat chicken daily", "Sleep"]);
        let handle = index.rebuild(&doc).await.unwrap();
        assert!(index.is_ready());
        assert_eq!(handle.len(), doc.len());
        assert_eq!(handle.vectors().len(), doc.len());
        assert_eq!(handle.passages(), doc.passages());
    }

    #[tokio::test]
    async fn rebuild_replaces_previous_snapshot() {
        let index = index();
        let old = index
            .rebuild(&CorpusDocument::from_passages(["one", "two", "three"]))
            .await
            .unwrap();
        index.rebuild(&CorpusDocument::from_passages(["four"])).await.unwrap();

        // A holder of the old handle still sees a complete old snapshot.
        assert_eq!(old.len(), 3);
        assert_eq!(old.vectors().len(), 3);
        let current = index.snapshot().unwrap();
        assert_eq!(current.passages(), ["four".to_string()]);
    }

    #[tokio::test]
    async fn identical_corpus_gives_identical_vectors() {
        let index = index();
        let doc = CorpusDocument::from_passages(["squat 3x10", "oatmeal breakfast"]);
        let first = index.rebuild(&doc).await.unwrap();
        let second = index.rebuild(&doc).await.unwrap();
        assert_eq!(first.vectors(), second.vectors());
    }

    #[tokio::test]
    async fn failed_rebuild_clears_index() {
        let model = Arc::new(EmbeddingModel::from_adapter(Arc::new(FailingEmbedder)));
        let index = EmbeddingIndex::new(model);
        let err = index.rebuild(&CorpusDocument::sentinel()).await.unwrap_err();
        assert!(matches!(err, FitwiseError::Embedding(_)));
        assert!(!index.is_ready());
    }
}
