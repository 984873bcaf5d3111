// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide embedding model, loaded lazily and at most once.
//!
//! Every index and every query embeds through the same [`EmbeddingModel`],
//! so passage and query vectors always come from one adapter instance.

use std::sync::Arc;

use async_trait::async_trait;
use fitwise_core::{EmbeddingAdapter, EmbeddingInput, FitwiseError};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::embedder::OnnxEmbedder;
use crate::model_manager::ModelManager;

/// Produces the embedding adapter on first use.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn EmbeddingAdapter>, FitwiseError>;
}

/// Downloads (if needed) and opens the pinned ONNX model.
pub struct OnnxModelLoader {
    manager: ModelManager,
}

impl OnnxModelLoader {
    pub fn new(manager: ModelManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl ModelLoader for OnnxModelLoader {
    async fn load(&self) -> Result<Arc<dyn EmbeddingAdapter>, FitwiseError> {
        let model_path = self.manager.ensure_model().await?;
        let model_name = self.manager.model_name().to_string();
        let embedder = tokio::task::spawn_blocking(move || OnnxEmbedder::new(&model_path, &model_name))
            .await
            .map_err(|e| FitwiseError::ModelUnavailable(format!("model load task failed: {e}")))??;
        Ok(Arc::new(embedder))
    }
}

/// An adapter that is already constructed.
struct Preloaded(Arc<dyn EmbeddingAdapter>);

#[async_trait]
impl ModelLoader for Preloaded {
    async fn load(&self) -> Result<Arc<dyn EmbeddingAdapter>, FitwiseError> {
        Ok(Arc::clone(&self.0))
    }
}

/// Shared handle to the embedding model.
///
/// Concurrent first callers wait behind a single load. The outcome,
/// success or failure, is kept for the lifetime of the handle; a failed
/// load is not retried.
pub struct EmbeddingModel {
    loader: Box<dyn ModelLoader>,
    slot: OnceCell<Result<Arc<dyn EmbeddingAdapter>, String>>,
}

impl EmbeddingModel {
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            slot: OnceCell::new(),
        }
    }

    pub fn from_adapter(adapter: Arc<dyn EmbeddingAdapter>) -> Self {
        Self::new(Preloaded(adapter))
    }

    /// The loaded adapter, loading it on first call.
    pub async fn adapter(&self) -> Result<Arc<dyn EmbeddingAdapter>, FitwiseError> {
        let slot = self
            .slot
            .get_or_init(|| async {
                match self.loader.load().await {
                    Ok(adapter) => {
                        info!(model = %adapter.identity(), "embedding model loaded");
                        Ok(adapter)
                    }
                    Err(e) => {
                        warn!(error = %e, "embedding model failed to load");
                        Err(match e {
                            FitwiseError::ModelUnavailable(message) => message,
                            other => other.to_string(),
                        })
                    }
                }
            })
            .await;
        slot.clone().map_err(FitwiseError::ModelUnavailable)
    }

    /// True once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self.slot.get(), Some(Ok(_)))
    }

    /// The failure message of a load that already failed.
    pub fn load_error(&self) -> Option<&str> {
        match self.slot.get() {
            Some(Err(message)) => Some(message),
            _ => None,
        }
    }

    /// Embeds `texts` in order, checking the adapter returned one vector each.
    pub async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, FitwiseError> {
        let adapter = self.adapter().await?;
        let expected = texts.len();
        let output = adapter.embed(EmbeddingInput { texts }).await?;
        if output.embeddings.len() != expected {
            return Err(FitwiseError::Embedding(format!(
                "expected {expected} vectors, adapter returned {}",
                output.embeddings.len()
            )));
        }
        Ok(output.embeddings)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fitwise_test_utils::MockEmbedder;

    use super::*;

    struct CountingLoader {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl ModelLoader for CountingLoader {
        async fn load(&self) -> Result<Arc<dyn EmbeddingAdapter>, FitwiseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail {
                Err(FitwiseError::ModelUnavailable("weights missing".into()))
            } else {
                Ok(Arc::new(MockEmbedder::new()))
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_share_one_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = Arc::new(EmbeddingModel::new(CountingLoader {
            calls: Arc::clone(&calls),
            fail: false,
        }));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let model = Arc::clone(&model);
                tokio::spawn(async move { model.adapter().await.is_ok() })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(model.is_loaded());
    }

    #[tokio::test]
    async fn failed_load_is_remembered() {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = EmbeddingModel::new(CountingLoader {
            calls: Arc::clone(&calls),
            fail: true,
        });

        for _ in 0..3 {
            let err = model.adapter().await.err().unwrap();
            assert!(matches!(err, FitwiseError::ModelUnavailable(_)));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!model.is_loaded());
        assert!(model.load_error().unwrap().contains("weights missing"));
    }

    #[tokio::test]
    async fn embed_returns_one_vector_per_text() {
        let model = EmbeddingModel::from_adapter(Arc::new(MockEmbedder::new()));
        let vectors = model
            .embed(vec!["squats".into(), "oatmeal".into()])
            .await
            .unwrap();
        assert_eq!(vectors.len(), 2);
    }
}
