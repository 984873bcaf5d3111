// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local sentence embeddings with an ONNX all-MiniLM-L6-v2 model.
//!
//! Texts are tokenized, padded into one batch, run through the session,
//! mean-pooled over the attention mask and L2-normalized. Inference runs
//! on the blocking pool.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fitwise_core::{
    AdapterType, EmbeddingAdapter, EmbeddingInput, EmbeddingOutput, FitwiseError, HealthStatus,
    PluginAdapter,
};
use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::TensorRef;

/// Output width of all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

struct Inference {
    session: Mutex<Session>,
    tokenizer: tokenizers::Tokenizer,
}

// Safety: the session is only reached through its Mutex and the tokenizer
// is only used for read-only encoding.
unsafe impl Send for Inference {}
unsafe impl Sync for Inference {}

/// Embedding adapter backed by a local ONNX session.
pub struct OnnxEmbedder {
    name: String,
    inner: Arc<Inference>,
}

impl OnnxEmbedder {
    /// Loads `model_path` and the `tokenizer.json` next to it.
    ///
    /// `model_name` becomes part of the adapter identity, so vectors from
    /// different models are never compared.
    pub fn new(model_path: &Path, model_name: &str) -> Result<Self, FitwiseError> {
        let unavailable = |what: &str, e: &dyn std::fmt::Display| {
            FitwiseError::ModelUnavailable(format!("{what}: {e}"))
        };

        let model_dir = model_path.parent().ok_or_else(|| {
            FitwiseError::ModelUnavailable(format!("invalid model path {}", model_path.display()))
        })?;
        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| unavailable(&format!("loading {}", tokenizer_path.display()), &e))?;

        let session = Session::builder()
            .map_err(|e| unavailable("creating session builder", &e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| unavailable("setting optimization level", &e))?
            .with_intra_threads(1)
            .map_err(|e| unavailable("setting thread count", &e))?
            .commit_from_file(model_path)
            .map_err(|e| unavailable(&format!("loading {}", model_path.display()), &e))?;

        Ok(Self {
            name: format!("onnx:{model_name}"),
            inner: Arc::new(Inference {
                session: Mutex::new(session),
                tokenizer,
            }),
        })
    }
}

impl Inference {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, FitwiseError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = texts
            .iter()
            .map(|t| self.tokenizer.encode(t.as_str(), true))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FitwiseError::Embedding(format!("tokenization failed: {e}")))?;

        let batch = encodings.len();
        let seq_len = encodings.iter().map(|e| e.get_ids().len()).max().unwrap_or(0);

        let mut input_ids = Array2::<i64>::zeros((batch, seq_len));
        let mut attention_mask = Array2::<i64>::zeros((batch, seq_len));
        let mut token_type_ids = Array2::<i64>::zeros((batch, seq_len));
        for (row, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let types = encoding.get_type_ids();
            for col in 0..ids.len() {
                input_ids[[row, col]] = i64::from(ids[col]);
                attention_mask[[row, col]] = i64::from(mask[col]);
                token_type_ids[[row, col]] = i64::from(types[col]);
            }
        }

        let ids_tensor = TensorRef::from_array_view(&input_ids).map_err(tensor_err)?;
        let mask_tensor = TensorRef::from_array_view(&attention_mask).map_err(tensor_err)?;
        let types_tensor = TensorRef::from_array_view(&token_type_ids).map_err(tensor_err)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| FitwiseError::Embedding(format!("session lock poisoned: {e}")))?;
        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => types_tensor
            ])
            .map_err(|e| FitwiseError::Embedding(format!("inference failed: {e}")))?;

        // [batch, seq_len, hidden]
        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| FitwiseError::Embedding(format!("reading output tensor: {e}")))?;
        let hidden = shape[shape.len() - 1] as usize;
        let stride = seq_len * hidden;

        let mask = attention_mask
            .as_slice()
            .ok_or_else(|| FitwiseError::Embedding("attention mask not contiguous".into()))?;
        Ok((0..batch)
            .map(|row| {
                let tokens = &data[row * stride..(row + 1) * stride];
                let row_mask = &mask[row * seq_len..(row + 1) * seq_len];
                l2_normalize(&mean_pool(tokens, row_mask, hidden))
            })
            .collect())
    }
}

/// Averages the token vectors whose mask entry is set.
fn mean_pool(tokens: &[f32], mask: &[i64], hidden: usize) -> Vec<f32> {
    let mut sum = vec![0.0f32; hidden];
    let mut count = 0usize;
    for (token, &m) in tokens.chunks_exact(hidden).zip(mask) {
        if m > 0 {
            for (acc, v) in sum.iter_mut().zip(token) {
                *acc += v;
            }
            count += 1;
        }
    }
    if count > 0 {
        let n = count as f32;
        sum.iter_mut().for_each(|v| *v /= n);
    }
    sum
}

fn tensor_err(e: impl std::fmt::Display) -> FitwiseError {
    FitwiseError::Embedding(format!("building input tensor: {e}"))
}

fn l2_normalize(vec: &[f32]) -> Vec<f32> {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        vec.iter().map(|v| v / norm).collect()
    } else {
        vec.to_vec()
    }
}

#[async_trait]
impl PluginAdapter for OnnxEmbedder {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, FitwiseError> {
        match self.inner.session.lock() {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("session lock poisoned: {e}"))),
        }
    }
}

#[async_trait]
impl EmbeddingAdapter for OnnxEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, FitwiseError> {
        let inner = Arc::clone(&self.inner);
        let embeddings = tokio::task::spawn_blocking(move || inner.embed_batch(&input.texts))
            .await
            .map_err(|e| FitwiseError::Internal(format!("embedding task failed: {e}")))??;
        Ok(EmbeddingOutput {
            embeddings,
            dimensions: EMBEDDING_DIM,
        })
    }
}
