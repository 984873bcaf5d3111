// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge retrieval for Fitwise.
//!
//! A user's records are rendered into a plain-text corpus, each passage is
//! embedded with a local sentence-embedding model, and free-text queries are
//! answered with the most similar passages.
//!
//! ## Architecture
//!
//! - **CorpusBuilder**: records to passages, sentinel when nothing is logged
//! - **CorpusFile**: per-user corpus on disk, overwritten on each rebuild
//! - **ModelManager**: first-use download of the pinned model
//! - **OnnxEmbedder**: local ONNX inference
//! - **EmbeddingModel**: process-wide, lazily loaded model handle
//! - **EmbeddingIndex**: atomically swapped passage/vector snapshot
//! - **Retriever**: cosine top-k with typed fallbacks

pub mod corpus;
pub mod corpus_file;
pub mod embedder;
pub mod index;
pub mod model;
pub mod model_manager;
pub mod retriever;

pub use corpus::{CorpusBuilder, CorpusDocument, SENTINEL};
pub use corpus_file::{load_fact_base, CorpusFile};
pub use embedder::OnnxEmbedder;
pub use index::{EmbeddingIndex, IndexHandle, IndexSnapshot};
pub use model::{EmbeddingModel, ModelLoader, OnnxModelLoader};
pub use model_manager::ModelManager;
pub use retriever::{
    RetrievalResult, RetrievalStatus, Retriever, ScoredPassage, NOT_READY_MESSAGE,
    NO_MATCH_MESSAGE,
};
