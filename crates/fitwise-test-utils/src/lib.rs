// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Fitwise.
//!
//! Deterministic stand-ins for the embedding model, the record store and
//! the external generator, so tests run without model downloads or a
//! database.
//!
//! # Components
//!
//! - [`MockEmbedder`] - hashed bag-of-words embeddings
//! - [`FailingEmbedder`] - embedder whose every call fails
//! - [`InMemoryRecords`] - `RecordSource` over fixed record sets
//! - [`MockGenerator`] - generator with queued replies and captured requests

pub mod mock_embedder;
pub mod mock_generator;
pub mod mock_records;

pub use mock_embedder::{FailingEmbedder, MockEmbedder};
pub use mock_generator::MockGenerator;
pub use mock_records::InMemoryRecords;
