// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Traits use `#[async_trait]` so they can be held as trait objects.

pub mod adapter;
pub mod embedding;
pub mod generator;
pub mod records;

pub use adapter::PluginAdapter;
pub use embedding::EmbeddingAdapter;
pub use generator::ResponseGenerator;
pub use records::RecordSource;
