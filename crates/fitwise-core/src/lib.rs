// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Fitwise.
//!
//! Holds the error type shared by every crate, the logged record types the
//! knowledge subsystem consumes, and the adapter traits at the seams between
//! storage, embedding and the assistant.

pub mod error;
pub mod traits;
pub mod types;

pub use error::FitwiseError;
pub use traits::{EmbeddingAdapter, PluginAdapter, RecordSource, ResponseGenerator};
pub use types::{
    AdapterType, BmiEntry, EmbeddingInput, EmbeddingOutput, Food, FoodLogEntry, GenerationRequest,
    Goals, HealthStatus, Profile, Settings, ToolSpec, UserId, UserRecordSet, WeightEntry,
    WorkoutEntry,
};
