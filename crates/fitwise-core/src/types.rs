// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Fitwise crates.
//!
//! The record types mirror what the record store persists. Every field a
//! user may leave blank is an `Option` so the corpus builder can render an
//! explicit placeholder instead of dropping the field.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Embedding,
    Generator,
}

// --- Logged records ---

/// A user's profile row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub username: Option<String>,
    pub age: Option<i64>,
    /// Height in centimetres.
    pub height: Option<f64>,
    /// Target body weight in kilograms.
    pub weight_goal: Option<f64>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
}

/// One logged strength or cardio exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: i64,
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    pub exercise: Option<String>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
}

/// One logged food intake, joined with the food catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: i64,
    pub date: Option<String>,
    pub food_id: Option<i64>,
    /// Catalog name; `None` when the catalog row is gone.
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub quantity: Option<f64>,
}

/// One logged body-weight measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: i64,
    pub date: Option<String>,
    pub weight: Option<f64>,
}

/// One computed BMI measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmiEntry {
    pub id: i64,
    pub date: Option<String>,
    pub bmi: Option<f64>,
}

/// A food catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub calories: f64,
}

/// Per-user application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub notifications: Option<bool>,
    pub units: Option<String>,
}

/// Per-user goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub weight_goal: Option<f64>,
    pub calorie_goal: Option<i64>,
}

/// Everything the corpus builder reads for one user.
///
/// Collections keep the order the record store returned them in
/// (newest first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecordSet {
    pub profile: Option<Profile>,
    pub workouts: Vec<WorkoutEntry>,
    pub food_logs: Vec<FoodLogEntry>,
    pub weights: Vec<WeightEntry>,
    pub bmi_records: Vec<BmiEntry>,
}

impl UserRecordSet {
    /// Returns true when no category holds any data.
    pub fn is_empty(&self) -> bool {
        self.profile.is_none()
            && self.workouts.is_empty()
            && self.food_logs.is_empty()
            && self.weights.is_empty()
            && self.bmi_records.is_empty()
    }
}

// --- Embedding types ---

/// Input for an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    pub texts: Vec<String>,
}

/// Output from an embedding adapter, one vector per input text in order.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    pub embeddings: Vec<Vec<f32>>,
    pub dimensions: usize,
}

// --- Generation types ---

/// Name and description of a tool offered to a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
}

/// Everything a generator receives for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub question: String,
    /// Retrieved passages or tool output, verbatim.
    pub context: String,
    pub tools: Vec<ToolSpec>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn empty_record_set() {
        assert!(UserRecordSet::default().is_empty());

        let with_weight = UserRecordSet {
            weights: vec![WeightEntry {
                id: 1,
                date: Some("2026-01-02".into()),
                weight: Some(71.5),
            }],
            ..Default::default()
        };
        assert!(!with_weight.is_empty());

        let with_profile = UserRecordSet {
            profile: Some(Profile::default()),
            ..Default::default()
        };
        assert!(!with_profile.is_empty());
    }

    #[test]
    fn adapter_type_round_trip() {
        for variant in [AdapterType::Storage, AdapterType::Embedding, AdapterType::Generator] {
            let parsed = AdapterType::from_str(&variant.to_string()).unwrap();
            assert_eq!(parsed, variant);
        }
    }

    #[test]
    fn user_id_displays_inner_value() {
        assert_eq!(UserId(42).to_string(), "42");
    }
}
