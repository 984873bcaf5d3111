// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read surface of the record store.

use async_trait::async_trait;

use crate::error::FitwiseError;
use crate::types::{
    BmiEntry, FoodLogEntry, Goals, Profile, Settings, UserId, UserRecordSet, WeightEntry,
    WorkoutEntry,
};

/// Per-user read accessors over logged records.
///
/// Accessors return an empty collection or `None` when the user has no
/// data; an `Err` means the backend itself failed.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn profile(&self, user: UserId) -> Result<Option<Profile>, FitwiseError>;

    /// Workouts, newest first.
    async fn workouts(&self, user: UserId) -> Result<Vec<WorkoutEntry>, FitwiseError>;

    /// Food log entries joined with the catalog, newest first.
    async fn food_logs(&self, user: UserId) -> Result<Vec<FoodLogEntry>, FitwiseError>;

    async fn weights(&self, user: UserId) -> Result<Vec<WeightEntry>, FitwiseError>;

    async fn bmi_records(&self, user: UserId) -> Result<Vec<BmiEntry>, FitwiseError>;

    async fn settings(&self, user: UserId) -> Result<Settings, FitwiseError>;

    async fn goals(&self, user: UserId) -> Result<Goals, FitwiseError>;

    /// Collects every category the corpus builder consumes.
    async fn record_set(&self, user: UserId) -> Result<UserRecordSet, FitwiseError> {
        Ok(UserRecordSet {
            profile: self.profile(user).await?,
            workouts: self.workouts(user).await?,
            food_logs: self.food_logs(user).await?,
            weights: self.weights(user).await?,
            bmi_records: self.bmi_records(user).await?,
        })
    }
}
