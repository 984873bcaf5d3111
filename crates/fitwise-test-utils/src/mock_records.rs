// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `RecordSource` for tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use fitwise_core::{
    BmiEntry, FitwiseError, FoodLogEntry, Goals, Profile, RecordSource, Settings, UserId,
    UserRecordSet, WeightEntry, WorkoutEntry,
};

/// Fixed per-user records. Collections are returned in the order given.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecords {
    users: HashMap<UserId, UserRecordSet>,
    settings: HashMap<UserId, Settings>,
    goals: HashMap<UserId, Goals>,
    failing: bool,
    profile_delay: Option<Duration>,
}

impl InMemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything stored for `user`.
    pub fn with_user(mut self, user: UserId, records: UserRecordSet) -> Self {
        self.users.insert(user, records);
        self
    }

    pub fn with_settings(mut self, user: UserId, settings: Settings) -> Self {
        self.settings.insert(user, settings);
        self
    }

    pub fn with_goals(mut self, user: UserId, goals: Goals) -> Self {
        self.goals.insert(user, goals);
        self
    }

    /// Sleeps for `delay` before answering `profile`, the first read of
    /// `record_set`.
    pub fn with_profile_delay(mut self, delay: Duration) -> Self {
        self.profile_delay = Some(delay);
        self
    }

    /// Every accessor returns a storage error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    fn records(&self, user: UserId) -> Result<UserRecordSet, FitwiseError> {
        if self.failing {
            return Err(FitwiseError::Storage {
                source: "mock record store offline".into(),
            });
        }
        Ok(self.users.get(&user).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl RecordSource for InMemoryRecords {
    async fn profile(&self, user: UserId) -> Result<Option<Profile>, FitwiseError> {
        if let Some(delay) = self.profile_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.records(user)?.profile)
    }

    async fn workouts(&self, user: UserId) -> Result<Vec<WorkoutEntry>, FitwiseError> {
        Ok(self.records(user)?.workouts)
    }

    async fn food_logs(&self, user: UserId) -> Result<Vec<FoodLogEntry>, FitwiseError> {
        Ok(self.records(user)?.food_logs)
    }

    async fn weights(&self, user: UserId) -> Result<Vec<WeightEntry>, FitwiseError> {
        Ok(self.records(user)?.weights)
    }

    async fn bmi_records(&self, user: UserId) -> Result<Vec<BmiEntry>, FitwiseError> {
        Ok(self.records(user)?.bmi_records)
    }

    async fn settings(&self, user: UserId) -> Result<Settings, FitwiseError> {
        self.records(user)?;
        Ok(self.settings.get(&user).cloned().unwrap_or_default())
    }

    async fn goals(&self, user: UserId) -> Result<Goals, FitwiseError> {
        self.records(user)?;
        Ok(self.goals.get(&user).cloned().unwrap_or_default())
    }
}
