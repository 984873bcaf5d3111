// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! High-level record store used by the CLI and the assistant.
//!
//! Write methods stamp entries with today's date. Reads are exposed to the
//! knowledge subsystem through [`RecordSource`].

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use fitwise_core::{
    BmiEntry, FitwiseError, Food, FoodLogEntry, Goals, Profile, RecordSource, Settings, UserId,
    WeightEntry, WorkoutEntry,
};
use tracing::info;

use crate::database::{today, Database};
use crate::queries::{body, foods, preferences, users, workouts};
use crate::{NewWorkout, ProfileUpdate};

/// Shared handle to the record store.
#[derive(Clone)]
pub struct RecordStore {
    db: Arc<Database>,
}

impl RecordStore {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    pub async fn open(path: impl AsRef<Path>) -> Result<Self, FitwiseError> {
        Ok(Self::new(Database::open(path).await?))
    }

    pub async fn open_in_memory() -> Result<Self, FitwiseError> {
        Ok(Self::new(Database::open_in_memory().await?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // --- users ---

    /// Register a new user. Returns `None` if the username is taken.
    pub async fn create_user(&self, username: &str) -> Result<Option<Profile>, FitwiseError> {
        let created = users::create_user(&self.db, username).await?;
        if let Some(profile) = &created {
            info!(user_id = profile.id, "user created");
        }
        Ok(created)
    }

    pub async fn find_user(&self, username: &str) -> Result<Option<Profile>, FitwiseError> {
        users::find_by_username(&self.db, username).await
    }

    /// Resolve a username to its id, failing with `NotFound` when unknown.
    pub async fn require_user(&self, username: &str) -> Result<UserId, FitwiseError> {
        match self.find_user(username).await? {
            Some(profile) => Ok(UserId(profile.id)),
            None => Err(FitwiseError::NotFound {
                entity: "user".into(),
                id: username.to_string(),
            }),
        }
    }

    pub async fn update_profile(
        &self,
        user: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, FitwiseError> {
        users::update_profile(&self.db, user, update)
            .await?
            .ok_or_else(|| FitwiseError::NotFound {
                entity: "user".into(),
                id: user.to_string(),
            })
    }

    // --- logs ---

    pub async fn log_workout(
        &self,
        user: UserId,
        workout: &NewWorkout,
    ) -> Result<i64, FitwiseError> {
        workouts::log_workout(&self.db, user, workout, &today()).await
    }

    pub async fn log_workout_on(
        &self,
        user: UserId,
        workout: &NewWorkout,
        date: &str,
    ) -> Result<i64, FitwiseError> {
        workouts::log_workout(&self.db, user, workout, date).await
    }

    pub async fn add_food(&self, name: &str, calories: f64) -> Result<bool, FitwiseError> {
        foods::add_food(&self.db, name, calories).await
    }

    pub async fn list_foods(&self) -> Result<Vec<Food>, FitwiseError> {
        foods::list_foods(&self.db).await
    }

    /// Log a catalog food by name.
    pub async fn log_food(
        &self,
        user: UserId,
        food_name: &str,
        quantity: f64,
    ) -> Result<i64, FitwiseError> {
        let catalog = self.list_foods().await?;
        let food = catalog
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(food_name))
            .ok_or_else(|| FitwiseError::NotFound {
                entity: "food".into(),
                id: food_name.to_string(),
            })?;
        foods::log_food(&self.db, user, food.id, quantity, &today()).await
    }

    pub async fn log_weight(&self, user: UserId, weight: f64) -> Result<i64, FitwiseError> {
        body::log_weight(&self.db, user, weight, &today()).await
    }

    /// Compute and store a BMI value. Returns the value stored.
    pub async fn log_bmi(
        &self,
        user: UserId,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<f64, FitwiseError> {
        let bmi = body::compute_bmi(weight_kg, height_cm);
        body::log_bmi(&self.db, user, bmi, &today()).await?;
        Ok(bmi)
    }

    pub async fn update_settings(
        &self,
        user: UserId,
        notifications: Option<bool>,
        units: Option<String>,
    ) -> Result<Settings, FitwiseError> {
        preferences::update_settings(&self.db, user, notifications, units).await
    }

    pub async fn update_goals(
        &self,
        user: UserId,
        weight_goal: Option<f64>,
        calorie_goal: Option<i64>,
    ) -> Result<Goals, FitwiseError> {
        preferences::update_goals(&self.db, user, weight_goal, calorie_goal).await
    }
}

#[async_trait]
impl RecordSource for RecordStore {
    async fn profile(&self, user: UserId) -> Result<Option<Profile>, FitwiseError> {
        users::get_profile(&self.db, user).await
    }

    async fn workouts(&self, user: UserId) -> Result<Vec<WorkoutEntry>, FitwiseError> {
        workouts::get_workouts(&self.db, user).await
    }

    async fn food_logs(&self, user: UserId) -> Result<Vec<FoodLogEntry>, FitwiseError> {
        foods::get_food_logs(&self.db, user).await
    }

    async fn weights(&self, user: UserId) -> Result<Vec<WeightEntry>, FitwiseError> {
        body::get_weights(&self.db, user).await
    }

    async fn bmi_records(&self, user: UserId) -> Result<Vec<BmiEntry>, FitwiseError> {
        body::get_bmi_records(&self.db, user).await
    }

    async fn settings(&self, user: UserId) -> Result<Settings, FitwiseError> {
        preferences::get_settings(&self.db, user).await
    }

    async fn goals(&self, user: UserId) -> Result<Goals, FitwiseError> {
        preferences::get_goals(&self.db, user).await
    }
}
