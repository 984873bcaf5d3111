// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workout log operations.

use fitwise_core::{FitwiseError, UserId, WorkoutEntry};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// A workout about to be logged.
#[derive(Debug, Clone, Default)]
pub struct NewWorkout {
    pub exercise: String,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
}

/// Insert a workout dated `date`.
pub async fn log_workout(
    db: &Database,
    user: UserId,
    workout: &NewWorkout,
    date: &str,
) -> Result<i64, FitwiseError> {
    let workout = workout.clone();
    let date = date.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO workouts (user_id, date, exercise, sets, reps, weight)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user.0,
                    date,
                    workout.exercise,
                    workout.sets,
                    workout.reps,
                    workout.weight,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// All workouts for a user, newest first.
pub async fn get_workouts(db: &Database, user: UserId) -> Result<Vec<WorkoutEntry>, FitwiseError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, date, exercise, sets, reps, weight FROM workouts
                 WHERE user_id = ?1 ORDER BY date DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![user.0], |row| {
                Ok(WorkoutEntry {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    exercise: row.get(2)?,
                    sets: row.get(3)?,
                    reps: row.get(4)?,
                    weight: row.get(5)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}
