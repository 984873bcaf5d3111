// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User and profile operations.

use fitwise_core::{FitwiseError, Profile, UserId};
use rusqlite::{params, OptionalExtension, Row};

use crate::database::{map_tr_err, Database};

const PROFILE_COLUMNS: &str = "id, username, age, height, weight_goal, gender, activity_level";

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub age: Option<i64>,
    pub height: Option<f64>,
    pub weight_goal: Option<f64>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
}

impl ProfileUpdate {
    fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.height.is_none()
            && self.weight_goal.is_none()
            && self.gender.is_none()
            && self.activity_level.is_none()
    }
}

fn row_to_profile(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        username: row.get(1)?,
        age: row.get(2)?,
        height: row.get(3)?,
        weight_goal: row.get(4)?,
        gender: row.get(5)?,
        activity_level: row.get(6)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Registers a username. Returns `None` when the name is already taken.
pub async fn create_user(db: &Database, username: &str) -> Result<Option<Profile>, FitwiseError> {
    let username = username.to_string();
    let inserted = db
        .connection()
        .call(move |conn| {
            match conn.execute("INSERT INTO users (username) VALUES (?1)", params![username]) {
                Ok(_) => Ok(Some(conn.last_insert_rowid())),
                Err(e) if is_unique_violation(&e) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)?;

    match inserted {
        Some(id) => get_profile(db, UserId(id)).await,
        None => Ok(None),
    }
}

/// Fetch a profile by user id.
pub async fn get_profile(db: &Database, user: UserId) -> Result<Option<Profile>, FitwiseError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = ?1"),
                params![user.0],
                row_to_profile,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch a profile by username.
pub async fn find_by_username(
    db: &Database,
    username: &str,
) -> Result<Option<Profile>, FitwiseError> {
    let username = username.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM users WHERE username = ?1"),
                params![username],
                row_to_profile,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Apply a partial update and return the resulting profile.
pub async fn update_profile(
    db: &Database,
    user: UserId,
    update: &ProfileUpdate,
) -> Result<Option<Profile>, FitwiseError> {
    if !update.is_empty() {
        let update = update.clone();
        db.connection()
            .call(move |conn| {
                conn.execute(
                    "UPDATE users SET
                        age = COALESCE(?2, age),
                        height = COALESCE(?3, height),
                        weight_goal = COALESCE(?4, weight_goal),
                        gender = COALESCE(?5, gender),
                        activity_level = COALESCE(?6, activity_level)
                     WHERE id = ?1",
                    params![
                        user.0,
                        update.age,
                        update.height,
                        update.weight_goal,
                        update.gender,
                        update.activity_level,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
    }
    get_profile(db, user).await
}
