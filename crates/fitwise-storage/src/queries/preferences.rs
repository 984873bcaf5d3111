// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings and goals, one row per user, upserted field by field.

use fitwise_core::{FitwiseError, Goals, Settings, UserId};
use rusqlite::{params, OptionalExtension};

use crate::database::{map_tr_err, Database};

/// Settings for a user; all fields `None` when never set.
pub async fn get_settings(db: &Database, user: UserId) -> Result<Settings, FitwiseError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT notifications, units FROM settings WHERE user_id = ?1",
                params![user.0],
                |row| {
                    Ok(Settings {
                        notifications: row.get(0)?,
                        units: row.get(1)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
        .map(Option::unwrap_or_default)
}

/// Set the given fields, keeping the stored value for any `None`.
pub async fn update_settings(
    db: &Database,
    user: UserId,
    notifications: Option<bool>,
    units: Option<String>,
) -> Result<Settings, FitwiseError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO settings (user_id, notifications, units) VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET
                    notifications = COALESCE(excluded.notifications, notifications),
                    units = COALESCE(excluded.units, units)",
                params![user.0, notifications, units],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    get_settings(db, user).await
}

/// Goals for a user; all fields `None` when never set.
pub async fn get_goals(db: &Database, user: UserId) -> Result<Goals, FitwiseError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT weight_goal, calorie_goal FROM goals WHERE user_id = ?1",
                params![user.0],
                |row| {
                    Ok(Goals {
                        weight_goal: row.get(0)?,
                        calorie_goal: row.get(1)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
        .map(Option::unwrap_or_default)
}

/// Set the given goals, keeping the stored value for any `None`.
pub async fn update_goals(
    db: &Database,
    user: UserId,
    weight_goal: Option<f64>,
    calorie_goal: Option<i64>,
) -> Result<Goals, FitwiseError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO goals (user_id, weight_goal, calorie_goal) VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET
                    weight_goal = COALESCE(excluded.weight_goal, weight_goal),
                    calorie_goal = COALESCE(excluded.calorie_goal, calorie_goal)",
                params![user.0, weight_goal, calorie_goal],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    get_goals(db, user).await
}
