// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Food catalog and food log operations.

use fitwise_core::{FitwiseError, Food, FoodLogEntry, UserId};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Add a catalog entry. Returns `false` if the name already exists.
pub async fn add_food(db: &Database, name: &str, calories: f64) -> Result<bool, FitwiseError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "INSERT OR IGNORE INTO foods (name, calories) VALUES (?1, ?2)",
                params![name, calories],
            )?;
            Ok(changed == 1)
        })
        .await
        .map_err(map_tr_err)
}

/// The whole catalog, alphabetically.
pub async fn list_foods(db: &Database) -> Result<Vec<Food>, FitwiseError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, calories FROM foods ORDER BY name")?;
            let rows = stmt.query_map([], |row| {
                Ok(Food {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    calories: row.get(2)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

/// Log `quantity` servings of a catalog food dated `date`.
pub async fn log_food(
    db: &Database,
    user: UserId,
    food_id: i64,
    quantity: f64,
    date: &str,
) -> Result<i64, FitwiseError> {
    let date = date.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO food_logs (user_id, date, food_id, quantity) VALUES (?1, ?2, ?3, ?4)",
                params![user.0, date, food_id, quantity],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Food log entries joined with the catalog, newest first.
///
/// Entries whose catalog row has disappeared keep `name` and `calories`
/// as `None`.
pub async fn get_food_logs(db: &Database, user: UserId) -> Result<Vec<FoodLogEntry>, FitwiseError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT l.id, l.date, l.food_id, f.name, f.calories, l.quantity
                 FROM food_logs l LEFT JOIN foods f ON f.id = l.food_id
                 WHERE l.user_id = ?1 ORDER BY l.date DESC, l.id DESC",
            )?;
            let rows = stmt.query_map(params![user.0], |row| {
                Ok(FoodLogEntry {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    food_id: row.get(2)?,
                    name: row.get(3)?,
                    calories: row.get(4)?,
                    quantity: row.get(5)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}
