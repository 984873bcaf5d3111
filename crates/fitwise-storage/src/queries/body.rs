// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Body weight and BMI operations.

use fitwise_core::{BmiEntry, FitwiseError, UserId, WeightEntry};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// BMI from kilograms and centimetres; 0 when the height is not positive.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm > 0.0 {
        let metres = height_cm / 100.0;
        weight_kg / (metres * metres)
    } else {
        0.0
    }
}

pub async fn log_weight(
    db: &Database,
    user: UserId,
    weight: f64,
    date: &str,
) -> Result<i64, FitwiseError> {
    let date = date.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO weights (user_id, date, weight) VALUES (?1, ?2, ?3)",
                params![user.0, date, weight],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get_weights(db: &Database, user: UserId) -> Result<Vec<WeightEntry>, FitwiseError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, date, weight FROM weights
                 WHERE user_id = ?1 ORDER BY date DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![user.0], |row| {
                Ok(WeightEntry {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    weight: row.get(2)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

/// Store an already computed BMI value dated `date`.
pub async fn log_bmi(
    db: &Database,
    user: UserId,
    bmi: f64,
    date: &str,
) -> Result<i64, FitwiseError> {
    let date = date.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO bmi_records (user_id, date, bmi) VALUES (?1, ?2, ?3)",
                params![user.0, date, bmi],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get_bmi_records(db: &Database, user: UserId) -> Result<Vec<BmiEntry>, FitwiseError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, date, bmi FROM bmi_records
                 WHERE user_id = ?1 ORDER BY date DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![user.0], |row| {
                Ok(BmiEntry {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    bmi: row.get(2)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}
