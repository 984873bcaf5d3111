// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite record store for Fitwise.
//!
//! Holds users, workouts, food logs, weights, BMI records, settings and
//! goals. All access goes through one `tokio-rusqlite` connection, and the
//! schema is created by embedded migrations when the database is opened.

pub mod database;
pub mod migrations;
pub mod queries;
pub mod store;

pub use database::Database;
pub use queries::body::compute_bmi;
pub use queries::users::ProfileUpdate;
pub use queries::workouts::NewWorkout;
pub use store::RecordStore;
