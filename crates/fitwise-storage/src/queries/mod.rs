// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules, one per record family.

pub mod body;
pub mod foods;
pub mod preferences;
pub mod users;
pub mod workouts;
