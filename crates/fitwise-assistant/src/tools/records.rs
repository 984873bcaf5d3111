// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw workout and food log listings.

use fitwise_core::FitwiseError;
use fitwise_knowledge::corpus::format_number;

use super::ToolContext;

pub const NO_WORKOUTS_MESSAGE: &str = "No workouts found.";
pub const NO_FOOD_LOGS_MESSAGE: &str = "No food logs found.";

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("N/A")
}

/// One `"{date}: {exercise}"` line per workout.
pub(super) async fn workouts(ctx: &ToolContext) -> Result<String, FitwiseError> {
    let workouts = ctx.records.workouts(ctx.user).await?;
    if workouts.is_empty() {
        return Ok(NO_WORKOUTS_MESSAGE.to_string());
    }
    Ok(workouts
        .iter()
        .map(|w| format!("{}: {}", or_na(w.date.as_deref()), or_na(w.exercise.as_deref())))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// One `"{date}: {name} - {calories} cal"` line per food log.
pub(super) async fn nutrition(ctx: &ToolContext) -> Result<String, FitwiseError> {
    let logs = ctx.records.food_logs(ctx.user).await?;
    if logs.is_empty() {
        return Ok(NO_FOOD_LOGS_MESSAGE.to_string());
    }
    Ok(logs
        .iter()
        .map(|l| {
            let calories = l.calories.map_or_else(|| "N/A".to_string(), format_number);
            format!(
                "{}: {} - {} cal",
                or_na(l.date.as_deref()),
                l.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or("Unknown Food"),
                calories
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use fitwise_core::{FoodLogEntry, UserId, UserRecordSet, WorkoutEntry};
    use fitwise_test_utils::InMemoryRecords;

    use super::*;
    use crate::tools::test_support::context;

    #[tokio::test]
    async fn empty_logs_use_fallbacks() {
        let ctx = context(InMemoryRecords::new());
        assert_eq!(workouts(&ctx).await.unwrap(), NO_WORKOUTS_MESSAGE);
        assert_eq!(nutrition(&ctx).await.unwrap(), NO_FOOD_LOGS_MESSAGE);
    }

    #[tokio::test]
    async fn lists_entries_newest_first() {
        let records = UserRecordSet {
            workouts: vec![
                WorkoutEntry {
                    id: 2,
                    date: Some("2026-06-14".into()),
                    exercise: Some("Rowing".into()),
                    ..Default::default()
                },
                WorkoutEntry {
                    id: 1,
                    date: Some("2026-06-10".into()),
                    exercise: Some("Squat".into()),
                    ..Default::default()
                },
            ],
            food_logs: vec![FoodLogEntry {
                id: 1,
                date: Some("2026-06-14".into()),
                food_id: Some(3),
                name: Some("Chicken Breast".into()),
                calories: Some(165.0),
                quantity: Some(1.0),
            }],
            ..Default::default()
        };
        let ctx = context(InMemoryRecords::new().with_user(UserId(1), records));
        assert_eq!(
            workouts(&ctx).await.unwrap(),
            "2026-06-14: Rowing\n2026-06-10: Squat"
        );
        assert_eq!(
            nutrition(&ctx).await.unwrap(),
            "2026-06-14: Chicken Breast - 165 cal"
        );
    }

    #[tokio::test]
    async fn other_users_records_are_not_visible() {
        let records = UserRecordSet {
            workouts: vec![WorkoutEntry {
                id: 1,
                date: Some("2026-06-14".into()),
                exercise: Some("Rowing".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let ctx = context(InMemoryRecords::new().with_user(UserId(2), records));
        assert_eq!(workouts(&ctx).await.unwrap(), NO_WORKOUTS_MESSAGE);
    }

    #[tokio::test]
    async fn storage_errors_propagate() {
        let ctx = context(InMemoryRecords::failing());
        assert!(matches!(
            workouts(&ctx).await.unwrap_err(),
            FitwiseError::Storage { .. }
        ));
    }
}
