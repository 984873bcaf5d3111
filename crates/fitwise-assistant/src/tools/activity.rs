// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{Days, NaiveDate};
use fitwise_core::FitwiseError;

use super::ToolContext;

pub const INACTIVE_MESSAGE: &str = "You haven't logged any workouts recently. Time to get moving!";
pub const ACTIVE_MESSAGE: &str = "Great job staying active recently!";

/// Active when a workout falls within the last `activity_window_days`,
/// today included. Undated or unparseable workouts do not count.
pub(super) async fn run(ctx: &ToolContext) -> Result<String, FitwiseError> {
    let today = ctx.today();
    let window_start = today
        .checked_sub_days(Days::new(u64::from(ctx.activity_window_days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN);

    let active = ctx.records.workouts(ctx.user).await?.iter().any(|w| {
        w.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .is_some_and(|d| d >= window_start && d <= today)
    });

    Ok(if active { ACTIVE_MESSAGE } else { INACTIVE_MESSAGE }.to_string())
}

#[cfg(test)]
mod tests {
    use fitwise_core::{UserId, UserRecordSet, WorkoutEntry};
    use fitwise_test_utils::InMemoryRecords;

    use super::*;
    use crate::tools::test_support::context;

    fn on(date: &str) -> InMemoryRecords {
        InMemoryRecords::new().with_user(
            UserId(1),
            UserRecordSet {
                workouts: vec![WorkoutEntry {
                    id: 1,
                    date: Some(date.into()),
                    exercise: Some("Run".into()),
                    ..Default::default()
                }],
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn no_workouts_is_inactive() {
        let ctx = context(InMemoryRecords::new());
        assert_eq!(run(&ctx).await.unwrap(), INACTIVE_MESSAGE);
    }

    #[tokio::test]
    async fn workout_inside_window_is_active() {
        // context() fixes today at 2026-06-15 with a 7 day window.
        assert_eq!(run(&context(on("2026-06-15"))).await.unwrap(), ACTIVE_MESSAGE);
        assert_eq!(run(&context(on("2026-06-09"))).await.unwrap(), ACTIVE_MESSAGE);
    }

    #[tokio::test]
    async fn old_workout_is_inactive() {
        assert_eq!(run(&context(on("2026-06-08"))).await.unwrap(), INACTIVE_MESSAGE);
        assert_eq!(run(&context(on("not a date"))).await.unwrap(), INACTIVE_MESSAGE);
    }
}
