// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured lookup of one record category as JSON.

use fitwise_core::FitwiseError;

use super::ToolContext;

pub const QUERY_CATEGORIES: [&str; 7] =
    ["profile", "workouts", "food", "weights", "bmi", "settings", "goals"];

pub(super) async fn run(ctx: &ToolContext, input: &str) -> Result<String, FitwiseError> {
    let category = input.trim().to_lowercase();
    let records = &ctx.records;
    let user = ctx.user;

    let value = match category.as_str() {
        "profile" => to_json(&records.profile(user).await?)?,
        "workouts" => to_json(&records.workouts(user).await?)?,
        "food" => to_json(&records.food_logs(user).await?)?,
        "weights" => to_json(&records.weights(user).await?)?,
        "bmi" => to_json(&records.bmi_records(user).await?)?,
        "settings" => to_json(&records.settings(user).await?)?,
        "goals" => to_json(&records.goals(user).await?)?,
        _ => {
            return Ok(format!(
                "Unknown category '{}'. Available categories: {}",
                input.trim(),
                QUERY_CATEGORIES.join(", ")
            ));
        }
    };
    Ok(value)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, FitwiseError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| FitwiseError::Internal(format!("serializing records: {e}")))
}

#[cfg(test)]
mod tests {
    use fitwise_core::{Goals, UserId, UserRecordSet, WeightEntry};
    use fitwise_test_utils::InMemoryRecords;

    use super::*;
    use crate::tools::test_support::context;

    #[tokio::test]
    async fn returns_category_as_json() {
        let records = InMemoryRecords::new()
            .with_user(
                UserId(1),
                UserRecordSet {
                    weights: vec![WeightEntry {
                        id: 4,
                        date: Some("2026-06-01".into()),
                        weight: Some(72.5),
                    }],
                    ..Default::default()
                },
            )
            .with_goals(
                UserId(1),
                Goals {
                    weight_goal: Some(68.0),
                    calorie_goal: Some(2100),
                },
            );
        let ctx = context(records);

        let weights: serde_json::Value =
            serde_json::from_str(&run(&ctx, " Weights ").await.unwrap()).unwrap();
        assert_eq!(weights[0]["weight"], 72.5);

        let goals: serde_json::Value = serde_json::from_str(&run(&ctx, "goals").await.unwrap()).unwrap();
        assert_eq!(goals["calorie_goal"], 2100);

        assert_eq!(run(&ctx, "profile").await.unwrap(), "null");
    }

    #[tokio::test]
    async fn unknown_category_lists_options() {
        let ctx = context(InMemoryRecords::new());
        let text = run(&ctx, "passwords").await.unwrap();
        assert!(text.starts_with("Unknown category 'passwords'"));
        assert!(text.contains("profile, workouts, food, weights, bmi, settings, goals"));
    }
}
