// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only tools offered to the generation step.
//!
//! The tool set is closed: each variant of [`AssistantTool`] takes one
//! free-text argument and returns one text block. Tools are bound to the
//! session user through [`ToolContext`].

mod activity;
mod knowledge;
mod query;
mod records;

use std::sync::Arc;

use chrono::NaiveDate;
use fitwise_core::{FitwiseError, RecordSource, ToolSpec, UserId};
use fitwise_knowledge::Retriever;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

pub use activity::{ACTIVE_MESSAGE, INACTIVE_MESSAGE};
pub use query::QUERY_CATEGORIES;
pub use records::{NO_FOOD_LOGS_MESSAGE, NO_WORKOUTS_MESSAGE};

/// Everything a tool needs to answer for one user.
pub struct ToolContext {
    pub user: UserId,
    pub records: Arc<dyn RecordSource>,
    pub retriever: Retriever,
    pub default_top_k: usize,
    pub activity_window_days: u32,
    /// Fixed "today" for the activity window; the local date when `None`.
    pub today: Option<NaiveDate>,
}

impl ToolContext {
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum AssistantTool {
    KnowledgeBase,
    WorkoutData,
    NutritionData,
    ActivityChecker,
    DatabaseQuery,
}

impl AssistantTool {
    /// Stable name used for tool selection.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn description(&self) -> &'static str {
        match self {
            AssistantTool::KnowledgeBase => {
                "Retrieves the passages of the user's fitness and nutrition knowledge base most relevant to the query."
            }
            AssistantTool::WorkoutData => "Fetches the user's logged workouts, newest first.",
            AssistantTool::NutritionData => "Fetches the user's food logs with calories, newest first.",
            AssistantTool::ActivityChecker => {
                "Checks whether the user has logged a workout recently, for reminders."
            }
            AssistantTool::DatabaseQuery => {
                "Returns the user's stored records for one category as JSON: profile, workouts, food, weights, bmi, settings or goals."
            }
        }
    }

    pub fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }

    /// Runs the tool for the context's user.
    pub async fn invoke(&self, ctx: &ToolContext, input: &str) -> Result<String, FitwiseError> {
        match self {
            AssistantTool::KnowledgeBase => Ok(knowledge::run(ctx, input).await),
            AssistantTool::WorkoutData => records::workouts(ctx).await,
            AssistantTool::NutritionData => records::nutrition(ctx).await,
            AssistantTool::ActivityChecker => activity::run(ctx).await,
            AssistantTool::DatabaseQuery => query::run(ctx, input).await,
        }
    }
}
