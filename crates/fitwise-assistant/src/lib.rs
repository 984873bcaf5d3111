// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant facade for Fitwise.
//!
//! Packages semantic retrieval and direct record lookups as named tools
//! for an external generation step, and tracks session readiness so a
//! failure degrades answers instead of surfacing an error.

pub mod assistant;
pub mod registry;
pub mod state;
pub mod tools;

pub use assistant::{Assistant, AssistantOptions, AssistantReply, UNAVAILABLE_MESSAGE};
pub use registry::ToolRegistry;
pub use state::{AssistantState, DegradedReason};
pub use tools::{AssistantTool, ToolContext};
