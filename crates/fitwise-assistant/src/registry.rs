// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Name-indexed registry of the tools bound to one session.

use std::collections::HashMap;
use std::sync::Arc;

use fitwise_core::{FitwiseError, ToolSpec};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::tools::{AssistantTool, ToolContext};

pub struct ToolRegistry {
    tools: HashMap<&'static str, AssistantTool>,
    context: Arc<ToolContext>,
}

impl ToolRegistry {
    /// An empty registry bound to `context`.
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self {
            tools: HashMap::new(),
            context,
        }
    }

    /// A registry holding every tool.
    pub fn with_all_tools(context: Arc<ToolContext>) -> Self {
        let mut registry = Self::new(context);
        for tool in AssistantTool::iter() {
            registry.register(tool);
        }
        registry
    }

    pub fn register(&mut self, tool: AssistantTool) {
        self.tools.insert(tool.name(), tool);
    }

    pub fn get(&self, name: &str) -> Option<AssistantTool> {
        self.tools.get(name).copied()
    }

    pub fn context(&self) -> &Arc<ToolContext> {
        &self.context
    }

    /// (name, description) pairs sorted by name.
    pub fn list(&self) -> Vec<(&'static str, &'static str)> {
        let mut entries: Vec<_> = self
            .tools
            .values()
            .map(|t| (t.name(), t.description()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    /// Tool specs for a generation request, sorted by name.
    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        self.list()
            .into_iter()
            .map(|(name, description)| ToolSpec {
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect()
    }

    /// Runs the named tool with `input`.
    pub async fn invoke(&self, name: &str, input: &str) -> Result<String, FitwiseError> {
        let tool = self.get(name).ok_or_else(|| FitwiseError::NotFound {
            entity: "tool".into(),
            id: name.to_string(),
        })?;
        debug!(tool = name, "invoking tool");
        tool.invoke(&self.context, input).await
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
