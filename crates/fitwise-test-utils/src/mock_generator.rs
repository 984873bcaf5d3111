// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock text generator with queued replies.
//!
//! Replies are popped from a FIFO queue; an empty queue echoes the context
//! back prefixed with `generated: `. Every request is captured for
//! inspection.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use fitwise_core::{
    AdapterType, FitwiseError, GenerationRequest, HealthStatus, PluginAdapter, ResponseGenerator,
};
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct MockGenerator {
    replies: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    fail: bool,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::default()
        }
    }

    /// A generator whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockGenerator {
    fn name(&self) -> &str {
        "mock-generator"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generator
    }

    async fn health_check(&self) -> Result<HealthStatus, FitwiseError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ResponseGenerator for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, FitwiseError> {
        self.requests.lock().await.push(request.clone());
        if self.fail {
            return Err(FitwiseError::Generation {
                message: "mock generator unavailable".into(),
                source: None,
            });
        }
        Ok(self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| format!("generated: {}", request.context)))
    }
}
