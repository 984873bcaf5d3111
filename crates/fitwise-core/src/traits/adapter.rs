// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait.

use async_trait::async_trait;

use crate::error::FitwiseError;
use crate::types::{AdapterType, HealthStatus};

/// Identity and health for pluggable backends.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the kind of adapter.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, FitwiseError>;

    /// A stable identifier combining name and version.
    ///
    /// Two vectors are only comparable when they were produced by adapters
    /// with the same identifier.
    fn identity(&self) -> String {
        format!("{}@{}", self.name(), self.version())
    }
}
