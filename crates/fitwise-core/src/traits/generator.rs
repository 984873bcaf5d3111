// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External text-generation seam.

use async_trait::async_trait;

use crate::error::FitwiseError;
use crate::traits::adapter::PluginAdapter;
use crate::types::GenerationRequest;

/// Turns a question plus retrieved context into prose.
///
/// Implementations talk to a remote model. Callers treat any error as
/// "no generator" and fall back to the context text.
#[async_trait]
pub trait ResponseGenerator: PluginAdapter {
    async fn generate(&self, request: GenerationRequest) -> Result<String, FitwiseError>;
}
