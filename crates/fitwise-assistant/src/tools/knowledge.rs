// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::ToolContext;

/// Semantic retrieval over the session corpus. Always answers with text.
pub(super) async fn run(ctx: &ToolContext, query: &str) -> String {
    ctx.retriever
        .query(query, ctx.default_top_k)
        .await
        .to_text()
}
