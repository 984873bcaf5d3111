// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring of the record store, embedding model and assistant.

use std::sync::Arc;

use fitwise_assistant::{Assistant, AssistantOptions};
use fitwise_config::FitwiseConfig;
use fitwise_core::FitwiseError;
use fitwise_knowledge::{load_fact_base, EmbeddingModel, ModelManager, OnnxModelLoader};
use fitwise_storage::RecordStore;
use tracing::warn;

pub async fn open_store(config: &FitwiseConfig) -> Result<RecordStore, FitwiseError> {
    RecordStore::open(&config.storage.database_path).await
}

/// The shared embedding model for this process. Nothing is loaded until
/// the first rebuild or query.
pub fn embedding_model(config: &FitwiseConfig) -> Arc<EmbeddingModel> {
    let manager = ModelManager::new(&config.storage.data_dir, &config.knowledge);
    Arc::new(EmbeddingModel::new(OnnxModelLoader::new(manager)))
}

async fn facts(config: &FitwiseConfig) -> Vec<String> {
    let Some(path) = config.knowledge.fact_base_path.as_deref() else {
        return Vec::new();
    };
    load_fact_base(path).await.unwrap_or_else(|e| {
        warn!(path, error = %e, "fact base unreadable, continuing without it");
        Vec::new()
    })
}

/// An assistant for `username`. The session is not started yet.
pub async fn assistant_for(
    config: &FitwiseConfig,
    store: &RecordStore,
    username: &str,
) -> Result<Assistant, FitwiseError> {
    let user = store.require_user(username).await?;
    let options = AssistantOptions::from_config(config).with_facts(facts(config).await);
    Ok(Assistant::new(
        user,
        Arc::new(store.clone()),
        embedding_model(config),
        options,
    ))
}
