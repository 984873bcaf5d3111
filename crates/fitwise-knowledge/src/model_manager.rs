// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! First-use download and caching of the pinned embedding model files.

use std::path::{Path, PathBuf};

use fitwise_config::model::KnowledgeConfig;
use fitwise_core::FitwiseError;
use tracing::info;

const MODEL_FILE: &str = "model.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";

/// Resolves model file locations under the data directory and fetches
/// them when absent.
#[derive(Debug, Clone)]
pub struct ModelManager {
    data_dir: PathBuf,
    model_name: String,
    model_url: String,
    tokenizer_url: String,
}

impl ModelManager {
    pub fn new(data_dir: impl Into<PathBuf>, config: &KnowledgeConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            model_name: config.model_name.clone(),
            model_url: config.model_url.clone(),
            tokenizer_url: config.tokenizer_url.clone(),
        }
    }

    /// The pinned model name; also part of the embedder identity.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// `<data_dir>/models/<model_name>`
    pub fn model_dir(&self) -> PathBuf {
        self.data_dir.join("models").join(&self.model_name)
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir().join(MODEL_FILE)
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir().join(TOKENIZER_FILE)
    }

    pub fn is_model_available(&self) -> bool {
        self.model_path().exists() && self.tokenizer_path().exists()
    }

    /// Downloads whichever model files are missing and returns the model path.
    ///
    /// A failed download removes its partial file so the next attempt
    /// starts clean.
    pub async fn ensure_model(&self) -> Result<PathBuf, FitwiseError> {
        if self.is_model_available() {
            return Ok(self.model_path());
        }

        let model_dir = self.model_dir();
        info!(model = %self.model_name, dir = %model_dir.display(), "embedding model not cached, downloading");
        tokio::fs::create_dir_all(&model_dir).await.map_err(|e| {
            FitwiseError::ModelUnavailable(format!("cannot create {}: {e}", model_dir.display()))
        })?;

        let files = [
            (MODEL_FILE, self.model_url.as_str()),
            (TOKENIZER_FILE, self.tokenizer_url.as_str()),
        ];
        for (filename, url) in files {
            let dest = model_dir.join(filename);
            if dest.exists() {
                continue;
            }
            match download_file(url, &dest).await {
                Ok(size) => info!(file = filename, bytes = size, "downloaded"),
                Err(e) => {
                    let _ = tokio::fs::remove_file(&dest).await;
                    return Err(e);
                }
            }
        }

        Ok(self.model_path())
    }
}

async fn download_file(url: &str, dest: &Path) -> Result<usize, FitwiseError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| FitwiseError::ModelUnavailable(format!("download of {url} failed: {e}")))?;

    if !response.status().is_success() {
        return Err(FitwiseError::ModelUnavailable(format!(
            "download of {url} returned {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FitwiseError::ModelUnavailable(format!("reading {url} failed: {e}")))?;

    tokio::fs::write(dest, &bytes)
        .await
        .map_err(|e| FitwiseError::ModelUnavailable(format!("writing {} failed: {e}", dest.display())))?;

    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(dir: &str) -> ModelManager {
        ModelManager::new(dir, &KnowledgeConfig::default())
    }

    #[test]
    fn paths_follow_model_name() {
        let mgr = manager("/data/fitwise");
        assert_eq!(
            mgr.model_path(),
            PathBuf::from("/data/fitwise/models/all-MiniLM-L6-v2/model.onnx")
        );
        assert_eq!(
            mgr.tokenizer_path(),
            PathBuf::from("/data/fitwise/models/all-MiniLM-L6-v2/tokenizer.json")
        );
    }

    #[test]
    fn missing_files_are_not_available() {
        assert!(!manager("/nonexistent/fitwise").is_model_available());
    }

    #[tokio::test]
    async fn cached_files_skip_download() {
        let dir = tempfile::tempdir().unwrap();
        let config = KnowledgeConfig {
            model_url: "http://127.0.0.1:9/unreachable".into(),
            tokenizer_url: "http://127.0.0.1:9/unreachable".into(),
            ..Default::default()
        };
        let mgr = ModelManager::new(dir.path(), &config);
        tokio::fs::create_dir_all(mgr.model_dir()).await.unwrap();
        tokio::fs::write(mgr.model_path(), b"onnx").await.unwrap();
        tokio::fs::write(mgr.tokenizer_path(), b"{}").await.unwrap();

        assert_eq!(mgr.ensure_model().await.unwrap(), mgr.model_path());
    }

    #[tokio::test]
    async fn failed_download_is_model_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = KnowledgeConfig {
            model_url: "http://127.0.0.1:9/model.onnx".into(),
            ..Default::default()
        };
        let mgr = ModelManager::new(dir.path(), &config);
        let err = mgr.ensure_model().await.unwrap_err();
        assert!(matches!(err, FitwiseError::ModelUnavailable(_)));
        assert!(!mgr.model_path().exists());
    }
}
