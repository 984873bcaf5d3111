// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable home of a user's corpus and the optional static fact base.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fitwise_core::{FitwiseError, UserId};
use tracing::{debug, warn};

use crate::corpus::CorpusDocument;

/// Directory under the data dir holding corpus files.
pub const CORPUS_DIR: &str = "knowledge_base";

/// A user's corpus file, fully overwritten on every rebuild.
#[derive(Debug, Clone)]
pub struct CorpusFile {
    path: PathBuf,
}

impl CorpusFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/knowledge_base/user_<id>.txt`
    pub fn for_user(data_dir: impl AsRef<Path>, user: UserId) -> Self {
        Self::new(
            data_dir
                .as_ref()
                .join(CORPUS_DIR)
                .join(format!("user_{user}.txt")),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file contents with `doc`.
    ///
    /// Writes a sibling temp file and renames it over the target so a
    /// reader never sees a half-written corpus.
    pub async fn write(&self, doc: &CorpusDocument) -> Result<(), FitwiseError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(FitwiseError::storage)?;
        }
        let tmp = self.path.with_extension("txt.tmp");
        tokio::fs::write(&tmp, doc.to_text())
            .await
            .map_err(FitwiseError::storage)?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(FitwiseError::storage(e));
        }
        debug!(path = %self.path.display(), passages = doc.len(), "corpus written");
        Ok(())
    }

    /// Writes `doc`, logging instead of failing when the write does not succeed.
    ///
    /// Returns whether the file now holds `doc`.
    pub async fn persist(&self, doc: &CorpusDocument) -> bool {
        match self.write(doc).await {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to write corpus file, continuing in memory");
                false
            }
        }
    }

    /// Reads the stored corpus. A missing file reads as the sentinel corpus.
    pub async fn load(&self) -> Result<CorpusDocument, FitwiseError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(CorpusDocument::parse(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(CorpusDocument::sentinel()),
            Err(e) => Err(FitwiseError::storage(e)),
        }
    }
}

/// Reads the static fact base: one fact per non-empty line.
///
/// A missing file yields no facts.
pub async fn load_fact_base(path: impl AsRef<Path>) -> Result<Vec<String>, FitwiseError> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "fact base file not found");
            Ok(Vec::new())
        }
        Err(e) => Err(FitwiseError::storage(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::SENTINEL;

    #[test]
    fn path_is_per_user() {
        let file = CorpusFile::for_user("/data", UserId(7));
        assert_eq!(file.path(), Path::new("/data/knowledge_base/user_7.txt"));
    }

    #[tokio::test]
    async fn missing_file_loads_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let file = CorpusFile::for_user(dir.path(), UserId(1));
        let doc = file.load().await.unwrap();
        assert_eq!(doc.passages(), [SENTINEL.to_string()]);
    }

    #[tokio::test]
    async fn write_overwrites_previous_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let file = CorpusFile::for_user(dir.path(), UserId(1));

        let first = CorpusDocument::from_passages(["=== A ===\nline one", "=== B ===\nline two"]);
        file.write(&first).await.unwrap();
        let second = CorpusDocument::from_passages(["=== C ===\nline three"]);
        file.write(&second).await.unwrap();

        let text = tokio::fs::read_to_string(file.path()).await.unwrap();
        assert_eq!(text, "=== C ===\nline three");
        assert_eq!(file.load().await.unwrap(), second);
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn persist_logs_and_continues_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the corpus directory should be.
        let blocker = dir.path().join(CORPUS_DIR);
        tokio::fs::write(&blocker, "not a directory").await.unwrap();

        let file = CorpusFile::for_user(dir.path(), UserId(1));
        assert!(!file.persist(&CorpusDocument::sentinel()).await);
        assert!(logs_contain("failed to write corpus file"));
    }

    #[tokio::test]
    async fn fact_base_skips_blank_and_comment_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.txt");
        tokio::fs::write(&path, "# fitness facts\nSleep aids recovery.\n\n  Hydrate often.  \n")
            .await
            .unwrap();
        let facts = load_fact_base(&path).await.unwrap();
        assert_eq!(facts, ["Sleep aids recovery.", "Hydrate often."]);

        let none = load_fact_base(dir.path().join("missing.txt")).await.unwrap();
        assert!(none.is_empty());
    }
}
