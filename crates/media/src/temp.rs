//! Staged temporary files with guaranteed cleanup.
//!
//! Request files are written to the upload directory while the multipart
//! stream is read, and the workflow removes every staged path once its
//! outcome is decided -- success, validation failure, or gateway error
//! alike. Individual deletion failures are logged and never replace the
//! workflow's own result.

use std::io;
use std::path::{Path, PathBuf};

/// The set of temp files staged for one request.
#[derive(Debug, Default)]
pub struct StagedFiles {
    paths: Vec<PathBuf>,
}

impl StagedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one uploaded part to disk under `dir` and track it for
    /// cleanup. The stored name is prefixed with a timestamp and the part
    /// index so concurrent requests cannot collide.
    pub async fn stage(
        &mut self,
        dir: &Path,
        original_name: &str,
        bytes: &[u8],
    ) -> io::Result<&Path> {
        tokio::fs::create_dir_all(dir).await?;

        let index = self.paths.len();
        let stamp = chrono::Utc::now().timestamp_micros();
        let name = format!("{stamp}_{index}_{}", sanitize(original_name));
        let path = dir.join(name);

        tokio::fs::write(&path, bytes).await?;
        self.paths.push(path);
        Ok(self.paths.last().expect("just pushed"))
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Remove every staged file. Deletion failures are logged at WARN and
    /// otherwise ignored so cleanup never masks the workflow's outcome.
    pub async fn cleanup(self) {
        for path in self.paths {
            if let Err(err) = tokio::fs::remove_file(&path).await {
                tracing::warn!(path = %path.display(), error = %err, "Failed to remove staged file");
            }
        }
    }
}

/// Keep only filename-safe characters from a client-supplied name.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
