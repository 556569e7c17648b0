use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{LogReader, Message};

/// Reads a line-delimited JSON build log from disk.
///
/// The whole file is materialized before `read_messages` returns:
/// classification needs total counts, so there is no streaming mode. A line
/// that fails to parse aborts the whole run; blank lines are skipped.
pub struct FileLogReader {
    path: PathBuf,
    cache: OnceCell<Vec<Message>>,
}

impl FileLogReader {
    /// Create a reader for the log file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceCell::new(),
        }
    }

    async fn read_all(&self) -> Result<Vec<Message>> {
        let file = File::open(&self.path)
            .await
            .with_context(|| format!("failed to open log file at {}", self.path.display()))?;
        let mut lines = BufReader::new(file).lines();
        let mut messages = Vec::new();
        let mut lineno = 0usize;
        while let Some(line) = lines
            .next_line()
            .await
            .with_context(|| format!("failed to read log file at {}", self.path.display()))?
        {
            lineno += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let message: Message = serde_json::from_str(trimmed).with_context(|| {
                format!(
                    "invalid JSON log record at {}:{}",
                    self.path.display(),
                    lineno
                )
            })?;
            messages.push(message);
        }
        Ok(messages)
    }
}

#[async_trait::async_trait]
impl LogReader for FileLogReader {
    async fn read_messages(&self) -> Result<Vec<Message>> {
        if let Some(cached) = self.cache.get() {
            return Ok(cached.clone());
        }
        let messages = self.read_all().await?;
        Ok(self.cache.get_or_init(|| messages).clone())
    }
}
