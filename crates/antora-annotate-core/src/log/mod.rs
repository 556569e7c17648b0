use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod annotation;
pub mod classifier;
pub mod file_reader;

pub use annotation::Annotation;
pub use classifier::{Classifier, ScopeConfig};

/// Severity of a raw log message.
///
/// Antora components are free to emit level strings beyond the three known
/// ones; those round-trip through [`Level::Other`] unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Info,
    Warn,
    Error,
    Other(String),
}

impl Level {
    /// The level string exactly as it appears on the raw message.
    pub fn as_str(&self) -> &str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Other(raw) => raw,
        }
    }

    /// Severity in the annotation vocabulary of the CI platform:
    /// `warn` becomes `warning`, everything else passes through.
    pub fn annotation_level(&self) -> &str {
        match self {
            Level::Warn => "warning",
            other => other.as_str(),
        }
    }

    /// Whether this level counts as a warning for gate purposes.
    /// Producers disagree on `warn` vs `warning`; the gate accepts both.
    pub fn signals_warning(&self) -> bool {
        matches!(self, Level::Warn) || matches!(self, Level::Other(raw) if raw == "warning")
    }
}

impl From<String> for Level {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "info" => Level::Info,
            "warn" => Level::Warn,
            "error" => Level::Error,
            _ => Level::Other(raw),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Level::from(String::deserialize(deserializer)?))
    }
}

/// Tracked content source a message originated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Git remote URL of the content repository.
    pub url: String,
    /// Branch or tag that was built.
    pub refname: String,
    /// Local checkout root, present when the source was read from disk.
    #[serde(default)]
    pub worktree: Option<String>,
}

/// File reference attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub path: String,
    #[serde(default)]
    pub line: Option<u64>,
}

/// One line of the build log. Immutable once read; messages have no
/// identity beyond their position in the input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: Level,
    /// Producer identifier, e.g. the sub-tool that emitted the message.
    pub name: String,
    pub msg: String,
    #[serde(default)]
    pub source: Option<Source>,
    #[serde(default)]
    pub file: Option<FileRef>,
}

impl Message {
    /// Location info carried by this message, if any. A message is located
    /// only when both the content source and the file reference are present.
    pub fn location(&self) -> Option<(&Source, &FileRef)> {
        match (&self.source, &self.file) {
            (Some(source), Some(file)) => Some((source, file)),
            _ => None,
        }
    }

    /// Whether this message belongs to the repository identified by `repo`:
    /// it has a source, and that source is either a local worktree checkout
    /// or a URL mentioning `repo`. Sourceless messages are out of scope.
    pub fn in_scope(&self, repo: &str) -> bool {
        match &self.source {
            Some(source) => source.worktree.is_some() || source.url.contains(repo),
            None => false,
        }
    }
}

/// Per-level message counts over the whole log. Levels other than the three
/// known ones count toward `messages` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub messages: usize,
    pub info: usize,
    pub warn: usize,
    pub errors: usize,
}

/// Classified view of one log run, built once and discarded after rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: Summary,
    /// In-scope annotations keyed by raw message level.
    pub(crate) annotations: BTreeMap<String, Vec<Annotation>>,
    /// One annotation per input message, in input order.
    pub messages: Vec<Annotation>,
    /// True when at least one message referenced a source outside the
    /// running repository.
    pub other_msgs: bool,
}

impl Report {
    /// In-scope annotations recorded for a raw message level. Levels absent
    /// from the input yield an empty slice, never an error.
    pub fn annotations_for(&self, level: &str) -> &[Annotation] {
        self.annotations
            .get(level)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Raw levels with a bucket, in stable alphabetical order.
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.annotations.keys().map(String::as_str)
    }
}

/// Abstraction over log acquisition so the pipeline can be fed from files
/// or in-memory fixtures.
#[async_trait]
pub trait LogReader: Send + Sync {
    /// Materialize the full message sequence, in input order. The sequence
    /// is complete before this returns; there is no streaming mode.
    async fn read_messages(&self) -> AnyResult<Vec<Message>>;
}
