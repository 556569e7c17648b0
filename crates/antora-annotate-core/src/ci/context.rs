use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Deserialize;

/// Triggering-event context, used to deep-link annotations at the exact
/// revision being built rather than a generic repository URL.
///
/// Standalone runs use [`RefContext::None`] explicitly; the mode is never
/// inferred from the presence of ambient variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RefContext {
    /// A pull request and its head commit.
    PullRequest { url: String, head_sha: String },
    /// A push with its ordered commit list.
    Push { commits: Vec<Commit> },
    #[default]
    None,
}

/// One commit of a push event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commit {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
    #[serde(default)]
    commits: Option<Vec<Commit>>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    html_url: String,
    head: HeadRef,
}

#[derive(Debug, Deserialize)]
struct HeadRef {
    sha: String,
}

impl RefContext {
    /// Load the context from the event payload the Actions runner exposes
    /// via `GITHUB_EVENT_PATH`. No payload variable means no context.
    pub fn from_env() -> Result<Self> {
        match env::var_os("GITHUB_EVENT_PATH") {
            Some(path) => Self::from_payload_file(Path::new(&path)),
            None => Ok(RefContext::None),
        }
    }

    /// Parse an event payload file. Payloads that carry neither
    /// pull-request nor push data degrade to [`RefContext::None`].
    pub fn from_payload_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read event payload at {}", path.display()))?;
        let payload: EventPayload = serde_json::from_str(&raw)
            .with_context(|| format!("invalid event payload at {}", path.display()))?;
        Ok(Self::from_payload(payload))
    }

    fn from_payload(payload: EventPayload) -> Self {
        if let Some(pr) = payload.pull_request {
            return RefContext::PullRequest {
                url: pr.html_url,
                head_sha: pr.head.sha,
            };
        }
        match payload.commits {
            Some(commits) if !commits.is_empty() => RefContext::Push { commits },
            _ => RefContext::None,
        }
    }

    /// Resolve the display URL for an annotation: the commit view of the
    /// pull request's head, the most recent pushed commit, or the source's
    /// own URL when no event context is available.
    pub fn resolve_url(&self, fallback: &str) -> String {
        match self {
            RefContext::PullRequest { url, head_sha } => format!("{url}/commits/{head_sha}"),
            RefContext::Push { commits } => commits
                .last()
                .map(|commit| commit.url.clone())
                .unwrap_or_else(|| fallback.to_string()),
            RefContext::None => fallback.to_string(),
        }
    }
}
