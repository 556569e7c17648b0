use serde::Serialize;

use super::Message;
use crate::ci::RefContext;

/// Display-ready, CI-facing record derived from one raw log message.
///
/// The location fields are present only for messages that carry both a
/// source and a file reference; everything else reduces to
/// title/msg/level/name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub title: String,
    pub msg: String,
    /// Severity in the platform vocabulary (`warning`, not `warn`).
    pub level: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refname: Option<String>,
}

impl Annotation {
    /// Derive the annotation for `message`. Pure: exactly one annotation
    /// per message, no I/O.
    pub fn from_message(message: &Message, context: &RefContext) -> Self {
        let level = message.level.annotation_level().to_string();
        match message.location() {
            Some((source, file)) => {
                let path = repo_relative_path(&file.path, source.worktree.as_deref());
                let title = if path.is_empty() {
                    message.name.clone()
                } else {
                    path.clone()
                };
                Annotation {
                    title,
                    msg: message.msg.clone(),
                    level,
                    name: message.name.clone(),
                    file: Some(path),
                    start_line: file.line,
                    url: Some(context.resolve_url(&source.url)),
                    href: Some(href_from_source(&source.url, &source.refname)),
                    refname: Some(source.refname.clone()),
                }
            }
            None => Annotation {
                title: message.name.clone(),
                msg: message.msg.clone(),
                level,
                name: message.name.clone(),
                file: None,
                start_line: None,
                url: None,
                href: None,
                refname: None,
            },
        }
    }
}

/// Strip the worktree prefix (when the source was checked out locally) and
/// any leading slashes so the path reads repo-relative.
fn repo_relative_path(path: &str, worktree: Option<&str>) -> String {
    let stripped = match worktree {
        Some(worktree) => path.strip_prefix(worktree).unwrap_or(path),
        None => path,
    };
    stripped.trim_start_matches('/').to_string()
}

/// Browsable source tree link for a git remote: the remote URL minus its
/// `.git` suffix, pointing at the branch or tag that was built.
fn href_from_source(url: &str, refname: &str) -> String {
    format!("{}/tree/{}", url.trim_end_matches(".git"), refname)
}
