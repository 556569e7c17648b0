use std::collections::BTreeMap;

use tracing::debug;

use super::{Annotation, Level, Message, Report, Summary};
use crate::ci::RefContext;

/// Identifies "this repository" among the source origins in the log.
#[derive(Debug, Clone)]
pub struct ScopeConfig {
    /// Running-repository identifier, e.g. `acme/docs`.
    pub repo: String,
}

/// Partitions messages by severity and origin and derives their annotations.
pub struct Classifier {
    config: ScopeConfig,
}

impl Classifier {
    pub fn new(config: ScopeConfig) -> Self {
        Self { config }
    }

    /// Classify the full message sequence into a [`Report`].
    ///
    /// Every message contributes one annotation to `messages`, in input
    /// order; in-scope messages additionally land in the bucket of their
    /// raw level. Out-of-scope messages are never discarded, only diverted
    /// from the buckets.
    pub fn classify(&self, messages: &[Message], context: &RefContext) -> Report {
        let summary = summarize(messages);

        let mut annotations: BTreeMap<String, Vec<Annotation>> = BTreeMap::new();
        for level in [Level::Info, Level::Warn, Level::Error] {
            annotations.insert(level.as_str().to_string(), Vec::new());
        }

        let mut all = Vec::with_capacity(messages.len());
        let mut other_msgs = false;
        for message in messages {
            let annotation = Annotation::from_message(message, context);
            if message.in_scope(&self.config.repo) {
                annotations
                    .entry(message.level.as_str().to_string())
                    .or_default()
                    .push(annotation.clone());
            } else {
                other_msgs = true;
            }
            all.push(annotation);
        }

        debug!(
            messages = summary.messages,
            errors = summary.errors,
            warnings = summary.warn,
            other_msgs,
            "log classified"
        );

        Report {
            summary,
            annotations,
            messages: all,
            other_msgs,
        }
    }
}

fn summarize(messages: &[Message]) -> Summary {
    let mut summary = Summary {
        messages: messages.len(),
        ..Summary::default()
    };
    for message in messages {
        match message.level {
            Level::Info => summary.info += 1,
            Level::Warn => summary.warn += 1,
            Level::Error => summary.errors += 1,
            Level::Other(_) => {}
        }
    }
    summary
}
