//! Severity gate deciding whether the run fails.

use serde::Serialize;

use crate::log::{Level, Message};

/// Thresholds the host pipeline configured for this run.
#[derive(Debug, Clone, Copy)]
pub struct GatePolicy {
    pub fail_on_errors: bool,
    pub fail_on_warnings: bool,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            fail_on_errors: true,
            fail_on_warnings: false,
        }
    }
}

/// Gate evaluation outcome. A run either passes or fails once, with a
/// fixed reason; the offending messages are visible in the rendered log
/// and annotations, not enumerated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Passed,
    Failed { reason: String },
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }
}

/// Evaluate the gate over the raw message levels.
///
/// Errors are checked before warnings and the first match wins. The check
/// inspects raw messages, never the capped annotation buckets, so display
/// capping cannot suppress a failure.
pub fn evaluate(messages: &[Message], policy: &GatePolicy) -> Verdict {
    if policy.fail_on_errors && messages.iter().any(|m| m.level == Level::Error) {
        return Verdict::Failed {
            reason: "Antora log contains errors".to_string(),
        };
    }
    if policy.fail_on_warnings && messages.iter().any(|m| m.level.signals_warning()) {
        return Verdict::Failed {
            reason: "Antora log contains warnings".to_string(),
        };
    }
    Verdict::Passed
}
