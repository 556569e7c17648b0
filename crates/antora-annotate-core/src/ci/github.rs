//! Workflow-command rendering for the Actions runner.
//!
//! Commands are rendered to a string and printed by the caller; rendering
//! the same report twice yields identical bytes.

use crate::log::{Annotation, Level, Report};

/// Per-level annotation budget: a workflow step surfaces at most this many
/// inline annotations of each kind.
pub const DEFAULT_ANNOTATIONS_LIMIT: usize = 10;

/// Render the inline annotations for a report as workflow commands.
///
/// Up to `limit` entries from the error bucket, then up to `limit` from the
/// warn bucket; the caps are independent, so error overflow never shrinks
/// the warning budget. When the log mentions files outside the running
/// repository a closing notice points that out.
pub fn render_annotations(report: &Report, limit: usize) -> String {
    let mut out = String::new();
    out.push_str("::group::Annotations\n");
    for annotation in report
        .annotations_for(Level::Error.as_str())
        .iter()
        .take(limit)
    {
        out.push_str(&annotation_command(annotation));
        out.push('\n');
    }
    for annotation in report
        .annotations_for(Level::Warn.as_str())
        .iter()
        .take(limit)
    {
        out.push_str(&annotation_command(annotation));
        out.push('\n');
    }
    if report.other_msgs {
        out.push_str("::notice::The Antora log contains messages for files outside this repository\n");
    }
    out.push_str("::endgroup::\n");
    out
}

/// Render the gate-failure signal the runner surfaces as a step error.
pub fn render_failure(reason: &str) -> String {
    format!("::error::{}\n", escape_data(reason))
}

/// Wrap a rendered block in a collapsible log group.
pub fn group(title: &str, body: &str) -> String {
    format!("::group::{title}\n{body}::endgroup::\n")
}

fn annotation_command(annotation: &Annotation) -> String {
    let mut props = Vec::new();
    if let Some(file) = &annotation.file {
        props.push(format!("file={}", escape_property(file)));
    }
    if let Some(line) = annotation.start_line {
        props.push(format!("line={line}"));
    }
    props.push(format!("title={}", escape_property(&annotation.title)));
    format!(
        "::{} {}::{}",
        annotation.level,
        props.join(","),
        escape_data(&annotation.msg)
    )
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
