use std::collections::BTreeMap;
use std::fmt::Write;

use colored::Colorize;

use crate::log::{Annotation, Report};

/// Render the full console log: every message, grouped by producer name in
/// alphabetical order, with a severity-colored level label and, for located
/// messages, the file and source reference on their own lines.
///
/// Rendering is pure; the same report always yields the same bytes.
pub fn render_log(report: &Report) -> anyhow::Result<String> {
    let mut groups: BTreeMap<&str, Vec<&Annotation>> = BTreeMap::new();
    for annotation in &report.messages {
        groups
            .entry(annotation.name.as_str())
            .or_default()
            .push(annotation);
    }

    let mut out = String::new();
    for (name, annotations) in &groups {
        writeln!(out, "{}", name.bold())?;
        for annotation in annotations {
            writeln!(
                out,
                "{}: ({}) {}",
                level_label(&annotation.level),
                annotation.name,
                annotation.msg
            )?;
            if let Some(file) = &annotation.file {
                match &annotation.href {
                    Some(href) => writeln!(out, "  file: {href}/{file}")?,
                    None => writeln!(out, "  file: {file}")?,
                }
            }
            if let (Some(url), Some(refname)) = (&annotation.url, &annotation.refname) {
                writeln!(out, "  source: {url} (ref: {refname})")?;
            }
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "{} message(s): {} error(s), {} warning(s), {} info",
        report.summary.messages, report.summary.errors, report.summary.warn, report.summary.info
    )?;
    Ok(out)
}

fn level_label(level: &str) -> String {
    let label = level.to_uppercase();
    match level {
        "error" => label.red().bold().to_string(),
        "warning" => label.yellow().bold().to_string(),
        "info" => label.blue().bold().to_string(),
        _ => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ci::RefContext;
    use crate::log::{Classifier, FileRef, Level, Message, ScopeConfig, Source};

    fn message(level: &str, name: &str, msg: &str) -> Message {
        Message {
            level: Level::from(level.to_string()),
            name: name.into(),
            msg: msg.into(),
            source: None,
            file: None,
        }
    }

    fn located(level: &str, name: &str, msg: &str) -> Message {
        Message {
            source: Some(Source {
                url: "https://github.com/acme/docs.git".into(),
                refname: "main".into(),
                worktree: None,
            }),
            file: Some(FileRef {
                path: "/modules/ROOT/pages/index.adoc".into(),
                line: Some(12),
            }),
            ..message(level, name, msg)
        }
    }

    fn report_for(messages: &[Message]) -> Report {
        Classifier::new(ScopeConfig {
            repo: "acme/docs".into(),
        })
        .classify(messages, &RefContext::None)
    }

    #[test]
    fn groups_are_ordered_by_producer_name() {
        colored::control::set_override(false);
        let report = report_for(&[
            message("info", "zebra", "late"),
            message("info", "antora", "early"),
        ]);
        let out = render_log(&report).unwrap();
        let antora = out.find("antora\n").unwrap();
        let zebra = out.find("zebra\n").unwrap();
        assert!(antora < zebra);
    }

    #[test]
    fn located_messages_show_file_and_source_lines() {
        colored::control::set_override(false);
        let report = report_for(&[located("error", "asciidoctor", "broken xref")]);
        let out = render_log(&report).unwrap();
        assert!(out.contains("ERROR: (asciidoctor) broken xref"));
        assert!(out.contains(
            "  file: https://github.com/acme/docs/tree/main/modules/ROOT/pages/index.adoc"
        ));
        assert!(out.contains("  source: https://github.com/acme/docs.git (ref: main)"));
    }

    #[test]
    fn unlocated_messages_render_one_line() {
        colored::control::set_override(false);
        let report = report_for(&[message("info", "antora", "site generated")]);
        let out = render_log(&report).unwrap();
        assert!(out.contains("INFO: (antora) site generated"));
        assert!(!out.contains("  file:"));
        assert!(!out.contains("  source:"));
    }

    #[test]
    fn remapped_warn_label_is_uppercased() {
        colored::control::set_override(false);
        let report = report_for(&[located("warn", "asciidoctor", "careful")]);
        let out = render_log(&report).unwrap();
        assert!(out.contains("WARNING: (asciidoctor) careful"));
    }

    #[test]
    fn summary_line_totals_the_run() {
        colored::control::set_override(false);
        let report = report_for(&[
            message("error", "a", "x"),
            message("warn", "a", "y"),
            message("info", "b", "z"),
        ]);
        let out = render_log(&report).unwrap();
        assert!(out.contains("3 message(s): 1 error(s), 1 warning(s), 1 info"));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        colored::control::set_override(false);
        let report = report_for(&[
            located("error", "asciidoctor", "boom"),
            message("info", "antora", "done"),
        ]);
        assert_eq!(render_log(&report).unwrap(), render_log(&report).unwrap());
    }
}
