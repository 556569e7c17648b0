use std::path::PathBuf;

use antora_annotate_core::{
    evaluate, render_annotations, render_log, Classifier, FileLogReader, GatePolicy, LogReader,
    RefContext, ScopeConfig, Verdict,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

async fn classified_fixture() -> antora_annotate_core::Report {
    let reader = FileLogReader::new(fixture_path("antora_log.json"));
    let messages = reader.read_messages().await.expect("fixture should parse");
    Classifier::new(ScopeConfig {
        repo: "acme/docs-site".into(),
    })
    .classify(&messages, &RefContext::None)
}

#[tokio::test(flavor = "current_thread")]
async fn fixture_classifies_end_to_end() {
    let report = classified_fixture().await;

    assert_eq!(report.summary.messages, 3);
    assert_eq!(report.summary.errors, 1);
    assert_eq!(report.summary.warn, 1);
    assert_eq!(report.summary.info, 1);

    // The error comes from the local worktree checkout; the warn points at
    // a foreign repository and only the info lacks a source.
    let errors = report.annotations_for("error");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].file.as_deref(),
        Some("modules/ROOT/pages/index.adoc")
    );
    assert_eq!(errors[0].start_line, Some(12));
    assert!(report.annotations_for("warn").is_empty());
    assert!(report.other_msgs);
    assert_eq!(report.messages.len(), 3);
}

#[tokio::test(flavor = "current_thread")]
async fn fixture_renders_annotations_and_log() {
    colored::control::set_override(false);
    let report = classified_fixture().await;

    let annotations = render_annotations(&report, 10);
    assert!(annotations.contains(
        "::error file=modules/ROOT/pages/index.adoc,line=12,title=modules/ROOT/pages/index.adoc::"
    ));
    assert!(annotations.contains("::notice::"));

    let log = render_log(&report).unwrap();
    assert!(log.contains("ERROR: (asciidoctor) target of xref not found"));
    assert!(log.contains("INFO: (antora) site generated"));
    assert!(log.contains("3 message(s): 1 error(s), 1 warning(s), 1 info"));
}

#[tokio::test(flavor = "current_thread")]
async fn fixture_fails_the_default_gate() {
    let reader = FileLogReader::new(fixture_path("antora_log.json"));
    let messages = reader.read_messages().await.unwrap();

    let verdict = evaluate(&messages, &GatePolicy::default());
    assert_eq!(
        verdict,
        Verdict::Failed {
            reason: "Antora log contains errors".into()
        }
    );

    let lenient = GatePolicy {
        fail_on_errors: false,
        fail_on_warnings: false,
    };
    assert!(evaluate(&messages, &lenient).passed());
}
