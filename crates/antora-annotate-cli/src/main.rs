mod inputs;

use std::path::PathBuf;
use std::process::ExitCode;

use antora_annotate_core::{
    evaluate, group, render_annotations, render_failure, render_log, Classifier, FileLogReader,
    GatePolicy, LogReader, RefContext, ScopeConfig, Verdict, DEFAULT_ANNOTATIONS_LIMIT,
};
use anyhow::{bail, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use inputs::ActionInputs;

#[derive(Parser, Debug)]
#[command(
    name = "antora-annotate",
    author,
    version,
    about = "Surface Antora build log messages as CI annotations"
)]
struct Cli {
    /// Line-delimited JSON log produced by the Antora run
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Repository slug used to recognize in-scope sources (e.g. acme/docs)
    #[arg(long, value_name = "SLUG")]
    repo: Option<String>,

    /// Fail the run when the log contains error-level messages
    #[arg(long, value_name = "BOOL")]
    fail_on_errors: Option<bool>,

    /// Fail the run when the log contains warnings
    #[arg(long, value_name = "BOOL")]
    fail_on_warnings: Option<bool>,

    /// Per-level cap on emitted inline annotations
    #[arg(long, value_name = "N")]
    annotations_limit: Option<usize>,

    /// Standalone mode: plain console log, no workflow commands or event
    /// context
    #[arg(long)]
    local: bool,
}

/// Effective configuration after merging CLI flags over step inputs.
#[derive(Debug)]
struct RunSettings {
    log_file: PathBuf,
    repo: String,
    policy: GatePolicy,
    annotations_limit: usize,
    local: bool,
}

impl RunSettings {
    fn resolve(cli: Cli, inputs: ActionInputs) -> Result<Self> {
        let repo = match cli.repo.or(inputs.repo) {
            Some(repo) => repo,
            None => bail!("repository identifier missing: pass --repo or set INPUT_REPO"),
        };
        let defaults = GatePolicy::default();
        Ok(Self {
            log_file: cli
                .log_file
                .or_else(|| inputs.log_file.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("./log.json")),
            repo,
            policy: GatePolicy {
                fail_on_errors: cli
                    .fail_on_errors
                    .or(inputs.fail_on_errors)
                    .unwrap_or(defaults.fail_on_errors),
                fail_on_warnings: cli
                    .fail_on_warnings
                    .or(inputs.fail_on_warnings)
                    .unwrap_or(defaults.fail_on_warnings),
            },
            annotations_limit: cli
                .annotations_limit
                .or(inputs.annotations_limit)
                .unwrap_or(DEFAULT_ANNOTATIONS_LIMIT),
            local: cli.local,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(verdict) if verdict.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<Verdict> {
    let settings = RunSettings::resolve(cli, ActionInputs::from_env())?;

    let reader = FileLogReader::new(&settings.log_file);
    let messages = reader.read_messages().await?;

    let context = if settings.local {
        RefContext::None
    } else {
        RefContext::from_env().unwrap_or_else(|err| {
            warn!("ignoring unusable event payload: {err:#}");
            RefContext::None
        })
    };

    let classifier = Classifier::new(ScopeConfig {
        repo: settings.repo.clone(),
    });
    let report = classifier.classify(&messages, &context);

    if !settings.local {
        print!("{}", render_annotations(&report, settings.annotations_limit));
    }
    let log = render_log(&report)?;
    if settings.local {
        print!("{log}");
    } else {
        print!("{}", group("Antora log messages", &log));
    }

    let verdict = evaluate(&messages, &settings.policy);
    if let Verdict::Failed { reason } = &verdict {
        if settings.local {
            eprintln!("failed: {reason}");
        } else {
            print!("{}", render_failure(reason));
        }
    }
    Ok(verdict)
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tokio=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
