use std::collections::HashMap;

/// Inputs the Actions runner passes to a step, surfaced as `INPUT_*`
/// environment variables (input names upper-cased, dashes kept).
///
/// Empty and unparsable values are treated as unset; CLI flags take
/// precedence during [`merge`](ActionInputs::merge).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    pub log_file: Option<String>,
    pub repo: Option<String>,
    pub fail_on_errors: Option<bool>,
    pub fail_on_warnings: Option<bool>,
    pub annotations_limit: Option<usize>,
}

impl ActionInputs {
    const LOG_FILE_ENV: &'static str = "INPUT_LOG-FILE";
    const REPO_ENV: &'static str = "INPUT_REPO";
    const FAIL_ON_ERRORS_ENV: &'static str = "INPUT_FAIL-ON-ERRORS";
    const FAIL_ON_WARNINGS_ENV: &'static str = "INPUT_FAIL-ON-WARNINGS";
    const ANNOTATIONS_LIMIT_ENV: &'static str = "INPUT_ANNOTATIONS-LIMIT";

    /// Read the step inputs from the process environment.
    pub fn from_env() -> Self {
        Self::from_map(std::env::vars().collect())
    }

    fn from_map(vars: HashMap<String, String>) -> Self {
        Self {
            log_file: string_input(&vars, Self::LOG_FILE_ENV),
            repo: string_input(&vars, Self::REPO_ENV),
            fail_on_errors: bool_input(&vars, Self::FAIL_ON_ERRORS_ENV),
            fail_on_warnings: bool_input(&vars, Self::FAIL_ON_WARNINGS_ENV),
            annotations_limit: string_input(&vars, Self::ANNOTATIONS_LIMIT_ENV)
                .and_then(|v| v.parse().ok()),
        }
    }
}

fn string_input(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn bool_input(vars: &HashMap<String, String>, key: &str) -> Option<bool> {
    string_input(vars, key).and_then(|value| match value.as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    })
}
