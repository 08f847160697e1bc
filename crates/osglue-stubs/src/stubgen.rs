//! Driver for the external stub-generation tool.
//!
//! The tool is an out-of-process dependency (`mypy.stubgen` run under a
//! Python interpreter). This module only bootstraps it and shells out per
//! sub-namespace; the generated documents are repaired afterwards by
//! `batch::repair_stub_dir`.

use crate::error::StubError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::{Command, Output};

/// The namespace package the generation tool targets.
pub const STUB_PACKAGE: &str = "pyopensim";

pub const STUB_GENERATION_REPORT_KIND: &str = "osglue.stub_generation_report.v1";
pub const STUB_GENERATION_REPORT_SCHEMA: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Generated,
    /// Tool exited non-zero but usually still emits stubs; counted as a
    /// nominal success, never escalated.
    GeneratedWithWarnings,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleGeneration {
    pub module: String,
    pub status: GenerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub schema: u32,
    pub report_kind: String,
    pub python: String,
    pub output_dir: String,
    pub modules: Vec<ModuleGeneration>,
    pub succeeded: usize,
    pub failed: usize,
}

impl GenerationReport {
    /// The batch counts as successful when at least one sub-namespace
    /// generation nominally succeeded.
    pub fn nominally_succeeded(&self) -> bool {
        self.succeeded > 0
    }
}

fn run_python(python: &str, args: &[&str], pythonpath: Option<&Path>) -> Result<Output, StubError> {
    let mut command = Command::new(python);
    command.args(args);
    if let Some(path) = pythonpath {
        let joined = match std::env::var("PYTHONPATH") {
            Ok(existing) if !existing.is_empty() => {
                format!("{}{}{existing}", path.display(), path_list_separator())
            }
            _ => path.display().to_string(),
        };
        command.env("PYTHONPATH", joined);
    }
    command.output().map_err(|e| StubError::Spawn {
        command: format!("{python} {}", args.join(" ")),
        message: e.to_string(),
    })
}

const fn path_list_separator() -> char {
    if cfg!(windows) { ';' } else { ':' }
}

/// Ensure the generation tool can be invoked, installing it on first miss.
///
/// Bootstrap failure here is the single fatal error class of the repair
/// pipeline's CLI entry point.
pub fn ensure_stubgen_available(python: &str) -> Result<(), StubError> {
    let probe = run_python(python, &["-m", "mypy.stubgen", "--help"], None)
        .map_err(|e| StubError::ToolUnavailable(e.to_string()))?;
    if probe.status.success() {
        return Ok(());
    }

    let install = run_python(python, &["-m", "pip", "install", "mypy"], None)
        .map_err(|e| StubError::ToolUnavailable(e.to_string()))?;
    if !install.status.success() {
        return Err(StubError::ToolUnavailable(format!(
            "pip install mypy exited with status {}",
            install.status.code().unwrap_or(1)
        )));
    }

    let reprobe = run_python(python, &["-m", "mypy.stubgen", "--help"], None)
        .map_err(|e| StubError::ToolUnavailable(e.to_string()))?;
    if reprobe.status.success() {
        Ok(())
    } else {
        Err(StubError::ToolUnavailable(
            "mypy.stubgen still not importable after install".to_string(),
        ))
    }
}

/// Generate one stub document per sub-namespace.
///
/// A non-zero tool exit is recorded as a warning and still counted as a
/// nominal success; only a spawn failure marks a module as failed. When a
/// built package path is supplied, its parent directory is prepended to
/// `PYTHONPATH` so the tool can import the package.
pub fn generate_module_stubs(
    python: &str,
    package_path: Option<&Path>,
    output_dir: &Path,
    modules: &[&str],
) -> GenerationReport {
    let pythonpath = package_path.and_then(Path::parent);
    let output_arg = output_dir.display().to_string();

    let mut outcomes = Vec::with_capacity(modules.len());
    for module in modules {
        let qualified = format!("{STUB_PACKAGE}.{module}");
        let args = [
            "-m",
            "mypy.stubgen",
            "-m",
            qualified.as_str(),
            "-o",
            output_arg.as_str(),
            "--ignore-errors",
        ];
        let outcome = match run_python(python, &args, pythonpath) {
            Ok(output) if output.status.success() => ModuleGeneration {
                module: (*module).to_string(),
                status: GenerationStatus::Generated,
                detail: None,
            },
            Ok(output) => ModuleGeneration {
                module: (*module).to_string(),
                status: GenerationStatus::GeneratedWithWarnings,
                detail: Some(String::from_utf8_lossy(&output.stderr).trim().to_string()),
            },
            Err(err) => ModuleGeneration {
                module: (*module).to_string(),
                status: GenerationStatus::Failed,
                detail: Some(err.to_string()),
            },
        };
        outcomes.push(outcome);
    }

    let succeeded = outcomes
        .iter()
        .filter(|item| item.status != GenerationStatus::Failed)
        .count();
    let failed = outcomes.len() - succeeded;

    GenerationReport {
        schema: STUB_GENERATION_REPORT_SCHEMA,
        report_kind: STUB_GENERATION_REPORT_KIND.to_string(),
        python: python.to_string(),
        output_dir: output_arg,
        modules: outcomes,
        succeeded,
        failed,
    }
}
