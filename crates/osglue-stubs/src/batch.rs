//! Batch repair over a stub directory with per-document failure isolation.

use crate::document::{RepairStatus, repair_stub_file};
use crate::error::StubError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const STUB_REPAIR_REPORT_KIND: &str = "osglue.stub_repair_report.v1";
pub const STUB_REPAIR_REPORT_SCHEMA: u32 = 1;

/// The synthesized top-level document; never batch-repaired.
const INIT_STUB_NAME: &str = "__init__.pyi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Repaired,
    Clean,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOutcome {
    pub path: String,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StubRepairReport {
    pub schema: u32,
    pub report_kind: String,
    pub generated_at: String,
    pub documents: Vec<DocumentOutcome>,
    pub repaired: usize,
    pub clean: usize,
    pub failed: usize,
}

impl StubRepairReport {
    fn from_outcomes(documents: Vec<DocumentOutcome>) -> Self {
        let repaired = documents
            .iter()
            .filter(|doc| doc.status == DocumentStatus::Repaired)
            .count();
        let clean = documents
            .iter()
            .filter(|doc| doc.status == DocumentStatus::Clean)
            .count();
        let failed = documents
            .iter()
            .filter(|doc| doc.status == DocumentStatus::Failed)
            .count();
        Self {
            schema: STUB_REPAIR_REPORT_SCHEMA,
            report_kind: STUB_REPAIR_REPORT_KIND.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            documents,
            repaired,
            clean,
            failed,
        }
    }
}

/// Repair every `*.pyi` document under `dir` except the synthesized
/// top-level stub.
///
/// One document's failure never aborts its siblings; each failure is
/// recorded in the report with its message. The only `Err` path is a
/// directory that cannot be listed at all. Documents are processed in
/// sorted path order so reports are deterministic.
pub fn repair_stub_dir(dir: &Path) -> Result<StubRepairReport, StubError> {
    let entries = fs::read_dir(dir).map_err(|e| StubError::ListDir {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("pyi") {
            continue;
        }
        if path.file_name().and_then(|name| name.to_str()) == Some(INIT_STUB_NAME) {
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let outcome = match repair_stub_file(&path) {
            Ok(RepairStatus::Repaired) => DocumentOutcome {
                path: path.display().to_string(),
                status: DocumentStatus::Repaired,
                message: None,
            },
            Ok(RepairStatus::Clean) => DocumentOutcome {
                path: path.display().to_string(),
                status: DocumentStatus::Clean,
                message: None,
            },
            Err(err) => DocumentOutcome {
                path: path.display().to_string(),
                status: DocumentStatus::Failed,
                message: Some(err.to_string()),
            },
        };
        documents.push(outcome);
    }

    Ok(StubRepairReport::from_outcomes(documents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "osglue-batch-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should exist");
        path
    }

    #[test]
    fn batch_counts_repaired_and_clean_documents() {
        let dir = temp_dir("counts");
        fs::write(dir.join("simulation.pyi"), "def f(): ...\n").expect("fixture written");
        fs::write(
            dir.join("common.pyi"),
            "class Vec3:\n    def get(self) -> float: ...\n",
        )
        .expect("fixture written");
        fs::write(dir.join("notes.txt"), "not a stub").expect("fixture written");
        fs::write(dir.join("__init__.pyi"), "def g(): ...\n").expect("fixture written");

        let report = repair_stub_dir(&dir).expect("batch should succeed");
        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.repaired, 1);
        assert_eq!(report.clean, 1);
        assert_eq!(report.failed, 0);
        // The top-level stub is skipped, not repaired.
        assert_eq!(
            fs::read_to_string(dir.join("__init__.pyi")).expect("init stub readable"),
            "def g(): ...\n"
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn one_failing_document_does_not_abort_siblings() {
        let dir = temp_dir("isolate");
        // A directory with a .pyi name forces a per-document read failure.
        fs::create_dir_all(dir.join("broken.pyi")).expect("fixture dir created");
        fs::write(dir.join("simulation.pyi"), "def f(): ...\n").expect("fixture written");

        let report = repair_stub_dir(&dir).expect("batch should succeed");
        assert_eq!(report.failed, 1);
        assert_eq!(report.repaired, 1);
        let failed = report
            .documents
            .iter()
            .find(|doc| doc.status == DocumentStatus::Failed)
            .expect("failed outcome should be recorded");
        assert!(failed.message.is_some());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unlistable_directory_is_the_only_hard_failure() {
        let dir = temp_dir("missing");
        let err = repair_stub_dir(&dir.join("absent")).expect_err("list should fail");
        assert!(matches!(err, StubError::ListDir { .. }));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = StubRepairReport::from_outcomes(vec![DocumentOutcome {
            path: "common.pyi".to_string(),
            status: DocumentStatus::Clean,
            message: None,
        }]);
        let value = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(value["reportKind"], STUB_REPAIR_REPORT_KIND);
        assert_eq!(value["documents"][0]["status"], "clean");
    }
}
