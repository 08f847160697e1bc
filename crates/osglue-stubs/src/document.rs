//! Per-document repair with write-only-if-changed semantics.

use crate::error::StubError;
use crate::rules::repair_stub_text;
use std::fs;
use std::path::Path;

/// Result of repairing one document's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub text: String,
    /// Byte-for-byte inequality of repaired text vs the input.
    pub modified: bool,
}

/// What happened to one document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStatus {
    /// The document needed fixes and was rewritten.
    Repaired,
    /// The document was already clean; nothing was written.
    Clean,
}

/// Repair one document's text without touching storage.
pub fn repair_document(content: &str) -> RepairOutcome {
    let text = repair_stub_text(content);
    let modified = text != content;
    RepairOutcome { text, modified }
}

/// Repair one stub file in place.
///
/// The file is rewritten only when the repaired text differs from the
/// original, avoiding timestamp churn on already-clean documents.
pub fn repair_stub_file(path: &Path) -> Result<RepairStatus, StubError> {
    let content = fs::read_to_string(path).map_err(|e| StubError::read(path, e.to_string()))?;
    let outcome = repair_document(&content);
    if !outcome.modified {
        return Ok(RepairStatus::Clean);
    }
    fs::write(path, &outcome.text).map_err(|e| StubError::write(path, e.to_string()))?;
    Ok(RepairStatus::Repaired)
}
