//! # osglue-stubs
//!
//! Repair pipeline for auto-generated interface stub documents.
//!
//! This crate provides:
//! - ordered text repair rules for the defects the binding generator is
//!   known to emit (`rules`)
//! - per-document repair with write-only-if-changed semantics (`document`)
//! - batch repair over a stub directory with per-document failure
//!   isolation (`batch`)
//! - synthesis of the flattened top-level stub document (`init_stub`)
//! - the external stub-generation-tool driver (`stubgen`)
//!
//! The rules are deliberately not a parser. The defect set is narrow and
//! enumerated; each rule is a pure text-to-text substitution applied exactly
//! once per document, in a fixed total order.

pub mod batch;
pub mod document;
pub mod error;
pub mod init_stub;
pub mod rules;
pub mod stubgen;

pub use batch::{
    DocumentOutcome, DocumentStatus, STUB_REPAIR_REPORT_KIND, STUB_REPAIR_REPORT_SCHEMA,
    StubRepairReport, repair_stub_dir,
};
pub use document::{RepairOutcome, RepairStatus, repair_document, repair_stub_file};
pub use error::StubError;
pub use init_stub::{render_init_stub, write_init_stub};
pub use rules::{
    collapse_duplicate_self, complete_typing_imports, demangle_self_parameters,
    repair_stub_text, repair_swig_shapes,
};
pub use stubgen::{
    GenerationReport, GenerationStatus, ModuleGeneration, STUB_GENERATION_REPORT_KIND,
    STUB_PACKAGE, ensure_stubgen_available, generate_module_stubs,
};
