//! # osglue-loader
//!
//! Namespace aliasing and re-export layer.
//!
//! This crate provides:
//! - the hand-maintained nominal surface tables (`manifest`)
//! - `Result`-returning per-sub-namespace resolvers (`namespace`)
//! - native-library search-path setup and preloading (`preload`)
//! - the symbol alias table over resolved sub-namespaces (`alias`)
//! - the module registry with identity-preserving dual-name
//!   registration (`registry`)
//! - the one-shot load step assembling the flattened package (`package`)
//!
//! The design optimizes for "always produce a best-effort artifact": a
//! missing sub-namespace becomes an explicit sentinel, a missing symbol is
//! silently skipped, and the advertised export list shrinks to what actually
//! resolved. Almost nothing escalates.

pub mod alias;
pub mod error;
pub mod manifest;
pub mod namespace;
pub mod package;
pub mod preload;
pub mod registry;

pub use alias::{SymbolAlias, build_alias_table};
pub use error::LoadError;
pub use namespace::{
    Namespace, NamespaceProvider, NamespaceSlot, StaticProvider, StubDirProvider, extract_symbols,
};
pub use package::{FlatNamespace, LoadOptions, LoadOutcome, LoadReport, load_package};
pub use preload::{PreloadOutcome, PreloadPlan, SEARCH_PATH_VAR, platform_library_file};
pub use registry::ModuleRegistry;
