//! Sub-namespace resolution.
//!
//! Resolvers return an explicit `Result` per sub-namespace; the load step
//! turns failures into `NamespaceSlot::Unavailable` sentinels instead of
//! propagating them. Callers branch on the slot, never on a suppressed
//! exception path.

use crate::error::LoadError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// One resolved sub-namespace: its name and the symbol set it exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub name: String,
    pub symbols: BTreeSet<String>,
}

impl Namespace {
    pub fn new(name: impl Into<String>, symbols: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }
}

/// Binding state of one sub-namespace after the load step: either the
/// resolved namespace, or an explicit unavailable sentinel carrying the
/// reason. A sentinel never prevents sibling sub-namespaces from loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamespaceSlot {
    Loaded(Namespace),
    Unavailable { reason: String },
}

impl NamespaceSlot {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn namespace(&self) -> Option<&Namespace> {
        match self {
            Self::Loaded(namespace) => Some(namespace),
            Self::Unavailable { .. } => None,
        }
    }
}

/// A source of sub-namespaces, one `resolve` call per module name.
pub trait NamespaceProvider {
    fn resolve(&self, module: &str) -> Result<Namespace, LoadError>;
}

/// Extract the exposed symbol set from an interface document's text.
///
/// Line-anchored patterns only: top-level `class`/`def` declarations and
/// top-level `NAME: T` / `NAME = ...` bindings. This is deliberately not a
/// parser; the documents are generator output with a narrow shape.
pub fn extract_symbols(text: &str) -> BTreeSet<String> {
    let declaration =
        Regex::new(r"(?m)^(?:class|def)\s+([A-Za-z_][A-Za-z0-9_]*)").expect("declaration regex");
    let binding = Regex::new(r"(?m)^([A-Za-z_][A-Za-z0-9_]*)\s*[:=]").expect("binding regex");

    let mut symbols = BTreeSet::new();
    for caps in declaration.captures_iter(text) {
        symbols.insert(caps[1].to_string());
    }
    for caps in binding.captures_iter(text) {
        symbols.insert(caps[1].to_string());
    }
    symbols
}

/// Production resolver: one interface document per sub-namespace under a
/// stub directory. The document doubles as the generator-emitted manifest
/// of available symbols.
#[derive(Debug, Clone)]
pub struct StubDirProvider {
    root: PathBuf,
}

impl StubDirProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn document_path(&self, module: &str) -> PathBuf {
        self.root.join(format!("{module}.pyi"))
    }
}

impl NamespaceProvider for StubDirProvider {
    fn resolve(&self, module: &str) -> Result<Namespace, LoadError> {
        let path = self.document_path(module);
        let text = fs::read_to_string(&path).map_err(|e| LoadError::ManifestUnreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Namespace {
            name: module.to_string(),
            symbols: extract_symbols(&text),
        })
    }
}

/// In-memory resolver for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    namespaces: BTreeMap<String, Namespace>,
    failures: BTreeMap<String, String>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolvable namespace.
    pub fn with_namespace<I, S>(mut self, module: &str, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces.insert(
            module.to_string(),
            Namespace::new(module, symbols.into_iter().map(Into::into)),
        );
        self
    }

    /// Register a module whose resolution fails with the given reason.
    pub fn with_failure(mut self, module: &str, reason: &str) -> Self {
        self.failures.insert(module.to_string(), reason.to_string());
        self
    }
}

impl NamespaceProvider for StaticProvider {
    fn resolve(&self, module: &str) -> Result<Namespace, LoadError> {
        if let Some(namespace) = self.namespaces.get(module) {
            return Ok(namespace.clone());
        }
        let reason = self
            .failures
            .get(module)
            .cloned()
            .unwrap_or_else(|| "not registered with provider".to_string());
        Err(LoadError::ModuleUnavailable {
            module: module.to_string(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "osglue-loader-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should exist");
        path
    }

    #[test]
    fn extracts_classes_functions_and_bindings() {
        let text = "from typing import Any\n\nclass Model:\n    def getName(self) -> str: ...\n\ndef defaultModel() -> Model: ...\n\n__version__: str\nGRAVITY = 9.81\n";
        let symbols = extract_symbols(text);
        assert!(symbols.contains("Model"));
        assert!(symbols.contains("defaultModel"));
        assert!(symbols.contains("__version__"));
        assert!(symbols.contains("GRAVITY"));
        // Indented members are not top-level symbols.
        assert!(!symbols.contains("getName"));
    }

    #[test]
    fn stub_dir_provider_resolves_from_documents() {
        let dir = temp_dir("resolve");
        fs::write(
            dir.join("simulation.pyi"),
            "class Model: ...\nclass Manager: ...\n",
        )
        .expect("fixture should be written");

        let provider = StubDirProvider::new(&dir);
        let namespace = provider
            .resolve("simulation")
            .expect("resolution should succeed");
        assert_eq!(namespace.name, "simulation");
        assert!(namespace.contains("Model"));
        assert!(namespace.contains("Manager"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_document_is_an_explicit_error() {
        let dir = temp_dir("missing");
        let provider = StubDirProvider::new(&dir);
        let err = provider.resolve("moco").expect_err("resolution should fail");
        assert!(matches!(err, LoadError::ManifestUnreadable { .. }));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn static_provider_distinguishes_failures() {
        let provider = StaticProvider::new()
            .with_namespace("common", ["Vec3"])
            .with_failure("simbody", "native library rejected");

        assert!(provider.resolve("common").is_ok());
        let err = provider.resolve("simbody").expect_err("should fail");
        assert!(err.to_string().contains("native library rejected"));
        assert!(provider.resolve("tools").is_err());
    }
}
