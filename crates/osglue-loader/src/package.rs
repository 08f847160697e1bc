//! The one-shot load step: preload, resolve, flatten, register.

use crate::alias::{SymbolAlias, build_alias_table};
use crate::error::LoadError;
use crate::manifest;
use crate::namespace::{NamespaceProvider, NamespaceSlot};
use crate::preload::{PreloadOutcome, PreloadPlan};
use crate::registry::ModuleRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// How to load the package.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Built package directory: native `lib/`, `VERSION`, `Geometry/`.
    /// Without it the preload, version, and geometry steps are skipped.
    pub package_dir: Option<PathBuf>,
    pub primary_name: String,
    pub alternate_name: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            package_dir: None,
            primary_name: manifest::PRIMARY_PACKAGE_NAME.to_string(),
            alternate_name: manifest::ALTERNATE_PACKAGE_NAME.to_string(),
        }
    }
}

/// The flattened top-level namespace: sub-namespace slots, flat symbol
/// aliases, and the advertised export list (nominal list intersected with
/// what actually resolved).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatNamespace {
    pub modules: BTreeMap<String, NamespaceSlot>,
    pub aliases: Vec<SymbolAlias>,
    pub version: String,
    pub geometry_search_paths: Vec<String>,
    pub exports: Vec<String>,
}

impl FlatNamespace {
    pub fn module(&self, name: &str) -> Option<&NamespaceSlot> {
        self.modules.get(name)
    }

    /// Sub-namespace that a flat symbol was aliased from, if any.
    pub fn alias_source(&self, symbol: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|alias| alias.symbol == symbol)
            .map(|alias| alias.source.as_str())
    }

    /// Whether `name` is actually bound: a loaded sub-namespace, an aliased
    /// flat symbol, or the version marker.
    pub fn binds(&self, name: &str) -> bool {
        if name == manifest::VERSION_EXPORT {
            return true;
        }
        if self
            .modules
            .get(name)
            .is_some_and(NamespaceSlot::is_loaded)
        {
            return true;
        }
        self.aliases.iter().any(|alias| alias.symbol == name)
    }
}

/// Diagnostics accumulated by one load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preload: Option<PreloadOutcome>,
    pub diagnostics: Vec<String>,
}

/// A completed load: the shared namespace handle plus its report. The same
/// handle is registered under both package names.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub namespace: Arc<FlatNamespace>,
    pub report: LoadReport,
}

/// Execute the load step once.
///
/// Order is a hard precondition: native search-path setup and preload come
/// before any sub-namespace resolution. Every resolution failure becomes an
/// `Unavailable` sentinel; a missing expected symbol is skipped silently.
/// The only errors that escalate are registry name conflicts.
///
/// Single-invocation assumption: this mutates process-wide state (the
/// search-path environment variable and, via the caller's registry, the
/// global name bindings). It is not safe to re-invoke concurrently with
/// itself, and nothing in the surrounding system does.
pub fn load_package(
    options: &LoadOptions,
    provider: &dyn NamespaceProvider,
    registry: &mut ModuleRegistry,
) -> Result<LoadOutcome, LoadError> {
    let mut report = LoadReport::default();

    if let Some(package_dir) = &options.package_dir {
        let outcome = PreloadPlan::for_package_dir(package_dir).apply();
        report.diagnostics.extend(outcome.diagnostics.clone());
        report.preload = Some(outcome);
    }

    let mut modules = BTreeMap::new();
    for module in manifest::REQUIRED_MODULES {
        let slot = match provider.resolve(module) {
            Ok(namespace) => NamespaceSlot::Loaded(namespace),
            Err(err) => {
                report.diagnostics.push(format!(
                    "warning: could not load sub-namespace {module}: {err}"
                ));
                NamespaceSlot::Unavailable {
                    reason: err.to_string(),
                }
            }
        };
        modules.insert(module.to_string(), slot);
    }
    for module in manifest::OPTIONAL_MODULES {
        // Optional sub-namespaces are absent from many builds; no diagnostic.
        let slot = match provider.resolve(module) {
            Ok(namespace) => NamespaceSlot::Loaded(namespace),
            Err(err) => NamespaceSlot::Unavailable {
                reason: err.to_string(),
            },
        };
        modules.insert(module.to_string(), slot);
    }

    let aliases = build_alias_table(&modules, &manifest::EXPECTED_SYMBOLS);

    let version = options
        .package_dir
        .as_deref()
        .map(|dir| dir.join(manifest::VERSION_FILE))
        .filter(|path| path.is_file())
        .and_then(|path| fs::read_to_string(path).ok())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| manifest::DEFAULT_VERSION.to_string());

    let mut geometry_search_paths = Vec::new();
    if let Some(package_dir) = &options.package_dir {
        let geometry_dir = package_dir.join(manifest::GEOMETRY_DIR);
        let visualizer_bound = aliases
            .iter()
            .any(|alias| alias.symbol == manifest::VISUALIZER_SYMBOL);
        // Absence of either the facility or the directory is not an error.
        if visualizer_bound && geometry_dir.is_dir() {
            geometry_search_paths.push(geometry_dir.display().to_string());
        }
    }

    let mut namespace = FlatNamespace {
        modules,
        aliases,
        version,
        geometry_search_paths,
        exports: Vec::new(),
    };
    namespace.exports = manifest::nominal_exports()
        .into_iter()
        .filter(|name| namespace.binds(name))
        .map(ToOwned::to_owned)
        .collect();

    let namespace = Arc::new(namespace);
    registry.register(&options.primary_name, Arc::clone(&namespace))?;
    registry.register_alias(&options.primary_name, &options.alternate_name)?;

    Ok(LoadOutcome { namespace, report })
}
