//! Native library search-path setup and preloading.
//!
//! Sub-namespace resolution depends on the native libraries being
//! resolvable; establishing the search path and preloading them is a hard
//! ordering precondition of the load step. Individual preload failures are
//! downgraded to diagnostics and the load continues speculatively: the
//! dynamic loader may still resolve the dependency via its default search
//! order.

use crate::manifest::PRELOAD_LIBRARIES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Library search-path environment variable for this platform.
#[cfg(target_os = "windows")]
pub const SEARCH_PATH_VAR: &str = "PATH";
#[cfg(target_os = "macos")]
pub const SEARCH_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(all(unix, not(target_os = "macos")))]
pub const SEARCH_PATH_VAR: &str = "LD_LIBRARY_PATH";

#[cfg(windows)]
const LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
const LIST_SEPARATOR: char = ':';

/// Platform file name for a native library stem.
pub fn platform_library_file(name: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{name}.dll")
    } else if cfg!(target_os = "macos") {
        format!("lib{name}.dylib")
    } else {
        format!("lib{name}.so")
    }
}

/// The search path and fixed-order library list derived from a built
/// package directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadPlan {
    pub lib_dir: PathBuf,
    pub libraries: Vec<PathBuf>,
}

/// What the preload step actually did; never an error by itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreloadOutcome {
    pub lib_dir: String,
    pub search_path_prepended: bool,
    pub preloaded: Vec<String>,
    pub diagnostics: Vec<String>,
}

impl PreloadPlan {
    pub fn for_package_dir(package_dir: &Path) -> Self {
        let lib_dir = package_dir.join("lib");
        let libraries = PRELOAD_LIBRARIES
            .iter()
            .map(|name| lib_dir.join(platform_library_file(name)))
            .collect();
        Self { lib_dir, libraries }
    }

    /// Prepend the library directory to the platform search path, then load
    /// each native library resident in fixed dependency order.
    pub fn apply(&self) -> PreloadOutcome {
        let mut outcome = PreloadOutcome {
            lib_dir: self.lib_dir.display().to_string(),
            search_path_prepended: false,
            preloaded: Vec::new(),
            diagnostics: Vec::new(),
        };

        if !self.lib_dir.is_dir() {
            outcome.diagnostics.push(format!(
                "library directory {} not found; relying on the default loader search order",
                self.lib_dir.display()
            ));
            return outcome;
        }

        prepend_search_path(&self.lib_dir);
        outcome.search_path_prepended = true;

        self.load_resident(&mut outcome);
        outcome
    }

    #[cfg(unix)]
    fn load_resident(&self, outcome: &mut PreloadOutcome) {
        for path in &self.libraries {
            match open_resident(path) {
                Ok(()) => outcome.preloaded.push(path.display().to_string()),
                Err(message) => outcome.diagnostics.push(format!(
                    "warning: could not preload {}: {message}",
                    path.display()
                )),
            }
        }
    }

    #[cfg(not(unix))]
    fn load_resident(&self, _outcome: &mut PreloadOutcome) {
        // The search-path prepend covers DLL resolution; nothing to preload.
    }
}

fn prepend_search_path(dir: &Path) {
    let prepended = match std::env::var(SEARCH_PATH_VAR) {
        Ok(existing) if !existing.is_empty() => {
            format!("{}{LIST_SEPARATOR}{existing}", dir.display())
        }
        _ => dir.display().to_string(),
    };
    // The load step runs once, single-threaded, before any worker threads
    // exist; mutating the process environment here is what makes later
    // sub-namespace imports resolvable.
    unsafe { std::env::set_var(SEARCH_PATH_VAR, prepended) };
}

#[cfg(unix)]
fn open_resident(path: &Path) -> Result<(), String> {
    use libloading::os::unix::{Library, RTLD_GLOBAL, RTLD_NOW};

    let library = unsafe { Library::open(Some(path), RTLD_NOW | RTLD_GLOBAL) }
        .map_err(|e| e.to_string())?;
    // Preloaded handles stay resident for the life of the process, like the
    // dynamic loader's own dependency graph.
    std::mem::forget(library);
    Ok(())
}
