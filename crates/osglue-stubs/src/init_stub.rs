//! Synthesis of the flattened top-level stub document.
//!
//! The generator only emits per-sub-namespace documents; the top-level view
//! (sub-namespace imports, guarded flat re-exports, version marker, export
//! list) is synthesized here from the nominal surface tables.

use crate::error::StubError;
use crate::stubgen::STUB_PACKAGE;
use std::fs;
use std::path::{Path, PathBuf};

/// Render the top-level interface document.
///
/// `reexports` is the `(symbol, source module)` table; re-export blocks are
/// grouped per source module in `modules` order, symbols in table order.
/// Each block is guarded so a symbol the generator never emitted degrades to
/// an `Any` binding instead of breaking the whole document.
pub fn render_init_stub(modules: &[&str], reexports: &[(&str, &str)]) -> String {
    let mut out = String::new();
    out.push_str("\"\"\"Interface stubs for the flattened biomechanics binding namespace.\"\"\"\n");
    out.push_str("from typing import Any\n\n");

    for module in modules {
        out.push_str(&format!("from . import {module} as {module}\n"));
    }

    for module in modules {
        let symbols: Vec<&str> = reexports
            .iter()
            .filter(|(_, source)| source == module)
            .map(|(symbol, _)| *symbol)
            .collect();
        if symbols.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str("try:\n");
        for symbol in &symbols {
            out.push_str(&format!("    from .{module} import {symbol} as {symbol}\n"));
        }
        out.push_str("except ImportError:\n");
        for symbol in &symbols {
            out.push_str(&format!("    {symbol}: Any\n"));
        }
    }

    out.push_str("\n__version__: str\n");

    out.push_str("\n__all__ = [\n");
    for module in modules {
        out.push_str(&format!("    \"{module}\",\n"));
    }
    for (symbol, _) in reexports {
        out.push_str(&format!("    \"{symbol}\",\n"));
    }
    out.push_str("    \"__version__\",\n");
    out.push_str("]\n");

    out
}

/// Write the synthesized top-level stub as `<output_dir>/pyopensim/__init__.pyi`.
pub fn write_init_stub(
    output_dir: &Path,
    modules: &[&str],
    reexports: &[(&str, &str)],
) -> Result<PathBuf, StubError> {
    let package_dir = output_dir.join(STUB_PACKAGE);
    fs::create_dir_all(&package_dir).map_err(|e| StubError::write(&package_dir, e.to_string()))?;

    let path = package_dir.join("__init__.pyi");
    let text = render_init_stub(modules, reexports);
    fs::write(&path, text).map_err(|e| StubError::write(&path, e.to_string()))?;
    Ok(path)
}
