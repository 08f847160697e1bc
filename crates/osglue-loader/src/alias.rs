//! Symbol alias table: the flat view over resolved sub-namespaces.

use crate::namespace::NamespaceSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One flat-namespace binding: a public symbol and the sub-namespace it was
/// sourced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolAlias {
    pub symbol: String,
    pub source: String,
}

/// Probe each loaded sub-namespace for the expected symbols and alias every
/// hit into the flat view, in table order.
///
/// A symbol absent from its sub-namespace, or expected from a sub-namespace
/// that did not load, is silently skipped: the expected-symbol table is
/// maintained independently of the generator's output and drift between
/// them is routine. The table is rebuilt fully on every call, never patched.
pub fn build_alias_table(
    slots: &BTreeMap<String, NamespaceSlot>,
    expected: &[(&str, &str)],
) -> Vec<SymbolAlias> {
    let mut aliases = Vec::new();
    for (symbol, source) in expected {
        let Some(namespace) = slots.get(*source).and_then(NamespaceSlot::namespace) else {
            continue;
        };
        if namespace.contains(symbol) {
            aliases.push(SymbolAlias {
                symbol: (*symbol).to_string(),
                source: (*source).to_string(),
            });
        }
    }
    aliases
}
