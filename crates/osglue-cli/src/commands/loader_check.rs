use crate::support::yes_no;
use osglue_loader::{
    LoadOptions, ModuleRegistry, NamespaceSlot, StubDirProvider, load_package,
};
use serde_json::json;
use std::path::PathBuf;

pub fn run(stub_dir: String, package_dir: Option<String>, json_output: bool) {
    let provider = StubDirProvider::new(&stub_dir);
    let options = LoadOptions {
        package_dir: package_dir.map(PathBuf::from),
        ..LoadOptions::default()
    };

    // A fresh registry: checking the surface must not mutate the
    // process-wide bindings.
    let mut registry = ModuleRegistry::new();
    let outcome = load_package(&options, &provider, &mut registry).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    let namespace = &outcome.namespace;
    let identical = registry.same_package(&options.primary_name, &options.alternate_name);

    if json_output {
        let payload = json!({
            "stubDir": stub_dir,
            "primaryName": options.primary_name,
            "alternateName": options.alternate_name,
            "dualNameIdentity": identical,
            "version": namespace.version,
            "modules": namespace.modules,
            "aliases": namespace.aliases,
            "geometrySearchPaths": namespace.geometry_search_paths,
            "exports": namespace.exports,
            "report": outcome.report,
        });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|err| {
            eprintln!("error: failed to render loader-check payload: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
        return;
    }

    println!("osglue loader-check {stub_dir}");
    println!();
    for line in &outcome.report.diagnostics {
        println!("  {line}");
    }
    for (name, slot) in &namespace.modules {
        match slot {
            NamespaceSlot::Loaded(resolved) => {
                println!("  module {name}: loaded ({} symbols)", resolved.symbols.len());
            }
            NamespaceSlot::Unavailable { reason } => {
                println!("  module {name}: unavailable ({reason})");
            }
        }
    }
    println!();
    println!("  aliases: {}", namespace.aliases.len());
    for alias in &namespace.aliases {
        println!("    - {} (from {})", alias.symbol, alias.source);
    }
    println!("  version: {}", namespace.version);
    println!(
        "  dual-name identity ({} / {}): {}",
        options.primary_name,
        options.alternate_name,
        yes_no(identical)
    );
    println!("  exports: {}", namespace.exports.join(", "));
}
