use osglue_loader::manifest::{EXPECTED_SYMBOLS, REQUIRED_MODULES};
use osglue_stubs::{
    GenerationStatus, STUB_PACKAGE, ensure_stubgen_available, generate_module_stubs,
    repair_stub_dir, write_init_stub,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

pub fn run(output_dir: String, package_path: Option<String>, python: String, json_output: bool) {
    let output_dir = PathBuf::from(output_dir);
    fs::create_dir_all(&output_dir).unwrap_or_else(|e| {
        eprintln!("error: failed to create {}: {e}", output_dir.display());
        std::process::exit(1);
    });

    // Tool bootstrap is the single fatal path of the pipeline.
    if let Err(err) = ensure_stubgen_available(&python) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let package_path = package_path.map(PathBuf::from);
    let generation = generate_module_stubs(
        &python,
        package_path.as_deref(),
        &output_dir,
        &REQUIRED_MODULES,
    );
    if !generation.nominally_succeeded() {
        for item in &generation.modules {
            eprintln!(
                "  failed: {} ({})",
                item.module,
                item.detail.as_deref().unwrap_or("unknown error")
            );
        }
        eprintln!("error: no sub-namespace stub generation succeeded");
        std::process::exit(1);
    }

    // Per-document repair warnings are not failures; the tool emits usable
    // stubs despite them.
    let stub_dir = output_dir.join(STUB_PACKAGE);
    let repair = match repair_stub_dir(&stub_dir) {
        Ok(report) => Some(report),
        Err(err) => {
            eprintln!("warning: skipping stub repair: {err}");
            None
        }
    };

    let init_stub = write_init_stub(&output_dir, &REQUIRED_MODULES, &EXPECTED_SYMBOLS)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        });

    if json_output {
        let payload = json!({
            "outputDir": output_dir.display().to_string(),
            "generation": generation,
            "repair": repair,
            "initStub": init_stub.display().to_string(),
        });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|err| {
            eprintln!("error: failed to render generate-stubs payload: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
        return;
    }

    println!("osglue generate-stubs {}", output_dir.display());
    println!();
    for item in &generation.modules {
        match item.status {
            GenerationStatus::Generated => println!("  generated: {}", item.module),
            GenerationStatus::GeneratedWithWarnings => println!(
                "  generated with warnings: {} ({})",
                item.module,
                item.detail.as_deref().unwrap_or("no detail")
            ),
            GenerationStatus::Failed => println!(
                "  failed: {} ({})",
                item.module,
                item.detail.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    println!();
    if let Some(report) = &repair {
        println!(
            "  repair: {} repaired, {} clean, {} failed",
            report.repaired, report.clean, report.failed
        );
    }
    println!("  top-level stub: {}", init_stub.display());
}
