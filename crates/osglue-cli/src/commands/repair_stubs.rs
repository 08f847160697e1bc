use osglue_stubs::{DocumentStatus, repair_stub_dir};
use std::path::PathBuf;

pub fn run(dir: String, json_output: bool) {
    let dir = PathBuf::from(dir);
    let report = repair_stub_dir(&dir).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let rendered = serde_json::to_string_pretty(&report).unwrap_or_else(|err| {
            eprintln!("error: failed to render repair-stubs report: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
        return;
    }

    println!("osglue repair-stubs {}", dir.display());
    println!();
    for doc in &report.documents {
        match doc.status {
            DocumentStatus::Repaired => println!("  repaired: {}", doc.path),
            DocumentStatus::Clean => println!("  clean: {}", doc.path),
            DocumentStatus::Failed => println!(
                "  failed: {} ({})",
                doc.path,
                doc.message.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    println!();
    println!(
        "  repaired: {}  clean: {}  failed: {}",
        report.repaired, report.clean, report.failed
    );
}
