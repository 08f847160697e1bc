use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "osglue",
    about = "Packaging glue for SWIG biomechanics bindings: stub generation, repair, and namespace flattening",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate interface stubs, repair them, and synthesize the top-level stub
    GenerateStubs {
        /// Directory where stub documents will be created
        output_dir: String,

        /// Optional path to the built binding package
        package_path: Option<String>,

        /// Python interpreter used to drive the generation tool
        #[arg(long, default_value = "python3")]
        python: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Repair already-generated stub documents in place
    RepairStubs {
        /// Directory holding the per-sub-namespace stub documents
        dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the nominal namespace surface against a stub directory
    LoaderCheck {
        /// Directory holding the per-sub-namespace stub documents
        stub_dir: String,

        /// Optional built package directory (native lib preload, version, geometry)
        #[arg(long)]
        package_dir: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
