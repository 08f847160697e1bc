//! Nominal surface tables for the wrapped library.
//!
//! These lists are maintained by hand, independently of what the binding
//! generator actually emits; drift between them is expected over time and is
//! why every lookup against them is best-effort.

/// Sub-namespaces every distribution ships.
pub const REQUIRED_MODULES: [&str; 6] = [
    "simbody",
    "common",
    "simulation",
    "actuators",
    "analyses",
    "tools",
];

/// Sub-namespaces present only in some builds.
pub const OPTIONAL_MODULES: [&str; 3] = ["examplecomponents", "moco", "report"];

/// `(symbol, source sub-namespace)` pairs expected to be re-exported into
/// the flat top-level view. A symbol absent from its sub-namespace is
/// skipped, never an error.
pub const EXPECTED_SYMBOLS: [(&str, &str); 20] = [
    ("Component", "common"),
    ("Property", "common"),
    ("Vec3", "common"),
    ("Rotation", "common"),
    ("Transform", "common"),
    ("Storage", "common"),
    ("Array", "common"),
    ("Model", "simulation"),
    ("Manager", "simulation"),
    ("State", "simulation"),
    ("InverseKinematicsSolver", "simulation"),
    ("InverseDynamicsSolver", "simulation"),
    ("ModelVisualizer", "simulation"),
    ("Muscle", "actuators"),
    ("CoordinateActuator", "actuators"),
    ("PointActuator", "actuators"),
    ("InverseKinematicsTool", "tools"),
    ("InverseDynamicsTool", "tools"),
    ("ForwardTool", "tools"),
    ("AnalyzeTool", "tools"),
];

/// The package's own top-level name.
pub const PRIMARY_PACKAGE_NAME: &str = "pyosim";

/// Compatibility name the identical package object is also registered
/// under; code written against the original toolkit's naming imports this.
pub const ALTERNATE_PACKAGE_NAME: &str = "opensim";

/// Native libraries preloaded before any sub-namespace resolution, in fixed
/// dependency order (common, then math, then the physics library on top).
pub const PRELOAD_LIBRARIES: [&str; 3] = ["SimTKcommon", "SimTKmath", "SimTKsimbody"];

/// Geometry directory registered with the visualizer when both exist.
pub const GEOMETRY_DIR: &str = "Geometry";

/// The visualization facility that accepts geometry search paths.
pub const VISUALIZER_SYMBOL: &str = "ModelVisualizer";

pub const VERSION_FILE: &str = "VERSION";
pub const DEFAULT_VERSION: &str = "0.0.1";
pub const VERSION_EXPORT: &str = "__version__";

/// The full nominal export list: every sub-namespace, every expected flat
/// symbol, and the version marker. The advertised list after a load is this
/// list intersected with what actually resolved.
pub fn nominal_exports() -> Vec<&'static str> {
    let mut exports = Vec::new();
    exports.extend(REQUIRED_MODULES);
    exports.extend(OPTIONAL_MODULES);
    exports.extend(EXPECTED_SYMBOLS.iter().map(|(symbol, _)| *symbol));
    exports.push(VERSION_EXPORT);
    exports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_symbols_reference_known_modules() {
        for (symbol, module) in EXPECTED_SYMBOLS {
            assert!(
                REQUIRED_MODULES.contains(&module) || OPTIONAL_MODULES.contains(&module),
                "{symbol} references unknown module {module}"
            );
        }
    }

    #[test]
    fn nominal_exports_cover_modules_symbols_and_version() {
        let exports = nominal_exports();
        assert!(exports.contains(&"simulation"));
        assert!(exports.contains(&"moco"));
        assert!(exports.contains(&"Model"));
        assert!(exports.contains(&VERSION_EXPORT));
        assert_eq!(
            exports.len(),
            REQUIRED_MODULES.len() + OPTIONAL_MODULES.len() + EXPECTED_SYMBOLS.len() + 1
        );
    }
}
