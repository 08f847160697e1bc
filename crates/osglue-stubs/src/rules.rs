//! Ordered repair rules for generated stub text.
//!
//! Each rule is a pure text-to-text substitution. `repair_stub_text` applies
//! them exactly once each, in a fixed total order; the output of one rule is
//! the input of the next. There is no fix-point iteration and no backtracking.

use regex::Regex;

/// Split fused implicit-parameter identifiers back into two tokens.
///
/// The generator sometimes fuses the receiver token with the following
/// parameter name into one identifier: `selfProperty`, `selfos`, `selfX_BD`.
/// The three sub-patterns (capitalized, lowercase, upper-snake) run in that
/// sequence; an already-split `self, name` is never split again because the
/// comma breaks the match.
///
/// Known false-positive risk: a legitimate parameter whose name starts with
/// the receiver token (for example `selfie`) is over-split. The defect list
/// this rule targets never contained such a name, so it is not special-cased.
pub fn demangle_self_parameters(content: &str) -> String {
    let patterns = [
        (r"\bself([A-Z][a-zA-Z_0-9]*)", "self, ${1}"),
        (r"\bself([a-z][a-zA-Z_0-9]*)", "self, ${1}"),
        (r"\bself([A-Z_][A-Z_0-9]*)", "self, ${1}"),
    ];

    let mut fixed = content.to_string();
    for (pattern, replacement) in patterns {
        let re = Regex::new(pattern).expect("self demangle regex");
        fixed = re.replace_all(&fixed, replacement).into_owned();
    }
    fixed
}

/// Collapse a doubled receiver token sequence back to a single occurrence.
///
/// A fused identifier that itself began with two receiver occurrences
/// (`selfselfBody`) leaves `self, self, Body` behind after demangling.
pub fn collapse_duplicate_self(content: &str) -> String {
    let re = Regex::new(r"\bself,\s*self,\s*").expect("duplicate self regex");
    re.replace_all(content, "self, ").into_owned()
}

/// Insert or extend the typing import when the document references `Any`
/// without importing it.
///
/// The detection window is the first ten lines, matching what the consumer
/// tooling inspects: if `Any` already appears there (import or otherwise),
/// the document is left alone.
pub fn complete_typing_imports(content: &str) -> String {
    let head: Vec<&str> = content.split('\n').take(10).collect();
    let has_typing_import = head.iter().any(|line| line.contains("from typing import"));
    let has_any_import = head.iter().any(|line| line.contains("Any"));

    if !content.contains("Any") || has_any_import {
        return content.to_string();
    }

    let mut lines: Vec<String> = content.split('\n').map(ToOwned::to_owned).collect();
    if has_typing_import {
        for line in &mut lines {
            if line.starts_with("from typing import") {
                if !line.contains("Any") {
                    if line.ends_with("import") {
                        line.push_str(" Any");
                    } else {
                        line.push_str(", Any");
                    }
                }
                break;
            }
        }
    } else {
        lines.insert(0, "from typing import Any".to_string());
    }
    lines.join("\n")
}

/// Fix the remaining generator-shaped defects, as three independent
/// substitutions over the whole text:
///
/// - a zero-parameter declaration gains the receiver (methods are never
///   truly parameterless in the source object model);
/// - an overload annotation fused with its declaration is reflowed onto two
///   lines with consistent indentation;
/// - a trailing comma immediately before the closing parameter parenthesis
///   is removed.
pub fn repair_swig_shapes(content: &str) -> String {
    let zero_param = Regex::new(r"def (\w+)\(\)").expect("zero-param regex");
    let fixed = zero_param.replace_all(content, "def ${1}(self)");

    let overload = Regex::new(r"(?m)@overload\s*def (\w+)\(self([^)]*)\)([^:]*):(.*)$")
        .expect("overload regex");
    let fixed = overload.replace_all(&fixed, "@overload\n    def ${1}(self${2})${3}:${4}");

    let trailing = Regex::new(r"def (\w+)\([^)]*,\s*\)").expect("trailing comma regex");
    trailing
        .replace_all(&fixed, |caps: &regex::Captures<'_>| {
            caps[0].replace(", )", ")")
        })
        .into_owned()
}

/// Apply the full repair sequence once, in order.
///
/// Idempotent: applying the sequence to already-repaired text reproduces it
/// byte for byte.
pub fn repair_stub_text(content: &str) -> String {
    let fixed = demangle_self_parameters(content);
    let fixed = collapse_duplicate_self(&fixed);
    let fixed = complete_typing_imports(&fixed);
    repair_swig_shapes(&fixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demangles_camel_lower_and_snake_forms() {
        assert_eq!(
            demangle_self_parameters("def setName(selfName) -> None: ..."),
            "def setName(self, Name) -> None: ..."
        );
        assert_eq!(
            demangle_self_parameters("def set_mass(selfmass) -> None: ..."),
            "def set_mass(self, mass) -> None: ..."
        );
        assert_eq!(
            demangle_self_parameters("def bind(selfX_BD) -> None: ..."),
            "def bind(self, X_BD) -> None: ..."
        );
        assert_eq!(
            demangle_self_parameters("def flag(self_FLAG) -> None: ..."),
            "def flag(self, _FLAG) -> None: ..."
        );
    }

    #[test]
    fn demangle_leaves_split_parameters_alone() {
        let text = "def setName(self, name: str) -> None: ...";
        assert_eq!(demangle_self_parameters(text), text);
    }

    #[test]
    fn doubled_receiver_collapses_to_one() {
        let fixed = demangle_self_parameters("def addBody(selfselfBody) -> None: ...");
        assert_eq!(
            collapse_duplicate_self(&fixed),
            "def addBody(self, Body) -> None: ..."
        );
    }

    #[test]
    fn typing_import_appended_to_existing_list() {
        let filler = "# filler\n".repeat(11);
        let text = format!("from typing import overload\n{filler}value: Any");
        let fixed = complete_typing_imports(&text);
        assert!(fixed.starts_with("from typing import overload, Any\n"));
    }

    #[test]
    fn typing_import_extends_bare_import_line() {
        // Eleven filler lines push the `Any` reference out of the window.
        let filler = "# filler\n".repeat(11);
        let text = format!("from typing import\n{filler}value: Any");
        let fixed = complete_typing_imports(&text);
        assert!(fixed.starts_with("from typing import Any\n"));
    }

    #[test]
    fn typing_import_prepended_when_absent() {
        let filler = "# filler\n".repeat(11);
        let text = format!("import abc\n{filler}value: Any");
        let fixed = complete_typing_imports(&text);
        assert!(fixed.starts_with("from typing import Any\nimport abc\n"));
    }

    #[test]
    fn typing_import_skipped_when_marker_absent() {
        let text = "import abc\n\nclass Model:\n    def getName(self) -> str: ...";
        assert_eq!(complete_typing_imports(text), text);
    }

    #[test]
    fn typing_import_skipped_when_already_visible_in_window() {
        let text = "from typing import Any\n\nvalue: Any";
        assert_eq!(complete_typing_imports(text), text);
    }

    #[test]
    fn zero_parameter_declaration_gains_receiver() {
        assert_eq!(
            repair_swig_shapes("    def initSystem(): ..."),
            "    def initSystem(self): ..."
        );
        let already = "    def initSystem(self): ...";
        assert_eq!(repair_swig_shapes(already), already);
    }

    #[test]
    fn trailing_comma_before_closing_parenthesis_is_removed() {
        assert_eq!(
            repair_swig_shapes("def setName(self, name: str, ) -> None: ..."),
            "def setName(self, name: str) -> None: ..."
        );
        let clean = "def setName(self, name: str) -> None: ...";
        assert_eq!(repair_swig_shapes(clean), clean);
    }

    #[test]
    fn repair_pipeline_is_idempotent() {
        let raw = "import abc\nfrom typing import overload\n\nclass Body:\n    def get_mass(self) -> float: ...\n    def set_mass(selfmass) -> None: ...\n\nclass Model:\n    def getName(selfname) -> str: ...\n    def initSystem(): ...\n    def addBody(selfselfBody) -> None: ...\n    @overload\n    def setName(self, name: str, flags: Any, ) -> None: ...";
        let once = repair_stub_text(raw);
        let twice = repair_stub_text(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn full_document_repair() {
        let raw = "import abc\nfrom typing import overload\n\nclass Body:\n    def get_mass(self) -> float: ...\n    def set_mass(selfmass) -> None: ...\n\nclass Model:\n    def getName(selfname) -> str: ...\n    def initSystem(): ...\n    def addBody(selfselfBody) -> None: ...\n    @overload\n    def setName(self, name: str, flags: Any, ) -> None: ...";
        insta::assert_snapshot!(repair_stub_text(raw), @r"
        import abc
        from typing import overload, Any

        class Body:
            def get_mass(self) -> float: ...
            def set_mass(self, mass) -> None: ...

        class Model:
            def getName(self, name) -> str: ...
            def initSystem(self): ...
            def addBody(self, Body) -> None: ...
            @overload
            def setName(self, name: str, flags: Any) -> None: ...
        ");
    }
}
