//! Error types for the namespace aliasing layer.

/// Errors arising while resolving sub-namespaces or registering the package.
///
/// Resolution failures are routinely downgraded to `NamespaceSlot::Unavailable`
/// sentinels by the load step; the registry variants are the only errors that
/// escalate out of `load_package`.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A sub-namespace could not be resolved.
    #[error("sub-namespace {module} unavailable: {reason}")]
    ModuleUnavailable { module: String, reason: String },

    /// A sub-namespace's interface document could not be read.
    #[error("failed to read interface document {path}: {message}")]
    ManifestUnreadable { path: String, message: String },

    /// A registry name is already bound to a different package object.
    #[error("registry name {name:?} already bound to a different package")]
    AlreadyRegistered { name: String },

    /// An alias was requested for a name that is not registered.
    #[error("registry name {name:?} is not bound")]
    NotRegistered { name: String },
}
