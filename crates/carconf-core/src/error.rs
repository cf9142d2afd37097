//! Error types for the configurator core.

/// Errors from the configurator core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfiguratorError {
    #[error("unknown part '{0}'")]
    UnknownPart(String),

    #[error("part '{0}' not found in catalog")]
    PartNotFound(String),

    #[error("catalog must contain at least one part")]
    EmptyCatalog,

    #[error("duplicate part id '{0}' in catalog")]
    DuplicatePart(String),
}

/// Result alias for configurator operations.
pub type Result<T> = std::result::Result<T, ConfiguratorError>;
