use thiserror::Error;

/// Errors raised by an [`Executor`](crate::runtime::Executor) while running a block's code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Invalid input format")]
    InvalidInput,

    /// Reported by executor backends other than the built-in simulator.
    #[error("{0}")]
    Backend(String),
}

/// Errors that can occur while ordering the block graph for propagation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Connections form a cycle through block '{0}'")]
    Cycle(String),
}

/// Errors returned when importing a canvas from exported text.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to parse canvas JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Invalid canvas state: missing blocks array")]
    MissingBlocks,

    #[error("Invalid canvas state: missing connections array")]
    MissingConnections,

    #[error("Invalid canvas state: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Errors that can occur when ingesting CSV text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    #[error("CSV text contains no rows")]
    Empty,

    #[error("No CSV block with id '{0}'")]
    NoSuchBlock(String),
}

/// Failures inside a storage backend. These never reach callers of
/// [`CanvasStore`](crate::store::CanvasStore); they are logged and swallowed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage quota exceeded: {needed} bytes requested, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Could not access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
