use thiserror::Error;

/// Why the solar scene cannot run on this page.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityError {
    /// The 3D engine library was not loaded.
    #[error("3D engine library is not available")]
    EngineMissing,
    /// No hardware-accelerated context could be obtained from the canvas.
    #[error("no hardware-accelerated rendering context on the canvas")]
    ContextUnavailable,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid scene config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}
