use thiserror::Error;

/// Errors surfaced by the library.
#[derive(Debug, Error)]
pub enum MotionError {
    /// A spec or option failed validation at construction time
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A handle was used outside an initialized provider scope
    #[error("scroll scope is not initialized or already torn down")]
    NotInitialized,
}
