//! Common error types for hold-platform.

use thiserror::Error;

/// Platform-level errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("hook failed: {0}")]
    HookFailed(String),
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
