/*
 * Error type shared by every layer of the toolkit. Native allocation failures,
 * invalid handles and misconfigured controls all surface as a `PlatformError`
 * so that a UI build step can abort gracefully instead of crashing the process.
 *
 * Registry invariant violations are deliberately NOT represented here; they are
 * bootstrapping defects and the dispatcher panics on them.
 */
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Global platform setup (window class registration, fonts) failed.
    InitializationFailed(String),
    /// The native window resource could not be allocated.
    WindowCreationFailed(String),
    /// A handle was stale, disposed or never registered.
    InvalidHandle(String),
    /// A control was used without the configuration it needs.
    Configuration(String),
    OperationFailed(String),
    /// Error reported by the native windowing API.
    Native(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::InitializationFailed(msg) => {
                write!(f, "platform initialization failed: {msg}")
            }
            PlatformError::WindowCreationFailed(msg) => {
                write!(f, "window creation failed: {msg}")
            }
            PlatformError::InvalidHandle(msg) => write!(f, "invalid handle: {msg}"),
            PlatformError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            PlatformError::OperationFailed(msg) => write!(f, "operation failed: {msg}"),
            PlatformError::Native(msg) => write!(f, "native error: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        PlatformError::Native(format!("{} ({:?})", err.message(), err.code()))
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category_and_detail() {
        let err = PlatformError::Configuration("no measure function".to_string());
        assert_eq!(err.to_string(), "configuration error: no measure function");

        let err = PlatformError::WindowCreationFailed("out of handles".to_string());
        assert!(err.to_string().contains("out of handles"));
    }
}
