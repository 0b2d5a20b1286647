//! adb error types.

/// Errors produced while driving the adb executable.
#[derive(Debug, thiserror::Error)]
pub enum AdbError {
    #[error("failed to run `{program} {operation}`: {source}")]
    Spawn {
        program: String,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
}
