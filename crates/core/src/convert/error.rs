//! Error types for the convert module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while starting or running a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input file missing or not a regular file. Precondition failure:
    /// surfaced from `start`, no job is created.
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// A conversion is already in progress. Precondition failure: surfaced
    /// from `start`, the live job is untouched.
    #[error("a conversion is already in progress")]
    AlreadyRunning,

    /// Encoder binary missing or not runnable.
    #[error("encoder not found: {path} (install FFmpeg or configure encoder_path)")]
    EncoderNotFound { path: PathBuf },

    /// Output directory could not be created.
    #[error("failed to create output directory: {path}")]
    OutputDirFailed { path: PathBuf },

    /// Encoder exited with a non-zero status. The message is the captured
    /// stderr text, surfaced verbatim as the failure reason.
    #[error("{stderr}")]
    EncoderFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The job was cancelled.
    #[error("conversion cancelled")]
    Cancelled,

    /// I/O failure while spawning or waiting on the encoder.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Creates an encoder failure from an exit status and captured stderr,
    /// substituting a status description when stderr is empty.
    pub fn encoder_failed(exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        let stderr = stderr.into();
        let stderr = if stderr.trim().is_empty() {
            match exit_code {
                Some(code) => format!("encoder exited with status {}", code),
                None => "encoder terminated by signal".to_string(),
            }
        } else {
            stderr
        };
        Self::EncoderFailed { exit_code, stderr }
    }

    /// Whether this error is a start precondition failure, i.e. no job was
    /// created for it.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::InputNotFound { .. } | Self::AlreadyRunning)
    }
}
