//! FFmpeg-backed encoder.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use super::command::build_args;
use super::error::ConvertError;
use super::traits::Encoder;
use super::types::ConversionRequest;
use crate::config::EngineConfig;

/// Encoder that shells out to the `ffmpeg` binary.
pub struct FfmpegEncoder {
    config: EngineConfig,
}

impl FfmpegEncoder {
    /// Creates an encoder using the given engine configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Creates an encoder with default configuration, expecting `ffmpeg`
    /// on the PATH.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.config.probe_timeout_secs)
    }
}

#[async_trait]
impl Encoder for FfmpegEncoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn is_available(&self) -> bool {
        let probe = Command::new(&self.config.encoder_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match tokio::time::timeout(self.probe_timeout(), probe).await {
            Ok(Ok(status)) => status.success(),
            Ok(Err(e)) => {
                debug!(
                    "Encoder probe failed for {}: {}",
                    self.config.encoder_path.display(),
                    e
                );
                false
            }
            Err(_) => {
                warn!(
                    "Encoder probe timed out after {}s for {}",
                    self.config.probe_timeout_secs,
                    self.config.encoder_path.display()
                );
                false
            }
        }
    }

    async fn encode(
        &self,
        request: &ConversionRequest,
        output_path: &Path,
    ) -> Result<(), ConvertError> {
        let args = build_args(request, output_path);
        debug!(
            "Running {} {}",
            self.config.encoder_path.display(),
            args.join(" ")
        );

        // kill_on_drop ties the child to this future, so cancelling the
        // conversion also tears down the encoder process.
        let output = Command::new(&self.config.encoder_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ConvertError::EncoderNotFound {
                    path: self.config.encoder_path.clone(),
                },
                _ => ConvertError::Io(e),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(ConvertError::encoder_failed(output.status.code(), stderr))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::types::AudioFormat;
    use std::path::PathBuf;

    fn config_for(path: impl Into<PathBuf>) -> EngineConfig {
        EngineConfig::default().with_encoder_path(path.into())
    }

    #[tokio::test]
    async fn test_is_available_false_for_missing_binary() {
        let encoder = FfmpegEncoder::new(config_for("/nonexistent/ffmpeg-binary"));
        assert!(!encoder.is_available().await);
    }

    #[tokio::test]
    async fn test_encode_maps_missing_binary_to_encoder_not_found() {
        let encoder = FfmpegEncoder::new(config_for("/nonexistent/ffmpeg-binary"));
        let request = ConversionRequest::new("/in/a.wav", "/out", AudioFormat::Mp3);
        let output = request.output_path();

        let err = encoder.encode(&request, &output).await.unwrap_err();
        assert!(matches!(err, ConvertError::EncoderNotFound { .. }));
        assert!(err.to_string().contains("encoder not found"));
    }

    #[cfg(unix)]
    fn fake_encoder(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-ffmpeg");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_and_encode_with_clean_exit() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_encoder(dir.path(), "exit 0");
        let encoder = FfmpegEncoder::new(config_for(&script));

        assert!(encoder.is_available().await);

        let request = ConversionRequest::new("/in/a.wav", dir.path(), AudioFormat::Mp3);
        let output = request.output_path();
        encoder.encode(&request, &output).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_encode_surfaces_stderr_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_encoder(dir.path(), "echo 'Invalid codec' 1>&2\nexit 1");
        let encoder = FfmpegEncoder::new(config_for(&script));

        let request = ConversionRequest::new("/in/a.wav", dir.path(), AudioFormat::Mp3);
        let output = request.output_path();

        let err = encoder.encode(&request, &output).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid codec");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_encode_reports_exit_status_when_stderr_empty() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_encoder(dir.path(), "exit 3");
        let encoder = FfmpegEncoder::new(config_for(&script));

        let request = ConversionRequest::new("/in/a.wav", dir.path(), AudioFormat::Ogg);
        let output = request.output_path();

        let err = encoder.encode(&request, &output).await.unwrap_err();
        assert_eq!(err.to_string(), "encoder exited with status 3");
    }
}
