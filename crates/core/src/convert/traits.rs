//! Trait definitions for the convert module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ConvertError;
use super::types::ConversionRequest;

/// An external audio encoder the engine can delegate to.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Returns the name of this encoder implementation.
    fn name(&self) -> &str;

    /// Whether the encoder binary is present and runnable.
    ///
    /// Never errors: launch failures, non-zero probe exits and probe
    /// timeouts all map to `false`.
    async fn is_available(&self) -> bool;

    /// Runs the encoder for the given request, writing to `output_path`,
    /// and waits for it to exit. Exit status 0 is success; a non-zero exit
    /// surfaces the captured stderr as the error.
    async fn encode(
        &self,
        request: &ConversionRequest,
        output_path: &Path,
    ) -> Result<(), ConvertError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::types::AudioFormat;
    use std::sync::Arc;

    struct NullEncoder;

    #[async_trait]
    impl Encoder for NullEncoder {
        fn name(&self) -> &str {
            "null"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn encode(
            &self,
            _request: &ConversionRequest,
            _output_path: &Path,
        ) -> Result<(), ConvertError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_encoder_usable_as_trait_object() {
        let encoder: Arc<dyn Encoder> = Arc::new(NullEncoder);
        assert_eq!(encoder.name(), "null");
        assert!(encoder.is_available().await);

        let request = ConversionRequest::new("/in/a.wav", "/out", AudioFormat::Mp3);
        let output = request.output_path();
        encoder.encode(&request, &output).await.unwrap();
    }
}
