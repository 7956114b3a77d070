//! Mock encoder for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::convert::{ConversionRequest, ConvertError, Encoder};

/// A recorded encode call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedEncode {
    /// The request that was submitted.
    pub request: ConversionRequest,
    /// Where the output was to be written.
    pub output_path: PathBuf,
}

/// Mock implementation of the Encoder trait.
///
/// Provides controllable behavior for testing:
/// - Track encode calls for assertions
/// - Simulate success/failure
/// - Control availability probes
/// - Simulate encoding time
///
/// Clones share state, so a handle kept by the test observes calls made
/// through a runner that owns the encoder.
///
/// # Example
///
/// ```rust,ignore
/// use recoda_core::testing::MockEncoder;
///
/// let encoder = MockEncoder::new();
/// encoder.fail_with("Invalid codec").await;
///
/// let err = encoder.encode(&request, &output).await.unwrap_err();
///
/// // Check what was submitted
/// let calls = encoder.recorded().await;
/// assert_eq!(calls.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockEncoder {
    /// Whether the availability probe reports success.
    available: Arc<RwLock<bool>>,
    /// If set, the next encode will fail with this error.
    next_error: Arc<RwLock<Option<ConvertError>>>,
    /// Simulated encoding duration in milliseconds.
    delay_ms: Arc<RwLock<u64>>,
    /// Recorded encode calls.
    calls: Arc<RwLock<Vec<RecordedEncode>>>,
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEncoder {
    /// Create a new mock encoder that reports available and succeeds.
    pub fn new() -> Self {
        Self {
            available: Arc::new(RwLock::new(true)),
            next_error: Arc::new(RwLock::new(None)),
            delay_ms: Arc::new(RwLock::new(0)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Control the availability probe result.
    pub async fn set_available(&self, available: bool) {
        *self.available.write().await = available;
    }

    /// Configure the next encode to fail with the given error.
    pub async fn set_next_error(&self, error: ConvertError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configure the next encode to fail the way a real encoder does, with
    /// the given stderr output and exit status 1.
    pub async fn fail_with(&self, stderr: &str) {
        self.set_next_error(ConvertError::encoder_failed(Some(1), stderr))
            .await;
    }

    /// Set the simulated encoding duration.
    pub async fn set_delay(&self, delay_ms: u64) {
        *self.delay_ms.write().await = delay_ms;
    }

    /// Get all recorded encode calls.
    pub async fn recorded(&self) -> Vec<RecordedEncode> {
        self.calls.read().await.clone()
    }

    /// Get the number of encodes submitted.
    pub async fn encode_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<ConvertError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Encoder for MockEncoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        *self.available.read().await
    }

    async fn encode(
        &self,
        request: &ConversionRequest,
        output_path: &Path,
    ) -> Result<(), ConvertError> {
        // Record the call
        self.calls.write().await.push(RecordedEncode {
            request: request.clone(),
            output_path: output_path.to_path_buf(),
        });

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        // Simulate encoding time
        let delay_ms = *self.delay_ms.read().await;
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        Ok(())
    }
}
