//! Testing utilities and mock implementations.
//!
//! This module provides a mock implementation of the `Encoder` trait,
//! allowing runner and front-end tests to run without a real FFmpeg
//! install.
//!
//! # Example
//!
//! ```rust,ignore
//! use recoda_core::testing::MockEncoder;
//!
//! let encoder = MockEncoder::new();
//!
//! // Configure mock behavior
//! encoder.set_delay(50).await;
//! encoder.fail_with("Invalid codec").await;
//!
//! // Hand it to a JobRunner...
//! ```

mod mock_encoder;

pub use mock_encoder::{MockEncoder, RecordedEncode};
