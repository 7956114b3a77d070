//! Convert module for transcoding audio files.
//!
//! This module provides the `Encoder` trait and the FFmpeg implementation,
//! along with the request, event and error types the rest of the engine is
//! built around.
//!
//! # Features
//!
//! - Audio transcoding to MP3, WAV, AAC, OGG and FLAC
//! - Command line construction for FFmpeg
//! - Availability probing of the encoder binary
//! - Simulated progress reporting during conversion
//!
//! # Example
//!
//! ```ignore
//! use recoda_core::convert::{AudioFormat, ConversionRequest, Encoder, FfmpegEncoder};
//!
//! let encoder = FfmpegEncoder::with_defaults();
//!
//! // Probe ffmpeg before spawning anything
//! if !encoder.is_available().await {
//!     return Err(ConvertError::EncoderNotFound { path: "ffmpeg".into() });
//! }
//!
//! let request = ConversionRequest::new("/music/song.wav", "/music/out", AudioFormat::Mp3)
//!     .with_bitrate_str("192");
//! let output_path = request.output_path();
//!
//! encoder.encode(&request, &output_path).await?;
//! println!("Wrote {}", output_path.display());
//! ```

mod command;
mod error;
mod ffmpeg;
mod progress;
mod traits;
mod types;

pub use command::build_args;
pub use error::ConvertError;
pub use ffmpeg::FfmpegEncoder;
pub use progress::{ProgressSource, SimulatedProgress};
pub use traits::Encoder;
pub use types::{
    AudioFormat, Bitrate, ConversionRequest, JobEvent, JobState, ParseFormatError,
};
