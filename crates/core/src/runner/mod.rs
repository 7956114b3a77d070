//! Runner module for single-flight job execution.
//!
//! This module provides the `JobRunner` which owns the single conversion
//! slot: it validates start requests, spawns the background worker for an
//! accepted job and reports the job's lifecycle over an event channel.
//!
//! At most one job runs at a time; a start while a job is live is rejected
//! with `ConvertError::AlreadyRunning`.
//!
//! # Example
//!
//! ```ignore
//! use recoda_core::config::EngineConfig;
//! use recoda_core::convert::{AudioFormat, ConversionRequest, FfmpegEncoder, JobEvent};
//! use recoda_core::runner::JobRunner;
//!
//! let config = EngineConfig::default();
//! let encoder = FfmpegEncoder::new(config.clone());
//! let runner = JobRunner::new(config, encoder);
//!
//! let request = ConversionRequest::new("/music/song.wav", "/music/out", AudioFormat::Mp3);
//! let (tx, mut rx) = tokio::sync::mpsc::channel(100);
//! let job_id = runner.start(request, tx).await?;
//!
//! // Monitor the job
//! while let Some(event) = rx.recv().await {
//!     match event {
//!         JobEvent::Progress { percent } => println!("{}%", percent),
//!         JobEvent::Log { line } => println!("{}", line),
//!         JobEvent::Finished { success, message } => println!("{}", message),
//!     }
//! }
//! ```

mod job_runner;
mod types;

pub use job_runner::JobRunner;
pub use types::RunnerStatus;
