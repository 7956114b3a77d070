//! Single-flight conversion job runner.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::convert::{
    ConversionRequest, ConvertError, Encoder, JobEvent, JobState, ProgressSource,
    SimulatedProgress,
};

use super::types::RunnerStatus;

/// Buffer size of the internal progress tick channel.
const TICK_BUFFER: usize = 8;

/// The job currently occupying the runner.
struct ActiveJob {
    job_id: String,
    started_at: DateTime<Utc>,
    cancel_tx: broadcast::Sender<()>,
}

/// State shared between the runner handle and its worker tasks.
struct Shared {
    active: Option<ActiveJob>,
    state: JobState,
}

/// Runs conversion jobs one at a time.
///
/// `start` validates the request, claims the runner slot and hands the job
/// to a background worker. Events for the job arrive on the channel the
/// caller passed in, ending with exactly one `JobEvent::Finished` after
/// which the channel closes.
pub struct JobRunner<E: Encoder> {
    config: EngineConfig,
    encoder: Arc<E>,
    progress: Arc<dyn ProgressSource>,
    shared: Arc<RwLock<Shared>>,
}

impl<E: Encoder + 'static> JobRunner<E> {
    /// Creates a runner around the given encoder.
    pub fn new(config: EngineConfig, encoder: E) -> Self {
        let tick = Duration::from_millis(config.progress_tick_ms);
        Self {
            config,
            encoder: Arc::new(encoder),
            progress: Arc::new(SimulatedProgress::new(tick)),
            shared: Arc::new(RwLock::new(Shared {
                active: None,
                state: JobState::Idle,
            })),
        }
    }

    /// Replaces the progress source.
    pub fn with_progress_source(mut self, progress: Arc<dyn ProgressSource>) -> Self {
        self.progress = progress;
        self
    }

    /// Starts a conversion job.
    ///
    /// Returns immediately with the job id; the conversion itself happens in
    /// the background. Fails fast with `InputNotFound` or `AlreadyRunning`
    /// without creating a job.
    pub async fn start(
        &self,
        request: ConversionRequest,
        events: mpsc::Sender<JobEvent>,
    ) -> Result<String, ConvertError> {
        let input_is_file = tokio::fs::metadata(&request.input_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !input_is_file {
            return Err(ConvertError::InputNotFound {
                path: request.input_path.clone(),
            });
        }

        // Claim the runner slot before spawning anything, so a concurrent
        // start cannot slip in between.
        let (job_id, cancel_rx) = {
            let mut shared = self.shared.write().await;
            if shared.active.is_some() {
                return Err(ConvertError::AlreadyRunning);
            }

            let job_id = Uuid::new_v4().to_string();
            let (cancel_tx, cancel_rx) = broadcast::channel(1);
            shared.active = Some(ActiveJob {
                job_id: job_id.clone(),
                started_at: Utc::now(),
                cancel_tx,
            });
            shared.state = JobState::Locating;
            (job_id, cancel_rx)
        };

        info!(
            "Starting conversion job {} for {}",
            job_id,
            request.input_path.display()
        );

        let encoder = Arc::clone(&self.encoder);
        let progress = Arc::clone(&self.progress);
        let shared = Arc::clone(&self.shared);
        let config = self.config.clone();
        let worker_job_id = job_id.clone();

        tokio::spawn(async move {
            Self::run_job(
                worker_job_id,
                request,
                encoder,
                progress,
                config,
                shared,
                cancel_rx,
                events,
            )
            .await;
        });

        Ok(job_id)
    }

    /// Requests cancellation of the active job.
    ///
    /// Returns `true` if a job was running and has been signalled. The job
    /// still reports its own `Finished` event.
    pub async fn cancel(&self) -> bool {
        let shared = self.shared.read().await;
        match &shared.active {
            Some(job) => {
                info!("Cancelling conversion job {}", job.job_id);
                // The worker drops its receiver once the job is over, so a
                // failed send means there is nothing left to cancel.
                job.cancel_tx.send(()).is_ok()
            }
            None => false,
        }
    }

    /// Returns a snapshot of the runner and its current job.
    pub async fn status(&self) -> RunnerStatus {
        let shared = self.shared.read().await;
        RunnerStatus {
            busy: shared.active.is_some(),
            job_id: shared.active.as_ref().map(|j| j.job_id.clone()),
            state: shared.state.clone(),
            started_at: shared.active.as_ref().map(|j| j.started_at),
        }
    }

    /// Drives one job to completion and reports its events.
    #[allow(clippy::too_many_arguments)]
    async fn run_job(
        job_id: String,
        request: ConversionRequest,
        encoder: Arc<E>,
        progress: Arc<dyn ProgressSource>,
        config: EngineConfig,
        shared: Arc<RwLock<Shared>>,
        cancel_rx: broadcast::Receiver<()>,
        events: mpsc::Sender<JobEvent>,
    ) {
        let _ = events
            .send(JobEvent::Log {
                line: format!(
                    "converting {} to {} at {}",
                    request.input_path.display(),
                    request.format,
                    request.bitrate
                ),
            })
            .await;

        let output_path = request.output_path();
        let result = Self::execute(
            &request,
            &output_path,
            encoder,
            progress,
            &config,
            &shared,
            cancel_rx,
            &events,
        )
        .await;

        // Free the runner slot before the terminal event goes out, so a
        // caller reacting to Finished can start the next job right away.
        {
            let mut shared = shared.write().await;
            shared.active = None;
            shared.state = match &result {
                Ok(()) => JobState::Succeeded {
                    output_path: output_path.clone(),
                },
                Err(e) => JobState::Failed {
                    reason: e.to_string(),
                },
            };
        }

        let finished = match result {
            Ok(()) => {
                info!(
                    "Conversion job {} succeeded: {}",
                    job_id,
                    output_path.display()
                );
                let _ = events.send(JobEvent::Progress { percent: 100 }).await;
                JobEvent::Finished {
                    success: true,
                    message: format!("conversion complete: {}", output_path.display()),
                }
            }
            Err(e) => {
                warn!("Conversion job {} failed: {}", job_id, e);
                JobEvent::Finished {
                    success: false,
                    message: e.to_string(),
                }
            }
        };
        let _ = events.send(finished).await;
    }

    /// Runs the conversion itself, from availability probe to encoder exit.
    #[allow(clippy::too_many_arguments)]
    async fn execute(
        request: &ConversionRequest,
        output_path: &Path,
        encoder: Arc<E>,
        progress: Arc<dyn ProgressSource>,
        config: &EngineConfig,
        shared: &Arc<RwLock<Shared>>,
        mut cancel_rx: broadcast::Receiver<()>,
        events: &mpsc::Sender<JobEvent>,
    ) -> Result<(), ConvertError> {
        if !encoder.is_available().await {
            return Err(ConvertError::EncoderNotFound {
                path: config.encoder_path.clone(),
            });
        }

        // A cancel that arrived during the probe still has to win.
        if cancel_rx.try_recv().is_ok() {
            return Err(ConvertError::Cancelled);
        }

        if let Err(e) = tokio::fs::create_dir_all(&request.output_dir).await {
            warn!(
                "Failed to create output directory {}: {}",
                request.output_dir.display(),
                e
            );
            return Err(ConvertError::OutputDirFailed {
                path: request.output_dir.clone(),
            });
        }

        {
            let mut shared = shared.write().await;
            shared.state = JobState::Running;
        }

        let (tick_tx, mut tick_rx) = mpsc::channel(TICK_BUFFER);
        let ticker = tokio::spawn(async move { progress.run(tick_tx).await });

        let mut encode = pin!(encoder.encode(request, output_path));
        let mut last_percent = 0u8;
        let mut ticks_done = false;
        let mut cancel_closed = false;

        let result = loop {
            tokio::select! {
                tick = tick_rx.recv(), if !ticks_done => {
                    match tick {
                        // Drop a late tick rather than let progress go backwards.
                        Some(percent) if percent >= last_percent => {
                            last_percent = percent;
                            let _ = events.try_send(JobEvent::Progress { percent });
                        }
                        Some(_) => {}
                        None => ticks_done = true,
                    }
                }
                cancelled = cancel_rx.recv(), if !cancel_closed => {
                    match cancelled {
                        // Lagged still means a cancel was sent.
                        Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                            break Err(ConvertError::Cancelled);
                        }
                        Err(broadcast::error::RecvError::Closed) => cancel_closed = true,
                    }
                }
                result = &mut encode => break result,
            }
        };

        // Dropping the encode future on cancellation kills the encoder
        // process; the ticker just has to stop talking.
        ticker.abort();
        result
    }
}
