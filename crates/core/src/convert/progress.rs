//! Progress reporting for running conversions.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;

/// Percent step between consecutive simulated progress values.
const STEP: u8 = 5;

/// Source of progress percentages for a running conversion.
#[async_trait]
pub trait ProgressSource: Send + Sync {
    /// Emits progress percentages on `tx` until the run is complete or the
    /// receiver is dropped.
    async fn run(&self, tx: mpsc::Sender<u8>);
}

/// Progress source that walks from 0 to 100 on a fixed tick. The encoder's
/// own progress output is not parsed.
pub struct SimulatedProgress {
    tick: Duration,
}

impl SimulatedProgress {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }
}

impl Default for SimulatedProgress {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[async_trait]
impl ProgressSource for SimulatedProgress {
    async fn run(&self, tx: mpsc::Sender<u8>) {
        for percent in (0..=100).step_by(STEP as usize) {
            if tx.send(percent).await.is_err() {
                // Receiver is gone, the job has ended.
                return;
            }
            if percent < 100 {
                tokio::time::sleep(self.tick).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_progress_covers_zero_to_hundred() {
        let (tx, mut rx) = mpsc::channel(32);
        SimulatedProgress::new(Duration::ZERO).run(tx).await;

        let mut seen = Vec::new();
        while let Some(percent) = rx.recv().await {
            seen.push(percent);
        }

        assert_eq!(seen.len(), 21);
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_simulated_progress_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        SimulatedProgress::new(Duration::ZERO).run(tx).await;
    }
}
