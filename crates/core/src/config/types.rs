use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the conversion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to the encoder binary.
    #[serde(default = "default_encoder_path")]
    pub encoder_path: PathBuf,

    /// Timeout for the encoder availability probe in seconds.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Milliseconds between simulated progress ticks.
    #[serde(default = "default_progress_tick")]
    pub progress_tick_ms: u64,
}

fn default_encoder_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_probe_timeout() -> u64 {
    5
}

fn default_progress_tick() -> u64 {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            encoder_path: default_encoder_path(),
            probe_timeout_secs: default_probe_timeout(),
            progress_tick_ms: default_progress_tick(),
        }
    }
}

impl EngineConfig {
    /// Sets the encoder binary path.
    pub fn with_encoder_path(mut self, encoder_path: PathBuf) -> Self {
        self.encoder_path = encoder_path;
        self
    }

    /// Sets the probe timeout in seconds.
    pub fn with_probe_timeout(mut self, probe_timeout_secs: u64) -> Self {
        self.probe_timeout_secs = probe_timeout_secs;
        self
    }

    /// Sets the progress tick interval in milliseconds.
    pub fn with_progress_tick(mut self, progress_tick_ms: u64) -> Self {
        self.progress_tick_ms = progress_tick_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.encoder_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.probe_timeout_secs, 5);
        assert_eq!(config.progress_tick_ms, 100);
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::default()
            .with_encoder_path(PathBuf::from("/usr/local/bin/ffmpeg"))
            .with_probe_timeout(2)
            .with_progress_tick(10);

        assert_eq!(config.encoder_path, PathBuf::from("/usr/local/bin/ffmpeg"));
        assert_eq!(config.probe_timeout_secs, 2);
        assert_eq!(config.progress_tick_ms, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.encoder_path, config.encoder_path);
        assert_eq!(parsed.progress_tick_ms, config.progress_tick_ms);
    }
}
