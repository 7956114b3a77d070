pub mod config;
pub mod convert;
pub mod runner;
pub mod testing;

pub use config::{load_config, load_config_from_str, ConfigError, EngineConfig};
pub use convert::{
    AudioFormat, Bitrate, ConversionRequest, ConvertError, Encoder, FfmpegEncoder, JobEvent,
    JobState,
};
pub use runner::{JobRunner, RunnerStatus};
