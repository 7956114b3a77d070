//! Types for the convert module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Output audio format selectable for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// MPEG Audio Layer III
    Mp3,
    /// WAVE (uncompressed)
    Wav,
    /// Advanced Audio Coding
    Aac,
    /// Ogg Vorbis
    Ogg,
    /// Free Lossless Audio Codec
    Flac,
}

impl AudioFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Aac => "aac",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
        }
    }

    /// Returns the encoder codec name for this format, if one has to be
    /// selected explicitly. WAV and FLAC use the container default.
    pub fn codec(&self) -> Option<&'static str> {
        match self {
            Self::Mp3 => Some("libmp3lame"),
            Self::Aac => Some("aac"),
            Self::Ogg => Some("libvorbis"),
            Self::Wav | Self::Flac => None,
        }
    }

    /// All selectable formats, in presentation order.
    pub fn all() -> [AudioFormat; 5] {
        [Self::Mp3, Self::Wav, Self::Aac, Self::Ogg, Self::Flac]
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for AudioFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            "aac" => Ok(Self::Aac),
            "ogg" => Ok(Self::Ogg),
            "flac" => Ok(Self::Flac),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

/// Error produced when parsing an unknown format name.
#[derive(Debug, Clone, Error)]
#[error("unknown output format: {0} (expected mp3, wav, aac, ogg or flac)")]
pub struct ParseFormatError(String);

/// Target bitrate in kbit/s.
///
/// Parsing is permissive: empty, non-numeric and non-positive input all
/// fall back to the 192 kbit/s default instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bitrate(u32);

impl Bitrate {
    /// Bitrate applied when none (or garbage) is configured.
    pub const DEFAULT_KBPS: u32 = 192;

    /// Creates a bitrate from a kbit/s value; zero falls back to the default.
    pub fn from_kbps(kbps: u32) -> Self {
        if kbps == 0 {
            Self::default()
        } else {
            Self(kbps)
        }
    }

    /// Parses raw user input, substituting the default for anything that is
    /// not a positive integer.
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<u32>()
            .ok()
            .filter(|kbps| *kbps > 0)
            .map(Self)
            .unwrap_or_default()
    }

    /// The value in kbit/s.
    pub fn kbps(&self) -> u32 {
        self.0
    }

    /// The value formatted as an encoder bitrate argument, e.g. `192k`.
    pub fn as_arg(&self) -> String {
        format!("{}k", self.0)
    }
}

impl Default for Bitrate {
    fn default() -> Self {
        Self(Self::DEFAULT_KBPS)
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kbit/s", self.0)
    }
}

/// A request to convert one audio file.
///
/// Immutable once a job has been started from it.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Path to the input audio file. Must reference an existing regular file.
    pub input_path: PathBuf,
    /// Directory the converted file is written into. Created if missing.
    pub output_dir: PathBuf,
    /// Target output format.
    pub format: AudioFormat,
    /// Target bitrate.
    pub bitrate: Bitrate,
}

impl ConversionRequest {
    /// Creates a request with the default bitrate.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        format: AudioFormat,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            format,
            bitrate: Bitrate::default(),
        }
    }

    /// Sets the bitrate.
    pub fn with_bitrate(mut self, bitrate: Bitrate) -> Self {
        self.bitrate = bitrate;
        self
    }

    /// Sets the bitrate from raw user input, with the permissive fallback.
    pub fn with_bitrate_str(self, raw: &str) -> Self {
        self.with_bitrate(Bitrate::parse(raw))
    }

    /// The path the converted file is written to:
    /// `<output_dir>/<input stem>_converted.<format extension>`.
    pub fn output_path(&self) -> PathBuf {
        let stem = self
            .input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        self.output_dir
            .join(format!("{}_converted.{}", stem, self.format.extension()))
    }
}

/// Lifecycle state of a conversion job.
///
/// Transitions are one-directional: Idle → Locating → Running →
/// Succeeded/Failed. Terminal states are left only by starting a fresh job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    /// No job has run yet.
    Idle,
    /// Probing for the encoder binary.
    Locating,
    /// Encoder child process is running.
    Running,
    /// The conversion finished and the output file is at the given path.
    Succeeded { output_path: PathBuf },
    /// The conversion failed with a human-readable reason.
    Failed { reason: String },
}

impl JobState {
    /// Whether the job holds the single conversion slot.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Locating | Self::Running)
    }

    /// Whether the state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }
}

/// Event delivered to the caller over a job's event channel.
///
/// Per job the stream is zero or more `Log`/`Progress` events (progress
/// percentages non-decreasing), then exactly one `Finished`, after which
/// the channel closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum JobEvent {
    /// Simulated progress, percent in 0..=100.
    Progress { percent: u8 },
    /// Human-readable log line for display.
    Log { line: String },
    /// Terminal event. `message` carries the output location on success and
    /// the failure reason otherwise.
    Finished { success: bool, message: String },
}
