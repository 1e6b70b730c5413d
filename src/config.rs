use anyhow::Result;
use serde::Deserialize;

use crate::peripherals::Level;

/// Top-level configuration, loaded from a TOML file. Every field has a
/// firmware default, so a sparse (or missing) file is fine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub button: ButtonConfig,
    pub storage: StorageConfig,
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Fixed peripheral sample clock in Hz.
    pub sample_rate: u32,
    /// Frames per transfer block (one stereo frame is two samples).
    pub block_frames: usize,
    /// Confirmation beep tone frequency.
    pub beep_hz: u32,
    /// Confirmation beep length.
    pub beep_ms: u64,
    /// Confirmation beep amplitude, 0.0 to 1.0.
    pub beep_amplitude: f32,
    /// Pause after the beep before the store switches to reading.
    pub beep_settle_ms: u64,
    /// Pause before playback starts draining the store.
    pub playback_lead_in_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            block_frames: 256,
            beep_hz: 1_000,
            beep_ms: 200,
            beep_amplitude: 0.5,
            beep_settle_ms: 100,
            playback_lead_in_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// How long a raw level must hold before a press/release commits.
    pub debounce_ms: u64,
    /// Idle polling cadence.
    pub poll_interval_ms: u64,
    /// Wired active-low (pull-up; pressed reads low).
    pub active_low: bool,
}

impl ButtonConfig {
    pub fn pressed_level(&self) -> Level {
        if self.active_low {
            Level::Low
        } else {
            Level::High
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            poll_interval_ms: 50,
            active_low: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Scratch file holding one recording at a time.
    pub scratch_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            scratch_path: "scratch/recording.raw".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub ssid: String,
    pub password: String,
    pub connect_timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ssid: "parrot-box".to_string(),
            password: String::new(),
            connect_timeout_ms: 10_000,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
