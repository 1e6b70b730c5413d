pub mod sim;

use crate::audio::AudioBlock;
use anyhow::Result;
use std::time::Duration;

pub use sim::{SimButton, SimMicrophone, SimNetwork, SimSpeaker};

/// Logic level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn inverted(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Stereo microphone source.
///
/// `read_block` blocks until one full interleaved 16-bit block is
/// available. The fixed sample clock bounds the wait in practice; a stalled
/// device is a system fault handled outside this crate.
#[async_trait::async_trait]
pub trait MicrophoneInput: Send {
    async fn read_block(&mut self, frames: usize) -> Result<AudioBlock>;
}

/// Speaker sink with an output-path enable and a hardware mute line.
#[async_trait::async_trait]
pub trait SpeakerOutput: Send {
    /// Blocks until the device accepted the bytes; returns how many.
    async fn write(&mut self, pcm: &[u8]) -> Result<usize>;

    /// Power the output path up.
    async fn enable(&mut self) -> Result<()>;

    /// Power the output path down.
    async fn disable(&mut self) -> Result<()>;

    /// Drive the hardware mute line.
    async fn set_mute(&mut self, muted: bool) -> Result<()>;
}

/// A single digital input line (the push-button GPIO).
pub trait DigitalInput: Send {
    fn read_level(&mut self) -> Level;
}

/// Startup network association, invoked once at boot. Failure is fatal to
/// startup; the record/playback loop never runs without it.
#[async_trait::async_trait]
pub trait NetworkAssociation: Send {
    async fn connect(&mut self, ssid: &str, password: &str, timeout: Duration) -> Result<()>;
}
