//! Simulated peripherals for host-side runs and tests.

use super::{DigitalInput, Level, MicrophoneInput, NetworkAssociation, SpeakerOutput};
use crate::audio::AudioBlock;
use anyhow::Result;
use std::f32::consts::PI;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Microphone that synthesizes a stereo test signal in real time: a sine
/// tone on the left channel, silence on the right. Each `read_block` sleeps
/// for the block's wall-clock duration so sessions pace like the real
/// peripheral.
pub struct SimMicrophone {
    sample_rate: u32,
    tone_hz: u32,
    position: u64,
    delivered: Arc<AtomicUsize>,
}

impl SimMicrophone {
    pub fn new(sample_rate: u32, tone_hz: u32) -> Self {
        Self {
            sample_rate,
            tone_hz,
            position: 0,
            delivered: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of blocks delivered so far, shared so a scripted button can
    /// key its release off capture progress.
    pub fn delivered(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.delivered)
    }
}

#[async_trait::async_trait]
impl MicrophoneInput for SimMicrophone {
    async fn read_block(&mut self, frames: usize) -> Result<AudioBlock> {
        sleep(Duration::from_millis(
            frames as u64 * 1000 / self.sample_rate as u64,
        ))
        .await;

        let mut samples = Vec::with_capacity(frames * 2);
        for _ in 0..frames {
            let theta =
                2.0 * PI * self.tone_hz as f32 * self.position as f32 / self.sample_rate as f32;
            let left = (0.5 * i16::MAX as f32 * theta.sin()) as i16;
            samples.push(left);
            samples.push(0); // right channel carries nothing
            self.position += 1;
        }

        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(AudioBlock::stereo(samples)?)
    }
}

/// Speaker that appends everything written to a shared byte sink and tracks
/// the enable and mute lines.
pub struct SimSpeaker {
    sink: Arc<Mutex<Vec<u8>>>,
    enabled: Arc<AtomicBool>,
    muted: Arc<AtomicBool>,
}

impl SimSpeaker {
    pub fn new() -> Self {
        Self {
            sink: Arc::new(Mutex::new(Vec::new())),
            enabled: Arc::new(AtomicBool::new(false)),
            muted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Handle on the captured byte stream.
    pub fn sink(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.sink)
    }

    /// Handle on the output-path enable state.
    pub fn enabled_line(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.enabled)
    }

    /// Handle on the mute line state.
    pub fn mute_line(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.muted)
    }
}

impl Default for SimSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SpeakerOutput for SimSpeaker {
    async fn write(&mut self, pcm: &[u8]) -> Result<usize> {
        self.sink.lock().unwrap().extend_from_slice(pcm);
        Ok(pcm.len())
    }

    async fn enable(&mut self) -> Result<()> {
        self.enabled.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disable(&mut self) -> Result<()> {
        self.enabled.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn set_mute(&mut self, muted: bool) -> Result<()> {
        self.muted.store(muted, Ordering::SeqCst);
        Ok(())
    }
}

/// Button that reads as pressed until a shared block counter reaches a
/// target, then releases. Keying the hold off microphone progress makes a
/// session's captured byte count deterministic.
pub struct SimButton {
    delivered: Arc<AtomicUsize>,
    release_after_blocks: usize,
    pressed_level: Level,
}

impl SimButton {
    pub fn pressed_until_blocks(
        delivered: Arc<AtomicUsize>,
        release_after_blocks: usize,
        pressed_level: Level,
    ) -> Self {
        Self {
            delivered,
            release_after_blocks,
            pressed_level,
        }
    }
}

impl DigitalInput for SimButton {
    fn read_level(&mut self) -> Level {
        if self.delivered.load(Ordering::SeqCst) < self.release_after_blocks {
            self.pressed_level
        } else {
            self.pressed_level.inverted()
        }
    }
}

/// Network association that joins after a short delay; stands in for the
/// Wi-Fi supplicant on host builds.
pub struct SimNetwork;

impl SimNetwork {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NetworkAssociation for SimNetwork {
    async fn connect(&mut self, ssid: &str, _password: &str, _timeout: Duration) -> Result<()> {
        sleep(Duration::from_millis(20)).await;
        info!("associated with '{}'", ssid);
        Ok(())
    }
}
