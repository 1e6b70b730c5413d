use super::stats::SessionStats;
use crate::audio::{sine_block, stereo_to_mono};
use crate::button::{ButtonDebouncer, Edge};
use crate::config::{AudioConfig, ButtonConfig};
use crate::peripherals::{DigitalInput, MicrophoneInput, SpeakerOutput};
use crate::store::SequentialStore;
use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Orchestrates one press-to-playback cycle at a time: idle polling, a
/// debounced press starting capture, immediate-release capture exit, the
/// confirmation beep, then playback of the stored audio.
///
/// The controller owns the store and the peripheral handles for its whole
/// lifetime, and everything runs on one cooperative loop, so the store and
/// the button state never see concurrent access.
pub struct RecordPlaybackController {
    audio: AudioConfig,
    button: ButtonConfig,
    store: SequentialStore,
    mic: Box<dyn MicrophoneInput>,
    speaker: Box<dyn SpeakerOutput>,
    button_line: Box<dyn DigitalInput>,
    debouncer: ButtonDebouncer,
}

impl RecordPlaybackController {
    pub fn new(
        audio: AudioConfig,
        button: ButtonConfig,
        store: SequentialStore,
        mic: Box<dyn MicrophoneInput>,
        speaker: Box<dyn SpeakerOutput>,
        button_line: Box<dyn DigitalInput>,
    ) -> Self {
        let debouncer = ButtonDebouncer::new(
            Duration::from_millis(button.debounce_ms),
            button.pressed_level(),
        );
        Self {
            audio,
            button,
            store,
            mic,
            speaker,
            button_line,
            debouncer,
        }
    }

    /// Run sessions forever.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let stats = self.run_session().await?;
            info!(
                "session {} finished: {} bytes captured, {} bytes played",
                stats.session_id, stats.captured_bytes, stats.played_bytes
            );
        }
    }

    /// Wait for a confirmed press, then run one full capture/playback
    /// session. Store failures degrade the session — partial or skipped
    /// playback — rather than failing it; only peripheral errors bubble up.
    pub async fn run_session(&mut self) -> Result<SessionStats> {
        self.wait_for_press().await;

        let mut stats = SessionStats::begin();

        self.store
            .reset()
            .context("could not reset the scratch store for a new recording")?;

        info!("recording...");
        self.capture(&mut stats).await?;
        info!("recording done ({} bytes)", stats.captured_bytes);

        self.speaker.enable().await?;
        self.speaker.set_mute(false).await?;
        self.play_beep().await?;
        sleep(Duration::from_millis(self.audio.beep_settle_ms)).await;

        if let Err(e) = self.store.seek_start_for_read() {
            error!("recording cannot be played back: {e}");
            stats.playback_skipped = true;
            self.silence_speaker().await?;
            return Ok(stats);
        }

        sleep(Duration::from_millis(self.audio.playback_lead_in_ms)).await;

        info!("playing...");
        self.playback(&mut stats).await?;
        info!("playback complete ({} bytes)", stats.played_bytes);

        self.silence_speaker().await?;
        Ok(stats)
    }

    /// Poll the raw line at the configured cadence until the debouncer
    /// commits a press. Released edges — e.g. the tail of the previous
    /// session — are consumed here and ignored.
    async fn wait_for_press(&mut self) {
        loop {
            let level = self.button_line.read_level();
            if let Some(Edge::Pressed) = self.debouncer.sample(level, Instant::now()) {
                return;
            }
            sleep(Duration::from_millis(self.button.poll_interval_ms)).await;
        }
    }

    /// Pull, downmix and append microphone blocks until the raw line reads
    /// released. Release is read raw, not debounced, so the recording
    /// stops on the physical release instead of a debounce window later.
    async fn capture(&mut self, stats: &mut SessionStats) -> Result<()> {
        loop {
            if self.button_line.read_level() != self.button.pressed_level() {
                return Ok(());
            }

            let block = self
                .mic
                .read_block(self.audio.block_frames)
                .await
                .context("microphone read failed")?;

            let mono = match stereo_to_mono(&block) {
                Ok(mono) => mono,
                Err(e) => {
                    warn!("stopping capture on malformed block: {e}");
                    stats.capture_truncated = true;
                    return Ok(());
                }
            };

            match self.store.write(&mono.to_pcm_bytes()) {
                Ok(n) => stats.captured_bytes += n,
                Err(e) => {
                    // Flash has no partial-write recovery; keep what is
                    // stored and stop appending for this session.
                    warn!("store write failed, keeping partial recording: {e}");
                    stats.capture_truncated = true;
                    return Ok(());
                }
            }
        }
    }

    /// Drain the store to the speaker in fixed-size reads until exhaustion.
    async fn playback(&mut self, stats: &mut SessionStats) -> Result<()> {
        let read_size = self.audio.block_frames * 2; // mono block, 16-bit
        loop {
            let (bytes, is_end) = match self.store.read(read_size) {
                Ok(r) => r,
                Err(e) => {
                    error!("store read failed, ending playback: {e}");
                    return Ok(());
                }
            };
            if is_end {
                return Ok(());
            }

            let written = self
                .speaker
                .write(&bytes)
                .await
                .context("speaker write failed")?;
            stats.played_bytes += written;
        }
    }

    async fn play_beep(&mut self) -> Result<()> {
        let beep = sine_block(
            self.audio.sample_rate,
            self.audio.beep_hz,
            self.audio.beep_ms,
            self.audio.beep_amplitude,
        );
        self.speaker
            .write(&beep.to_pcm_bytes())
            .await
            .context("speaker rejected the confirmation beep")?;
        Ok(())
    }

    /// Quiet the output path between sessions: power it down and hold the
    /// mute line asserted so the amplifier does not idle-hiss.
    async fn silence_speaker(&mut self) -> Result<()> {
        self.speaker.disable().await?;
        self.speaker.set_mute(true).await?;
        Ok(())
    }
}
