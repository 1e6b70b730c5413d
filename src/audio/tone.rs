use super::block::AudioBlock;
use std::f32::consts::PI;

/// Synthesize a mono sine block, used for the confirmation beep between
/// recording and playback.
pub fn sine_block(sample_rate: u32, freq_hz: u32, duration_ms: u64, amplitude: f32) -> AudioBlock {
    let count = (sample_rate as u64 * duration_ms / 1000) as usize;
    let mut samples = Vec::with_capacity(count);

    for i in 0..count {
        let theta = 2.0 * PI * freq_hz as f32 * i as f32 / sample_rate as f32;
        samples.push((amplitude * i16::MAX as f32 * theta.sin()) as i16);
    }

    AudioBlock::mono(samples)
}
