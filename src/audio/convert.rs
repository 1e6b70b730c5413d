use super::block::{AudioBlock, ChannelLayout};
use crate::error::{Error, Result};

/// Downmix a stereo interleaved block to mono by keeping the left channel.
///
/// Output sample `i` equals input sample `2i`; the right channel is
/// discarded outright. This is a fixed channel-selection policy, not a mix.
pub fn stereo_to_mono(block: &AudioBlock) -> Result<AudioBlock> {
    if block.layout() != ChannelLayout::StereoInterleaved {
        return Err(Error::InvalidLayout(
            "expected a stereo interleaved block".to_string(),
        ));
    }
    if block.samples().len() % 2 != 0 {
        return Err(Error::InvalidLayout(format!(
            "interleaved stereo needs an even sample count, got {}",
            block.samples().len()
        )));
    }

    let mono: Vec<i16> = block.samples().chunks_exact(2).map(|lr| lr[0]).collect();
    Ok(AudioBlock::mono(mono))
}
