use crate::error::{Error, Result};

/// Channel layout of a block of PCM samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    StereoInterleaved,
}

impl ChannelLayout {
    pub fn channels(&self) -> u16 {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::StereoInterleaved => 2,
        }
    }
}

/// One transfer block of signed 16-bit PCM samples, tagged with its layout.
///
/// A stereo block always holds an even sample count; the constructors
/// enforce it, so a block's byte length is a whole multiple of the sample
/// width times its channel count.
#[derive(Debug, Clone)]
pub struct AudioBlock {
    samples: Vec<i16>,
    layout: ChannelLayout,
}

impl AudioBlock {
    /// Wrap mono samples.
    pub fn mono(samples: Vec<i16>) -> Self {
        Self {
            samples,
            layout: ChannelLayout::Mono,
        }
    }

    /// Wrap stereo interleaved samples (`[L, R, L, R, ...]`).
    pub fn stereo(samples: Vec<i16>) -> Result<Self> {
        if samples.len() % 2 != 0 {
            return Err(Error::InvalidLayout(format!(
                "stereo block needs an even sample count, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            samples,
            layout: ChannelLayout::StereoInterleaved,
        })
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.layout.channels() as usize
    }

    /// Size of the block in bytes.
    pub fn byte_len(&self) -> usize {
        self.samples.len() * 2
    }

    /// Little-endian PCM bytes, ready for the store or a peripheral.
    pub fn to_pcm_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }
}
