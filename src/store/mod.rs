pub mod medium;

pub use medium::{BackingMedium, FileMedium};

use crate::error::{Error, Result};
use tracing::debug;

/// Phase of the store's single-writer-then-single-reader cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Uninitialized,
    Writing,
    Reading,
}

impl StoreMode {
    fn name(self) -> &'static str {
        match self {
            StoreMode::Uninitialized => "uninitialized",
            StoreMode::Writing => "writing",
            StoreMode::Reading => "reading",
        }
    }
}

/// Append-then-drain buffer over a single backing medium.
///
/// One recording lives in the store at a time: `reset()` truncates and
/// enters the writing phase, `seek_start_for_read()` flips to the reading
/// phase at offset 0, and the next `reset()` starts the cycle over. The
/// mode is checked on every operation. Writes flush to the medium
/// immediately, so a just-captured recording survives a power cut.
pub struct SequentialStore {
    medium: Box<dyn BackingMedium>,
    mode: StoreMode,
    bytes_written: u64,
}

impl SequentialStore {
    pub fn new(medium: Box<dyn BackingMedium>) -> Self {
        Self {
            medium,
            mode: StoreMode::Uninitialized,
            bytes_written: 0,
        }
    }

    pub fn mode(&self) -> StoreMode {
        self.mode
    }

    /// Bytes accepted since the last `reset()`.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Truncate the medium and enter the writing phase. Valid from any
    /// phase; calling it twice is the same as calling it once.
    pub fn reset(&mut self) -> Result<()> {
        self.medium
            .open_write()
            .map_err(|e| Error::StoreTransition(format!("reset failed: {e}")))?;
        self.mode = StoreMode::Writing;
        self.bytes_written = 0;
        debug!("store reset");
        Ok(())
    }

    /// Append a block's bytes. A rejected or short write fails the call;
    /// the medium has no partial-write recovery, so callers must not retry
    /// the same bytes.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if self.mode != StoreMode::Writing {
            return Err(Error::InvalidStoreState {
                op: "write",
                mode: self.mode.name(),
            });
        }

        let n = self
            .medium
            .write(buf)
            .map_err(|e| Error::StoreWrite(e.to_string()))?;
        if n < buf.len() {
            return Err(Error::StoreWrite(format!(
                "short write: {n} of {} bytes",
                buf.len()
            )));
        }
        self.medium
            .flush()
            .map_err(|e| Error::StoreWrite(format!("flush failed: {e}")))?;

        self.bytes_written += n as u64;
        Ok(n)
    }

    /// Finalize the write stream and reopen the medium for sequential
    /// reading from offset 0. Only valid from the writing phase (a phase
    /// with zero writes is fine — the recording is just empty).
    pub fn seek_start_for_read(&mut self) -> Result<()> {
        if self.mode != StoreMode::Writing {
            return Err(Error::StoreTransition(format!(
                "cannot switch to reading from {} mode",
                self.mode.name()
            )));
        }
        self.medium
            .open_read()
            .map_err(|e| Error::StoreTransition(format!("reopen for read failed: {e}")))?;
        self.mode = StoreMode::Reading;
        Ok(())
    }

    /// Read up to `max_size` bytes in write order. Zero bytes with
    /// `is_end = true` signals exhaustion, not an error.
    pub fn read(&mut self, max_size: usize) -> Result<(Vec<u8>, bool)> {
        if self.mode != StoreMode::Reading {
            return Err(Error::InvalidStoreState {
                op: "read",
                mode: self.mode.name(),
            });
        }

        let mut buf = vec![0u8; max_size];
        let n = self
            .medium
            .read(&mut buf)
            .map_err(|e| Error::StoreRead(e.to_string()))?;
        buf.truncate(n);
        Ok((buf, n == 0))
    }
}
