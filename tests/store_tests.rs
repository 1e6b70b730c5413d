// Round-trip and state machine tests for the sequential store.

use anyhow::Result;
use parrot_box::error::Error;
use parrot_box::store::{BackingMedium, FileMedium, SequentialStore, StoreMode};
use std::io;
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> SequentialStore {
    let path = dir.path().join("recording.raw");
    SequentialStore::new(Box::new(FileMedium::new(path)))
}

fn drain(store: &mut SequentialStore, read_size: usize) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        let (bytes, is_end) = store.read(read_size)?;
        if is_end {
            return Ok(out);
        }
        out.extend_from_slice(&bytes);
    }
}

#[test]
fn test_round_trip_preserves_bytes_in_order() -> Result<()> {
    let dir = TempDir::new()?;
    let mut store = file_store(&dir);

    store.reset()?;
    let chunks: Vec<Vec<u8>> = (0u8..5).map(|i| vec![i; 64 + i as usize]).collect();
    for chunk in &chunks {
        assert_eq!(store.write(chunk)?, chunk.len());
    }
    assert_eq!(store.bytes_written() as usize, chunks.concat().len());

    store.seek_start_for_read()?;

    // Read size deliberately not a divisor of the content length.
    let drained = drain(&mut store, 50)?;
    assert_eq!(drained, chunks.concat());
    Ok(())
}

#[test]
fn test_empty_store_plays_back_zero_bytes() -> Result<()> {
    let dir = TempDir::new()?;
    let mut store = file_store(&dir);

    store.reset()?;
    store.seek_start_for_read()?;

    let (bytes, is_end) = store.read(128)?;
    assert!(bytes.is_empty());
    assert!(is_end);
    Ok(())
}

#[test]
fn test_reset_is_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    let mut store = file_store(&dir);

    store.reset()?;
    store.write(&[7; 32])?;
    store.reset()?;
    store.reset()?;

    assert_eq!(store.mode(), StoreMode::Writing);
    assert_eq!(store.bytes_written(), 0);

    store.seek_start_for_read()?;
    let (bytes, is_end) = store.read(128)?;
    assert!(bytes.is_empty());
    assert!(is_end);
    Ok(())
}

#[test]
fn test_reset_discards_the_previous_recording() -> Result<()> {
    let dir = TempDir::new()?;
    let mut store = file_store(&dir);

    store.reset()?;
    store.write(b"first recording")?;
    store.seek_start_for_read()?;
    drain(&mut store, 64)?;

    // Next cycle starts clean.
    store.reset()?;
    store.write(b"second")?;
    store.seek_start_for_read()?;
    assert_eq!(drain(&mut store, 64)?, b"second");
    Ok(())
}

#[test]
fn test_write_outside_writing_mode_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let mut store = file_store(&dir);

    let err = store.write(&[0; 4]).unwrap_err();
    assert!(matches!(err, Error::InvalidStoreState { op: "write", .. }));

    store.reset()?;
    store.seek_start_for_read()?;
    let err = store.write(&[0; 4]).unwrap_err();
    assert!(matches!(err, Error::InvalidStoreState { op: "write", .. }));
    Ok(())
}

#[test]
fn test_read_outside_reading_mode_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let mut store = file_store(&dir);

    let err = store.read(16).unwrap_err();
    assert!(matches!(err, Error::InvalidStoreState { op: "read", .. }));

    store.reset()?;
    let err = store.read(16).unwrap_err();
    assert!(matches!(err, Error::InvalidStoreState { op: "read", .. }));
    Ok(())
}

#[test]
fn test_seek_requires_a_write_phase() -> Result<()> {
    let dir = TempDir::new()?;
    let mut store = file_store(&dir);

    let err = store.seek_start_for_read().unwrap_err();
    assert!(matches!(err, Error::StoreTransition(_)));

    store.reset()?;
    store.seek_start_for_read()?;
    let err = store.seek_start_for_read().unwrap_err();
    assert!(matches!(err, Error::StoreTransition(_)));
    Ok(())
}

/// In-memory medium that starts rejecting writes after a fixed number of
/// accepted ones.
struct FlakyMedium {
    data: Vec<u8>,
    read_pos: usize,
    writes_before_failure: usize,
    writes: usize,
}

impl FlakyMedium {
    fn new(writes_before_failure: usize) -> Self {
        Self {
            data: Vec::new(),
            read_pos: 0,
            writes_before_failure,
            writes: 0,
        }
    }
}

impl BackingMedium for FlakyMedium {
    fn open_write(&mut self) -> io::Result<()> {
        self.data.clear();
        self.writes = 0;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.writes >= self.writes_before_failure {
            return Err(io::Error::new(io::ErrorKind::Other, "medium full"));
        }
        self.writes += 1;
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn open_read(&mut self) -> io::Result<()> {
        self.read_pos = 0;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.data.len() - self.read_pos);
        buf[..n].copy_from_slice(&self.data[self.read_pos..self.read_pos + n]);
        self.read_pos += n;
        Ok(n)
    }
}

/// Medium that accepts fewer bytes than asked for on every write.
struct ShortWriteMedium;

impl BackingMedium for ShortWriteMedium {
    fn open_write(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len() / 2)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn open_read(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}

#[test]
fn test_failed_write_keeps_prior_content() -> Result<()> {
    let mut store = SequentialStore::new(Box::new(FlakyMedium::new(2)));

    store.reset()?;
    store.write(&[1; 8])?;
    store.write(&[2; 8])?;
    let err = store.write(&[3; 8]).unwrap_err();
    assert!(matches!(err, Error::StoreWrite(_)));
    assert_eq!(store.bytes_written(), 16);

    store.seek_start_for_read()?;
    let drained = drain(&mut store, 64)?;
    assert_eq!(drained, [[1u8; 8].as_slice(), [2u8; 8].as_slice()].concat());
    Ok(())
}

#[test]
fn test_short_write_is_an_error() -> Result<()> {
    let mut store = SequentialStore::new(Box::new(ShortWriteMedium));

    store.reset()?;
    let err = store.write(&[0; 16]).unwrap_err();
    assert!(matches!(err, Error::StoreWrite(_)));
    Ok(())
}
