use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Sequential backing medium for one recording: opened write-truncate for
/// capture, then reopened read-from-start for playback.
pub trait BackingMedium: Send {
    /// Truncate to empty and position for appending.
    fn open_write(&mut self) -> io::Result<()>;

    /// Append bytes; returns how many were accepted.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Push written bytes down to durable storage.
    fn flush(&mut self) -> io::Result<()>;

    /// Close the write stream and reopen for reading at offset 0.
    fn open_read(&mut self) -> io::Result<()>;

    /// Read up to `buf.len()` bytes; 0 means end of data.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// File-backed medium — the flash scratch file on target hardware.
pub struct FileMedium {
    path: PathBuf,
    file: Option<File>,
}

impl FileMedium {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
        }
    }

    fn not_open() -> io::Error {
        io::Error::new(io::ErrorKind::NotConnected, "medium not open")
    }
}

impl BackingMedium for FileMedium {
    fn open_write(&mut self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.file = Some(File::create(&self.path)?);
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.file {
            Some(f) => f.write(buf),
            None => Err(Self::not_open()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.file {
            Some(f) => f.sync_data(),
            None => Err(Self::not_open()),
        }
    }

    fn open_read(&mut self) -> io::Result<()> {
        // Drop the write handle before reopening the same path.
        self.file = None;
        self.file = Some(File::open(&self.path)?);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.file {
            Some(f) => f.read(buf),
            None => Err(Self::not_open()),
        }
    }
}
