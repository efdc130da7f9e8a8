/// Sector-addressed output stream

use crate::error::Result;
use crate::format::constants::sector_offset;
use std::io::{Seek, SeekFrom, Write};

/// Writes raw bytes to an output stream addressed by sector index
///
/// Writes are never padded to a sector boundary; callers that need
/// sector-aligned placement size their buffers themselves.
pub struct SectorWriter<W: Write + Seek> {
    inner: W,
}

impl<W: Write + Seek> SectorWriter<W> {
    /// Wrap an output stream
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Seek to the start of sector `lba` and write `bytes` there
    pub fn write_at(&mut self, lba: u32, bytes: &[u8]) -> Result<()> {
        let offset = sector_offset(lba);
        log::debug!("Writing {} bytes at sector {} (offset {})", bytes.len(), lba, offset);

        self.inner.seek(SeekFrom::Start(offset))?;
        self.inner.write_all(bytes)?;
        Ok(())
    }

    /// Write `bytes` at the current stream position
    pub fn append_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        Ok(())
    }

    /// Current byte position of the stream
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Flush and return the underlying stream
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
