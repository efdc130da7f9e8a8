/// Image assembler

use crate::error::{IsoError, Result};
use crate::format::constants::*;
use crate::format::{DirectoryRecord, RecordName, VolumeDescriptor};
use crate::image::{BuildReport, FileEntry, SkippedInput};
use crate::io::SectorWriter;
use std::ffi::OsStr;
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;

/// Lays out an image on an output stream
///
/// Construction writes the fixed prefix of the image (reserved region,
/// volume descriptor, root directory). Files are then placed one after
/// another starting at [`FIRST_FILE_LBA`], each followed directly by its
/// own directory record. The record is not linked into the root sector.
pub struct ImageAssembler<W: Write + Seek> {
    writer: SectorWriter<W>,
    /// Next free sector
    cursor: u32,
    files: Vec<FileEntry>,
    skipped: Vec<SkippedInput>,
}

impl<W: Write + Seek> ImageAssembler<W> {
    /// Write the image prefix to `output` and return an assembler ready for files
    pub fn start(output: W, descriptor: &VolumeDescriptor) -> Result<Self> {
        let mut assembler = Self {
            writer: SectorWriter::new(output),
            cursor: 0,
            files: Vec::new(),
            skipped: Vec::new(),
        };

        assembler.write_reserved_region()?;
        assembler.write_descriptor(descriptor)?;
        assembler.write_root_directory()?;

        Ok(assembler)
    }

    /// Sectors 0-15, all zero
    fn write_reserved_region(&mut self) -> Result<()> {
        let empty = [0u8; SECTOR_SIZE];
        self.writer.write_at(0, &empty)?;
        for _ in 1..RESERVED_SECTORS {
            self.writer.append_raw(&empty)?;
        }
        log::info!("Empty sectors written");
        Ok(())
    }

    /// Descriptor directly after the reserved region; sector 17 stays unwritten
    fn write_descriptor(&mut self, descriptor: &VolumeDescriptor) -> Result<()> {
        self.writer.append_raw(&descriptor.encode())?;
        log::info!(
            "Volume descriptor written ({})",
            descriptor.timestamp().format("%Y-%m-%d %H:%M:%S UTC")
        );
        Ok(())
    }

    fn write_root_directory(&mut self) -> Result<()> {
        self.writer
            .write_at(ROOT_DIRECTORY_LBA, &DirectoryRecord::root_self().encode())?;
        self.writer.append_raw(&DirectoryRecord::root_parent().encode())?;
        self.cursor = FIRST_FILE_LBA;
        log::info!("Root directory initialized");
        Ok(())
    }

    /// Next free sector
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Files placed so far, in order
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Place one file at the cursor
    ///
    /// Per-file errors ([`IsoError::is_per_file`]) leave the assembler
    /// untouched: nothing is written and the cursor does not move. Any other
    /// error is a failure of the output stream.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&FileEntry> {
        let path = path.as_ref();

        let payload = fs::read(path).map_err(|source| IsoError::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let size = u32::try_from(payload.len()).map_err(|_| IsoError::FileTooLarge {
            path: path.to_path_buf(),
            size: payload.len() as u64,
        })?;
        let next = u32::try_from(sectors_for(size as u64))
            .ok()
            .and_then(|sectors| self.cursor.checked_add(sectors))
            .ok_or_else(|| IsoError::FileTooLarge {
                path: path.to_path_buf(),
                size: size as u64,
            })?;
        let name = display_name(path)?;

        let lba = self.cursor;
        self.writer.write_at(lba, &payload)?;
        drop(payload);

        let record = DirectoryRecord::new(name.clone(), lba, size);
        self.writer.append_raw(&record.encode())?;

        log::info!(
            "Added file: {} (Size: {:.2} MB)",
            name,
            size as f64 / (1024.0 * 1024.0)
        );
        log::debug!("{} placed at LBA {}, next free sector {}", name, lba, next);

        self.cursor = next;
        self.files.push(FileEntry {
            name,
            path: path.to_path_buf(),
            size,
            lba,
        });

        // Just pushed
        Ok(&self.files[self.files.len() - 1])
    }

    /// Place one file, skipping it on a per-file error
    ///
    /// Skipped inputs are logged and recorded in the final report.
    pub fn add_input<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        match self.add_file(path) {
            Ok(_) => Ok(()),
            Err(error) if error.is_per_file() => {
                log::warn!("{}; skipping", error);
                self.skipped.push(SkippedInput {
                    path: path.to_path_buf(),
                    error,
                });
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Flush the output and return it with the build report
    ///
    /// No terminator descriptor is written.
    pub fn finish(self) -> Result<(W, BuildReport)> {
        let output = self.writer.finish()?;
        let report = BuildReport {
            files: self.files,
            skipped: self.skipped,
            next_lba: self.cursor,
        };
        Ok((output, report))
    }
}

/// Record name for a path: its final component, or the whole path when it has none
fn display_name(path: &Path) -> Result<RecordName> {
    let name = path.file_name().unwrap_or(path.as_os_str());
    RecordName::new(name_bytes(name))
}

#[cfg(unix)]
fn name_bytes(name: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn name_bytes(name: &OsStr) -> Vec<u8> {
    name.to_string_lossy().into_owned().into_bytes()
}
