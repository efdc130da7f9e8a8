/// Image assembly

/// Image assembler driving the sector layout
pub mod assembler;
/// Image builder for configuring a build
pub mod builder;

pub use assembler::ImageAssembler;
pub use builder::ImageBuilder;

use crate::error::IsoError;
use crate::format::constants::sectors_for;
use crate::format::RecordName;
use std::path::PathBuf;

/// A file placed in the image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Name stored in the file's directory record
    pub name: RecordName,
    /// Input path the payload was read from
    pub path: PathBuf,
    /// Payload length in bytes
    pub size: u32,
    /// First sector of the payload
    pub lba: u32,
}

impl FileEntry {
    /// Number of sectors the payload occupies
    pub fn sector_count(&self) -> u32 {
        // At most u32::MAX / 2048 rounded up
        sectors_for(self.size as u64) as u32
    }
}

/// An input that was left out of the image
#[derive(Debug)]
pub struct SkippedInput {
    /// Input path as given
    pub path: PathBuf,
    /// Why it was skipped
    pub error: IsoError,
}

/// Outcome of a build
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Placed files, in input order
    pub files: Vec<FileEntry>,
    /// Skipped inputs, in input order
    pub skipped: Vec<SkippedInput>,
    /// Sector following the last placed payload
    pub next_lba: u32,
}

impl BuildReport {
    /// Look up a placed file by its record name
    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.name.as_bytes() == name.as_bytes())
    }

    /// Total payload bytes placed
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size as u64).sum()
    }

    /// Were any inputs skipped?
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
