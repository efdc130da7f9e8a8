/*!
# isomake

A Rust library for assembling minimal sector-addressed disc images modeled on
the CD001 layout.

## Features

- 2048-byte sector layout with a zeroed reserved region
- Volume descriptor carrying a UTC creation timestamp
- Flat root directory with self and parent entries
- Sequential file placement with a directory record after each payload
- Reader helpers for verifying produced images

## Quick Start

```rust,no_run
use isomake::{ImageBuilder, io};

// Build an image from two files
let report = isomake::build("out.iso", ["a.txt", "b.bin"])?;
for file in &report.files {
    println!("{} at LBA {} ({} bytes)", file.name, file.lba, file.size);
}

// Or configure the build explicitly
let report = ImageBuilder::new()
    .input("boot.cfg")
    .inputs(["kernel.bin", "initrd.img"])
    .build("system.iso")?;

// Inspect the result
let descriptor = io::read_descriptor("system.iso")?;
let root = io::read_root_records("system.iso")?;
println!("Created {}, root at LBA {}", descriptor.timestamp(), root.self_entry.extent_lba);
# Ok::<(), isomake::IsoError>(())
```

## Image Layout

| Region | Sector(s) | Contents |
|---|---|---|
| Reserved | 0-15 | all zero |
| Volume descriptor | 16 | type 1, `CD001`, version 1, timestamp at offset 190 |
| (unused) | 17 | not written |
| Root directory | 18 | self entry, parent entry |
| Files | 19, ... | payload followed immediately by its directory record |

Directory records of files are stored after their payloads rather than in the
root directory sector, and no terminator descriptor is written, so the result
is not readable as a standard ISO 9660 filesystem.

## Modules

- `format`: layout constants, descriptor and directory record encoders
- `image`: image assembler and builder
- `io`: sector writer and image reader
- `error`: Error types and Result alias
*/

#![warn(missing_docs)]

/// Error types and Result alias
pub mod error;
/// Layout constants and encoders
pub mod format;
/// Image assembly
pub mod image;
/// I/O operations for writing and reading images
pub mod io;

// Re-export common types
pub use error::{IsoError, Result};
pub use format::{DirectoryRecord, RecordName, VolumeDescriptor};
pub use image::{BuildReport, FileEntry, ImageAssembler, ImageBuilder, SkippedInput};
pub use io::{RootRecords, SectorWriter};

use std::path::{Path, PathBuf};

/// Build an image at `output` from `inputs`, in order
///
/// Inputs that cannot be read are skipped and listed in the report. Fails
/// without touching `output` when `inputs` is empty.
pub fn build<P, I, Q>(output: P, inputs: I) -> Result<BuildReport>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Q>,
    Q: Into<PathBuf>,
{
    ImageBuilder::new().inputs(inputs).build(output)
}
