/// Image reader for verifying produced layouts

use crate::error::{IsoError, Result};
use crate::format::constants::*;
use crate::format::{DirectoryRecord, VolumeDescriptor};
use crate::image::FileEntry;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Root directory contents: the self and parent entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRecords {
    /// Self entry
    pub self_entry: DirectoryRecord,
    /// Parent entry
    pub parent_entry: DirectoryRecord,
}

/// Read the volume descriptor of an image file
pub fn read_descriptor<P: AsRef<Path>>(path: P) -> Result<VolumeDescriptor> {
    let mut file = File::open(path)?;
    read_descriptor_from(&mut file)
}

/// Read the volume descriptor from an open image
pub fn read_descriptor_from<R: Read + Seek>(reader: &mut R) -> Result<VolumeDescriptor> {
    let mut sector = vec![0u8; SECTOR_SIZE];
    reader.seek(SeekFrom::Start(sector_offset(DESCRIPTOR_LBA)))?;
    reader.read_exact(&mut sector)?;
    VolumeDescriptor::decode(&sector)
}

/// Read the two root directory records of an image file
pub fn read_root_records<P: AsRef<Path>>(path: P) -> Result<RootRecords> {
    let mut file = File::open(path)?;
    read_root_records_from(&mut file)
}

/// Read the two root directory records from an open image
pub fn read_root_records_from<R: Read + Seek>(reader: &mut R) -> Result<RootRecords> {
    let root_offset = sector_offset(ROOT_DIRECTORY_LBA);
    let self_entry = read_record_at(reader, root_offset)?;
    let parent_entry = read_record_at(reader, root_offset + self_entry.encoded_len() as u64)?;

    if !self_entry.name.is_special() || !parent_entry.name.is_special() {
        return Err(IsoError::invalid_format(
            "Root directory does not start with self and parent entries",
        ));
    }

    Ok(RootRecords {
        self_entry,
        parent_entry,
    })
}

/// Read the directory record stored right after a file's payload
pub fn read_record_after<P: AsRef<Path>>(path: P, entry: &FileEntry) -> Result<DirectoryRecord> {
    let mut file = File::open(path)?;
    read_file_record(&mut file, entry.lba, entry.size)
}

/// Read the directory record that follows a payload of `size` bytes at `lba`
pub fn read_file_record<R: Read + Seek>(
    reader: &mut R,
    lba: u32,
    size: u32,
) -> Result<DirectoryRecord> {
    read_record_at(reader, sector_offset(lba) + size as u64)
}

/// Read one directory record at an absolute byte offset
pub fn read_record_at<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<DirectoryRecord> {
    reader.seek(SeekFrom::Start(offset))?;

    let mut header = [0u8; RECORD_HEADER_LEN];
    reader.read_exact(&mut header).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => {
            IsoError::parse(offset as usize, "No directory record at offset")
        }
        _ => IsoError::Io(e),
    })?;

    let mut record = header.to_vec();
    record.resize(RECORD_HEADER_LEN + header[RECORD_NAME_LEN_OFFSET] as usize, 0);
    reader.read_exact(&mut record[RECORD_HEADER_LEN..])?;

    DirectoryRecord::parse(&record)
}
