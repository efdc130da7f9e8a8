//! Directory record encoding
//!
//! A record is a 33-byte fixed header followed by the raw name bytes:
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 1 | record length (33 + name length) |
//! | 1 | 1 | zero |
//! | 2 | 4 | extent LBA, little-endian |
//! | 10 | 4 | data length, little-endian |
//! | 32 | 1 | name length |
//! | 33 | n | name |
//!
//! All other header bytes are zero and no alignment padding follows the name.

use crate::error::{IsoError, Result};
use crate::format::constants::*;
use std::fmt;

/// Name stored in a directory record
///
/// Owned bytes, checked against the capacity of the record length field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordName(Vec<u8>);

impl RecordName {
    /// Create a name, rejecting empty names and names that overflow the record
    pub fn new<B: Into<Vec<u8>>>(bytes: B) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(IsoError::invalid_arguments("Record name must not be empty"));
        }
        if bytes.len() > MAX_NAME_LEN {
            return Err(IsoError::NameTooLong {
                name: String::from_utf8_lossy(&bytes).into_owned(),
                len: bytes.len(),
                max: MAX_NAME_LEN,
            });
        }
        Ok(Self(bytes))
    }

    /// The root's self entry name (a single 0x00 byte)
    pub fn self_entry() -> Self {
        Self(SELF_NAME.to_vec())
    }

    /// The root's parent entry name (a single 0x01 byte)
    pub fn parent_entry() -> Self {
        Self(PARENT_NAME.to_vec())
    }

    /// Raw name bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Name length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the name holds no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Is this one of the root's special entries?
    pub fn is_special(&self) -> bool {
        self.0 == SELF_NAME || self.0 == PARENT_NAME
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == SELF_NAME {
            write!(f, ".")
        } else if self.0 == PARENT_NAME {
            write!(f, "..")
        } else {
            write!(f, "{}", String::from_utf8_lossy(&self.0))
        }
    }
}

/// Directory record describing one extent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    /// Entry name
    pub name: RecordName,
    /// First sector of the extent
    pub extent_lba: u32,
    /// Length of the extent's data in bytes
    pub data_length: u32,
}

impl DirectoryRecord {
    /// Create a record
    pub fn new(name: RecordName, extent_lba: u32, data_length: u32) -> Self {
        Self {
            name,
            extent_lba,
            data_length,
        }
    }

    /// The root's self entry
    pub fn root_self() -> Self {
        Self::new(RecordName::self_entry(), ROOT_DIRECTORY_LBA, ROOT_DIRECTORY_SIZE)
    }

    /// The root's parent entry
    ///
    /// The namespace is flat, so the parent is the root itself.
    pub fn root_parent() -> Self {
        Self::new(RecordName::parent_entry(), ROOT_DIRECTORY_LBA, ROOT_DIRECTORY_SIZE)
    }

    /// Encoded length in bytes
    pub fn encoded_len(&self) -> usize {
        RECORD_HEADER_LEN + self.name.len()
    }

    /// Encode the record
    pub fn encode(&self) -> Vec<u8> {
        let mut record = vec![0u8; self.encoded_len()];

        // RecordName guarantees this fits in a byte
        record[0] = self.encoded_len() as u8;
        record[RECORD_EXTENT_OFFSET..RECORD_EXTENT_OFFSET + 4]
            .copy_from_slice(&self.extent_lba.to_le_bytes());
        record[RECORD_SIZE_OFFSET..RECORD_SIZE_OFFSET + 4]
            .copy_from_slice(&self.data_length.to_le_bytes());
        record[RECORD_NAME_LEN_OFFSET] = self.name.len() as u8;
        record[RECORD_HEADER_LEN..].copy_from_slice(self.name.as_bytes());

        record
    }

    /// Parse a record from the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < RECORD_HEADER_LEN {
            return Err(IsoError::parse(
                0,
                format!("Directory record truncated: {} bytes", data.len()),
            ));
        }

        let length = data[0] as usize;
        let name_len = data[RECORD_NAME_LEN_OFFSET] as usize;
        if length != RECORD_HEADER_LEN + name_len {
            return Err(IsoError::parse(
                0,
                format!("Record length {} does not match name length {}", length, name_len),
            ));
        }
        if name_len == 0 {
            return Err(IsoError::parse(RECORD_NAME_LEN_OFFSET, "Record name is empty"));
        }
        if data.len() < length {
            return Err(IsoError::parse(
                RECORD_HEADER_LEN,
                format!("Record name truncated: need {} bytes, have {}", length, data.len()),
            ));
        }

        let extent_lba = read_u32_le(data, RECORD_EXTENT_OFFSET);
        let data_length = read_u32_le(data, RECORD_SIZE_OFFSET);
        let name = RecordName::new(&data[RECORD_HEADER_LEN..length])?;

        Ok(Self::new(name, extent_lba, data_length))
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
