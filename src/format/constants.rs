/// Image layout constants

/// Size of one addressable sector in bytes
pub const SECTOR_SIZE: usize = 2048;

/// Number of all-zero sectors at the start of the image
pub const RESERVED_SECTORS: u32 = 16;

/// Sector holding the volume descriptor
pub const DESCRIPTOR_LBA: u32 = RESERVED_SECTORS;

/// Sector holding the root directory
pub const ROOT_DIRECTORY_LBA: u32 = 18;

/// Recorded size of the root directory extent
pub const ROOT_DIRECTORY_SIZE: u32 = SECTOR_SIZE as u32;

/// First sector available for file payloads
pub const FIRST_FILE_LBA: u32 = ROOT_DIRECTORY_LBA + 1;

/// Volume descriptor type byte
pub const DESCRIPTOR_TYPE: u8 = 1;

/// Standard identifier
pub const STANDARD_IDENTIFIER: &[u8; 5] = b"CD001";

/// Volume descriptor version byte
pub const DESCRIPTOR_VERSION: u8 = 1;

/// Offset of the standard identifier in the descriptor
pub const DESCRIPTOR_IDENTIFIER_OFFSET: usize = 1;

/// Offset of the version byte in the descriptor
pub const DESCRIPTOR_VERSION_OFFSET: usize = 6;

/// Offset of the ASCII timestamp in the descriptor
pub const DESCRIPTOR_TIMESTAMP_OFFSET: usize = 190;

/// Width of the ASCII timestamp (14 digits plus 2 filler digits)
pub const DESCRIPTOR_TIMESTAMP_LEN: usize = 16;

/// Fixed header length of a directory record, up to and including the name length byte
pub const RECORD_HEADER_LEN: usize = 33;

/// Offset of the extent LBA in a directory record
pub const RECORD_EXTENT_OFFSET: usize = 2;

/// Offset of the data length in a directory record
pub const RECORD_SIZE_OFFSET: usize = 10;

/// Offset of the name length byte in a directory record
pub const RECORD_NAME_LEN_OFFSET: usize = 32;

/// Longest name whose record length still fits in the one-byte length field
pub const MAX_NAME_LEN: usize = u8::MAX as usize - RECORD_HEADER_LEN;

/// Name of the root's self entry
pub const SELF_NAME: &[u8] = &[0x00];

/// Name of the root's parent entry
pub const PARENT_NAME: &[u8] = &[0x01];

/// Number of sectors needed to hold `bytes` bytes
#[inline]
pub fn sectors_for(bytes: u64) -> u64 {
    bytes.div_ceil(SECTOR_SIZE as u64)
}

/// Byte offset of the start of a sector
#[inline]
pub fn sector_offset(lba: u32) -> u64 {
    lba as u64 * SECTOR_SIZE as u64
}
