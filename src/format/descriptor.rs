/// Volume descriptor encoding

use crate::error::{IsoError, Result};
use crate::format::constants::*;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Timestamp layout: 14 calendar digits, the 2 filler digits are appended separately
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Filler digits following the calendar part of the timestamp
const TIMESTAMP_FILLER: &[u8; 2] = b"00";

/// The single volume descriptor of an image
///
/// Holds the creation time; every other field of the sector is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeDescriptor {
    timestamp: DateTime<Utc>,
}

impl VolumeDescriptor {
    /// Create a descriptor with the given creation time
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }

    /// Create a descriptor stamped with the current UTC time
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Creation time, truncated to whole seconds when encoded
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Encode the descriptor into one sector
    pub fn encode(&self) -> [u8; SECTOR_SIZE] {
        let mut sector = [0u8; SECTOR_SIZE];

        sector[0] = DESCRIPTOR_TYPE;
        sector[DESCRIPTOR_IDENTIFIER_OFFSET..DESCRIPTOR_IDENTIFIER_OFFSET + STANDARD_IDENTIFIER.len()]
            .copy_from_slice(STANDARD_IDENTIFIER);
        sector[DESCRIPTOR_VERSION_OFFSET] = DESCRIPTOR_VERSION;

        let digits = self.timestamp.format(TIMESTAMP_FORMAT).to_string();
        let date_end = DESCRIPTOR_TIMESTAMP_OFFSET + digits.len();
        sector[DESCRIPTOR_TIMESTAMP_OFFSET..date_end].copy_from_slice(digits.as_bytes());
        sector[date_end..date_end + TIMESTAMP_FILLER.len()].copy_from_slice(TIMESTAMP_FILLER);

        sector
    }

    /// Decode a descriptor sector
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < SECTOR_SIZE {
            return Err(IsoError::invalid_format(format!(
                "Descriptor sector too short: {} bytes",
                data.len()
            )));
        }

        if data[0] != DESCRIPTOR_TYPE {
            return Err(IsoError::parse(0, format!("Unexpected descriptor type {}", data[0])));
        }

        let id_end = DESCRIPTOR_IDENTIFIER_OFFSET + STANDARD_IDENTIFIER.len();
        if &data[DESCRIPTOR_IDENTIFIER_OFFSET..id_end] != STANDARD_IDENTIFIER {
            return Err(IsoError::invalid_format("Missing CD001 standard identifier"));
        }

        if data[DESCRIPTOR_VERSION_OFFSET] != DESCRIPTOR_VERSION {
            return Err(IsoError::parse(
                DESCRIPTOR_VERSION_OFFSET,
                format!("Unsupported descriptor version {}", data[DESCRIPTOR_VERSION_OFFSET]),
            ));
        }

        let field =
            &data[DESCRIPTOR_TIMESTAMP_OFFSET..DESCRIPTOR_TIMESTAMP_OFFSET + DESCRIPTOR_TIMESTAMP_LEN];
        if !field.iter().all(u8::is_ascii_digit) {
            return Err(IsoError::parse(
                DESCRIPTOR_TIMESTAMP_OFFSET,
                "Timestamp is not 16 decimal digits",
            ));
        }

        let text = String::from_utf8_lossy(&field[..DESCRIPTOR_TIMESTAMP_LEN - TIMESTAMP_FILLER.len()]);
        let naive = NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT).map_err(|e| {
            IsoError::parse(DESCRIPTOR_TIMESTAMP_OFFSET, format!("Invalid timestamp {}: {}", text, e))
        })?;

        Ok(Self::new(naive.and_utc()))
    }
}

impl Default for VolumeDescriptor {
    fn default() -> Self {
        Self::now()
    }
}
