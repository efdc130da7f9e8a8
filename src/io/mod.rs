/// I/O operations for writing and reading images

/// Image reader
pub mod reader;
/// Sector-addressed writer
pub mod sector_writer;

pub use reader::{read_descriptor, read_record_after, read_root_records, RootRecords};
pub use sector_writer::SectorWriter;
