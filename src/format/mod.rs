/// Image format constants and encoders

/// Layout constants
pub mod constants;
/// Volume descriptor encoding
pub mod descriptor;
/// Directory record encoding
pub mod record;

pub use descriptor::VolumeDescriptor;
pub use record::{DirectoryRecord, RecordName};
