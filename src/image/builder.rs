/// Builder for creating images

use crate::error::{IsoError, Result};
use crate::format::VolumeDescriptor;
use crate::image::{BuildReport, ImageAssembler};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

/// Builder for constructing images from a list of input files
#[derive(Debug, Clone, Default)]
pub struct ImageBuilder {
    inputs: Vec<PathBuf>,
    timestamp: Option<DateTime<Utc>>,
}

impl ImageBuilder {
    /// Create a new builder with no inputs
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one input file
    pub fn input<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.inputs.push(path.into());
        self
    }

    /// Add input files, keeping their order
    pub fn inputs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.inputs.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Use a fixed creation time instead of the current time
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Input files in placement order
    pub fn input_paths(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Build the image into a file at `output`
    ///
    /// The input list is checked before the output is created.
    pub fn build<P: AsRef<Path>>(self, output: P) -> Result<BuildReport> {
        self.validate()?;

        let output = output.as_ref();
        log::info!("Creating image: {}", output.display());
        let file = File::create(output).map_err(|source| IsoError::OutputCreate {
            path: output.to_path_buf(),
            source,
        })?;

        let (_, report) = self.assemble(BufWriter::new(file))?;
        log::info!("Image created successfully: {}", output.display());
        Ok(report)
    }

    /// Build the image into any seekable stream
    pub fn build_into<W: Write + Seek>(self, output: W) -> Result<(W, BuildReport)> {
        self.validate()?;
        self.assemble(output)
    }

    fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(IsoError::invalid_arguments(
                "At least one input file is required",
            ));
        }
        Ok(())
    }

    fn assemble<W: Write + Seek>(self, output: W) -> Result<(W, BuildReport)> {
        let descriptor = match self.timestamp {
            Some(timestamp) => VolumeDescriptor::new(timestamp),
            None => VolumeDescriptor::now(),
        };

        let mut assembler = ImageAssembler::start(output, &descriptor)?;
        log::info!("Adding {} file(s) to image", self.inputs.len());
        for path in &self.inputs {
            assembler.add_input(path)?;
        }
        assembler.finish()
    }
}
