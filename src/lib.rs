//! Generator for pre-populated Zephyr settings NVS flash images.
//!
//! The image lets a device boot with settings already stored, without ever
//! running the settings write path on the target.

pub mod error;
pub mod image;

mod csv;
mod export;

use std::fs;
use std::io::Write;
use std::path::Path;

pub use error::Error;
pub use image::crc::{
    crc8,
    crc8_ccitt,
};
pub use image::{
    EntryLayout,
    ImageConfig,
    SettingsEntry,
    ERASED_BYTE,
    NVS_NAMECNT,
    SECTOR_SIZE,
};

/// Parse settings entries from CSV content with a `name,value` header, values
/// hex encoded.
pub fn entries_from_csv(content: &str) -> Result<Vec<SettingsEntry>, Error> {
    csv::parser::parse_csv(content)
}

/// Parse settings entries from the CSV file at `path`.
pub fn entries_from_csv_file<P: AsRef<Path>>(path: P) -> Result<Vec<SettingsEntry>, Error> {
    let content = fs::read_to_string(path)?;
    csv::parser::parse_csv(&content)
}

/// An in-memory flash image for the settings NVS partition.
///
/// The buffer starts out erased. [`SettingsImage::generate`] populates the
/// first sector; all other sectors stay erased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsImage {
    config: ImageConfig,
    data: Vec<u8>,
}

impl SettingsImage {
    /// Allocate an erased image of `sector_count * sector_size` bytes.
    pub fn new(config: ImageConfig) -> Result<Self, Error> {
        let size = config.validate()?;
        Ok(Self {
            config,
            data: vec![ERASED_BYTE; size],
        })
    }

    /// The validated configuration this image was created with.
    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// The raw image bytes. Index 0 corresponds to `config().offset`.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Lay out `entries` in the first sector.
    ///
    /// With [`EntryLayout::FirstOnly`] only `entries[0]` is encoded. The
    /// image is left unchanged if the entries do not fit.
    pub fn generate(&mut self, entries: &[SettingsEntry]) -> Result<(), Error> {
        let sector = image::generator::generate_sector(
            self.config.sector_size,
            entries,
            self.config.layout,
        )?;

        self.data.fill(ERASED_BYTE);
        self.data[..sector.len()].copy_from_slice(&sector);

        Ok(())
    }

    /// Write the image verbatim to `path`.
    pub fn to_bin_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        fs::File::create(path)?.write_all(&self.data)?;
        Ok(())
    }

    /// Render the image as Intel HEX, placed at `config().offset`.
    pub fn to_ihex(&self) -> Result<String, Error> {
        export::to_ihex(&self.data, self.config.offset)
    }

    /// Write the image as Intel HEX to `path`.
    pub fn to_ihex_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let hex = self.to_ihex()?;
        fs::File::create(path)?.write_all(hex.as_bytes())?;
        Ok(())
    }
}
