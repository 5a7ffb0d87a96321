pub mod ate;
pub mod crc;

pub(crate) mod consts;
pub(crate) mod generator;

pub use consts::{
    ERASED_BYTE,
    NVS_NAMECNT,
    NVS_NAME_ID_OFFSET,
    SECTOR_SIZE,
};

use crate::error::Error;
use consts::*;

/// A single settings entry: the settings key (e.g. `airtag/public_key`) and
/// the raw value stored under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsEntry {
    pub name: String,
    pub value: Vec<u8>,
}

impl SettingsEntry {
    pub fn new(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create an entry from a hex encoded value. Whitespace is not accepted
    /// anywhere in `hex_value`.
    pub fn from_hex(name: impl Into<String>, hex_value: &str) -> Result<Self, Error> {
        let name = name.into();
        validate_name(&name)?;
        let value = hex::decode(hex_value)?;
        Ok(Self { name, value })
    }
}

/// Parses the `name=hex` form used on the command line. Only the first `=`
/// separates the name from the value.
impl std::str::FromStr for SettingsEntry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s.split_once('=').ok_or_else(|| {
            Error::InvalidEntry(format!("'{}' is not of the form name=hex", s))
        })?;
        Self::from_hex(name, value)
    }
}

/// Which of the supplied entries end up in the sector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryLayout {
    /// Encode only the first entry; any further entries are ignored.
    #[default]
    FirstOnly,
    /// Encode every entry, assigning consecutive name ids.
    All,
}

/// Geometry and addressing of the generated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    /// Number of NVS sectors. Only the first one is populated.
    pub sector_count: usize,
    /// Flash sector size in bytes.
    pub sector_size: usize,
    /// Absolute flash address of the first byte, used by addressed exports.
    pub offset: u32,
    pub layout: EntryLayout,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            sector_count: DEFAULT_SECTOR_COUNT,
            sector_size: SECTOR_SIZE,
            offset: DEFAULT_OFFSET,
            layout: EntryLayout::FirstOnly,
        }
    }
}

impl ImageConfig {
    /// Total image size in bytes, or `None` on overflow.
    pub fn image_size(&self) -> Option<usize> {
        self.sector_count.checked_mul(self.sector_size)
    }

    pub(crate) fn validate(&self) -> Result<usize, Error> {
        if self.sector_count == 0 {
            return Err(Error::InvalidSectorCount);
        }
        if !(MIN_SECTOR_SIZE..=MAX_SECTOR_SIZE).contains(&self.sector_size)
            || !self.sector_size.is_multiple_of(ATE_SIZE)
        {
            return Err(Error::InvalidSectorSize(self.sector_size));
        }

        let size = self.image_size().ok_or(Error::AddressOverflow)?;
        let end = u64::from(self.offset) + size as u64;
        if end > 1 << 32 {
            return Err(Error::AddressOverflow);
        }

        Ok(size)
    }
}

fn validate_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::InvalidEntry("name must not be empty".to_string()));
    }
    Ok(())
}
