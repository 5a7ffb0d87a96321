use thiserror::Error;

/// Errors that can occur while reading settings entries, laying out the
/// NVS sector, or exporting the finished image.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("hex decoding error: {0}")]
    HexError(#[from] hex::FromHexError),

    #[error("failed to write Intel HEX: {0}")]
    IhexError(#[from] ihex::WriterError),

    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    /// At least one settings entry is required to lay out a sector.
    #[error("no settings entries given")]
    NoEntries,

    #[error("sector count must be at least 1")]
    InvalidSectorCount,

    #[error("invalid sector size {0}: must be a multiple of 8 between 64 and 65536 bytes")]
    InvalidSectorSize(usize),

    /// The image does not fit in the 32-bit address space starting at the
    /// configured base offset.
    #[error("image does not fit in the 32-bit address space")]
    AddressOverflow,

    /// The data written from the start of the sector would run into the
    /// ATEs written from its end.
    #[error("sector full: {needed} bytes needed, {available} bytes available")]
    CapacityExceeded { needed: usize, available: usize },

    #[error("too many entries ({0}): name ids would collide with value ids")]
    TooManyEntries(usize),
}
