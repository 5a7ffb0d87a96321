// NVS sector layout
pub const SECTOR_SIZE: usize = 4096;
pub const ERASED_BYTE: u8 = 0xFF;
pub const ATE_SIZE: usize = 8;
pub const CLOSE_ATE_SIZE: usize = 16;

// Sector size bounds. ATE offsets and lengths are 16 bit.
pub const MIN_SECTOR_SIZE: usize = 64;
pub const MAX_SECTOR_SIZE: usize = 0x10000;

// Defaults matching an nRF52840 DK storage partition
pub const DEFAULT_SECTOR_COUNT: usize = 8;
pub const DEFAULT_OFFSET: u32 = 0xF8000;

// Settings NVS backend ids
pub const NVS_NAMECNT: u16 = 0x8000;
pub const NVS_NAME_ID_OFFSET: u16 = 0x4000;

// Reserved ATE byte
pub const ATE_RESERVED: u8 = 0xFF;

// Fixed records, reproduced verbatim
pub const CLOSE_ATE_HEADER: [u8; 7] = [0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF];
pub const LARGEST_NAME_ID_ATE: [u8; ATE_SIZE] = [0x00, 0x80, 0x00, 0x00, 0x02, 0x00, 0xFF, 0x8D];
