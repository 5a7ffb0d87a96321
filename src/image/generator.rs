use tracing::{
    debug,
    warn,
};

use super::ate::{
    sector_close_ate,
    Ate,
};
use super::{
    EntryLayout,
    SettingsEntry,
};
use crate::error::Error;
use crate::image::consts::*;

/// Lay out the first sector of a settings NVS image and return it.
///
/// Data grows from the start of the sector, ATEs grow down from its end:
/// the sector close ATE, the largest name id ATE, then a value ATE and a
/// name ATE for each encoded entry.
pub(crate) fn generate_sector(
    sector_size: usize,
    entries: &[SettingsEntry],
    layout: EntryLayout,
) -> Result<Vec<u8>, Error> {
    if entries.is_empty() {
        return Err(Error::NoEntries);
    }

    let entries = match layout {
        EntryLayout::FirstOnly => {
            if entries.len() > 1 {
                warn!(
                    "only the first of {} entries is written, ignoring the rest",
                    entries.len()
                );
            }
            &entries[..1]
        }
        EntryLayout::All => entries,
    };

    // Name ids run from NVS_NAMECNT + 1 and must stay below the value ids.
    let count = u16::try_from(entries.len())
        .ok()
        .filter(|&count| count < NVS_NAME_ID_OFFSET)
        .ok_or(Error::TooManyEntries(entries.len()))?;

    let mut writer = SectorWriter::new(sector_size);

    writer.push_tail(&sector_close_ate())?;
    writer.push_tail(&LARGEST_NAME_ID_ATE)?;

    // Payload of the largest name id ATE: the highest name id in use.
    writer.push_head(&(NVS_NAMECNT + count).to_le_bytes())?;

    for (name_id, entry) in (NVS_NAMECNT + 1..).zip(entries) {
        debug!(name = %entry.name, name_id, value_len = entry.value.len(), "writing entry");
        writer.write_record(name_id + NVS_NAME_ID_OFFSET, &entry.value)?;
        writer.write_record(name_id, entry.name.as_bytes())?;
    }

    debug!(
        data_end = writer.head,
        ate_start = writer.tail,
        "sector laid out"
    );

    Ok(writer.data)
}

struct SectorWriter {
    data: Vec<u8>,
    /// Next free byte of the data area.
    head: usize,
    /// Lowest byte occupied by an ATE.
    tail: usize,
}

impl SectorWriter {
    fn new(sector_size: usize) -> Self {
        Self {
            data: vec![ERASED_BYTE; sector_size],
            head: 0,
            tail: sector_size,
        }
    }

    fn available(&self) -> usize {
        self.tail - self.head
    }

    /// Write an ATE for `payload` followed by the payload itself.
    fn write_record(&mut self, id: u16, payload: &[u8]) -> Result<(), Error> {
        let needed = ATE_SIZE + payload.len();
        if needed > self.available() {
            return Err(Error::CapacityExceeded {
                needed,
                available: self.available(),
            });
        }

        // Both fit in u16 once the record fits in a sector of at most 64 KiB.
        let offset = u16::try_from(self.head).map_err(|_| self.capacity_error(needed))?;
        let length = u16::try_from(payload.len()).map_err(|_| self.capacity_error(needed))?;

        let ate = Ate::new(id, offset, length);
        debug!(id, offset, length, ate_offset = self.tail - ATE_SIZE, "writing ATE");
        self.push_tail(&ate.to_bytes())?;
        self.push_head(payload)
    }

    /// Place `bytes` directly below the lowest ATE.
    fn push_tail(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if bytes.len() > self.available() {
            return Err(self.capacity_error(bytes.len()));
        }
        self.tail -= bytes.len();
        self.data[self.tail..self.tail + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Append `bytes` to the data area.
    fn push_head(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if bytes.len() > self.available() {
            return Err(self.capacity_error(bytes.len()));
        }
        self.data[self.head..self.head + bytes.len()].copy_from_slice(bytes);
        self.head += bytes.len();
        Ok(())
    }

    fn capacity_error(&self, needed: usize) -> Error {
        Error::CapacityExceeded {
            needed,
            available: self.available(),
        }
    }
}
