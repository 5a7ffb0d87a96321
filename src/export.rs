use ihex::Record;

use crate::error::Error;

/// Bytes per data record, the usual Intel HEX line length.
const DATA_RECORD_LEN: usize = 16;

/// Render `data` as Intel HEX records addressed from `base`.
///
/// An extended linear address record is emitted whenever the upper 16 bits
/// of the address change, and data records never cross a 64 KiB boundary.
pub(crate) fn to_ihex(data: &[u8], base: u32) -> Result<String, Error> {
    let mut records = Vec::with_capacity(data.len() / DATA_RECORD_LEN + 2);
    let mut upper = None;
    let mut pos = 0;

    while pos < data.len() {
        let address = u64::from(base) + pos as u64;
        let address_msbs = u16::try_from(address >> 16).map_err(|_| Error::AddressOverflow)?;
        let address_lsbs = (address & 0xFFFF) as u16;

        if upper != Some(address_msbs) {
            records.push(Record::ExtendedLinearAddress(address_msbs));
            upper = Some(address_msbs);
        }

        let to_boundary = 0x10000 - usize::from(address_lsbs);
        let len = DATA_RECORD_LEN.min(to_boundary).min(data.len() - pos);

        records.push(Record::Data {
            offset: address_lsbs,
            value: data[pos..pos + len].to_vec(),
        });
        pos += len;
    }

    records.push(Record::EndOfFile);
    Ok(ihex::create_object_file_representation(&records)?)
}
