use super::consts::*;
use super::crc::crc8;

/// An NVS Allocation Table Entry: the metadata record describing one payload
/// in the data area of a sector.
///
/// On flash it is `[id:u16][offset:u16][length:u16][reserved:u8][crc8:u8]`,
/// all little endian, with the CRC taken over the first seven bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ate {
    pub id: u16,
    /// Offset of the payload from the start of the sector.
    pub offset: u16,
    pub length: u16,
}

impl Ate {
    pub fn new(id: u16, offset: u16, length: u16) -> Self {
        Self { id, offset, length }
    }

    /// Serialize the ATE and append its CRC.
    pub fn to_bytes(&self) -> [u8; ATE_SIZE] {
        let mut buf = [ATE_RESERVED; ATE_SIZE];
        buf[0..2].copy_from_slice(&self.id.to_le_bytes());
        buf[2..4].copy_from_slice(&self.offset.to_le_bytes());
        buf[4..6].copy_from_slice(&self.length.to_le_bytes());
        buf[7] = crc8(&buf[..7]);
        buf
    }
}

/// Build the 16-byte sector close ATE: the fixed header, its CRC and eight
/// erased bytes.
pub fn sector_close_ate() -> [u8; CLOSE_ATE_SIZE] {
    let mut buf = [ERASED_BYTE; CLOSE_ATE_SIZE];
    buf[..7].copy_from_slice(&CLOSE_ATE_HEADER);
    buf[7] = crc8(&CLOSE_ATE_HEADER);
    buf
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn value_ate_bytes() {
        let ate = Ate::new(0xC001, 2, 4);
        assert_eq!(
            ate.to_bytes(),
            [0x01, 0xC0, 0x02, 0x00, 0x04, 0x00, 0xFF, 0x9D]
        );
    }

    #[test]
    fn name_ate_bytes() {
        let ate = Ate::new(0x8001, 6, 3);
        assert_eq!(
            ate.to_bytes(),
            [0x01, 0x80, 0x06, 0x00, 0x03, 0x00, 0xFF, 0x72]
        );
    }

    #[test]
    fn largest_name_id_literal_is_a_valid_ate() {
        assert_eq!(Ate::new(NVS_NAMECNT, 0, 2).to_bytes(), LARGEST_NAME_ID_ATE);
    }

    #[test]
    fn close_ate_layout() {
        let close = sector_close_ate();
        assert_eq!(&close[..7], &CLOSE_ATE_HEADER);
        assert_eq!(close[7], 0x5C);
        assert!(close[8..].iter().all(|&b| b == ERASED_BYTE));
        assert_eq!(&close[..8], &Ate::new(0xFFFF, 0, 0).to_bytes());
    }
}
