/// Polynomial used by Zephyr's `crc8_ccitt` (x^8 + x^2 + x + 1).
pub const CRC8_CCITT_POLY: u8 = 0x07;

/// Initial register value NVS uses when checksumming an ATE.
pub const CRC8_CCITT_INIT: u8 = 0xFF;

/// Bit-at-a-time CRC-8 with a configurable polynomial and initial value.
///
/// No reflection and no final XOR. For each byte the register is XORed with
/// the input and then shifted left eight times, XORing in `poly` whenever the
/// high bit falls off.
pub fn crc8_ccitt(data: &[u8], poly: u8, init: u8) -> u8 {
    let mut crc = init;

    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ poly;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

/// CRC-8-CCITT as used for NVS ATEs: polynomial `0x07`, init `0xFF`.
///
/// This function is intentionally public so that callers can verify ATEs
/// independently of the image builder.
pub fn crc8(data: &[u8]) -> u8 {
    crc8_ccitt(data, CRC8_CCITT_POLY, CRC8_CCITT_INIT)
}
