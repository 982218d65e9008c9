//! CRC-16/CCITT-FALSE, the checksum closing every BR Code.
//!
//! Polynomial `0x1021`, initial register `0xFFFF`, MSB first, no reflection and
//! no final XOR. Banking apps reject a payload whose tail does not match.

const POLY: u16 = 0x1021;
const INIT: u16 = 0xFFFF;

pub fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut crc = INIT;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLY
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Checksum rendered the way it is appended to a payload: 4 uppercase hex digits.
pub fn crc16_hex(data: &[u8]) -> String {
    format!("{:04X}", crc16_ccitt(data))
}
