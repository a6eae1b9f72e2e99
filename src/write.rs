// Joseph Prichard
// 1/5/2023
// In-memory writer implementing a bit layer

use crate::bitwise::{get_code_bit, set_bit};
use crate::code::SymbolCode;

pub struct BitWriter {
    // the bytes written so far, the last one may be partially filled
    buffer: Vec<u8>,
    // the total number of bits written
    bit_position: u64,
}

impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter::with_capacity(0)
    }

    pub fn with_capacity(byte_capacity: usize) -> BitWriter {
        BitWriter {
            buffer: Vec::with_capacity(byte_capacity),
            bit_position: 0,
        }
    }

    pub fn bit_position(&self) -> u64 {
        self.bit_position
    }

    pub fn is_aligned(&self) -> bool {
        self.bit_position % 8 == 0
    }

    // pending bits in the last byte are already zero so aligning only moves the position
    pub fn align_to_byte(&mut self) {
        self.bit_position = ((self.bit_position + 7) / 8) * 8;
    }

    pub fn write_bit(&mut self, bit: u8) {
        let offset = (self.bit_position % 8) as u32;
        if offset == 0 {
            self.buffer.push(0);
        }
        if bit > 0 {
            // invariant: a byte was pushed when this byte's first bit was written
            if let Some(last) = self.buffer.last_mut() {
                *last = set_bit(*last, offset);
            }
        }
        self.bit_position += 1;
    }

    pub fn write_byte(&mut self, byte: u8) {
        if self.is_aligned() {
            // write the byte directly into the buffer
            self.buffer.push(byte);
            self.bit_position += 8;
        } else {
            self.write_bits(byte as u64, 8);
        }
    }

    // writes the low count bits of value, highest first
    pub fn write_bits(&mut self, value: u64, count: u8) {
        for i in 0..count {
            self.write_bit(get_code_bit(value, count, i));
        }
    }

    pub fn write_symbol(&mut self, symbol: &SymbolCode) {
        self.write_bits(symbol.encoded_symbol, symbol.bit_len);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    pub fn write_u32(&mut self, num: u32) {
        self.write_bytes(&num.to_le_bytes());
    }

    pub fn write_u64(&mut self, num: u64) {
        self.write_bytes(&num.to_le_bytes());
    }

    // the final byte is zero padded on the right
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        BitWriter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bits_msb_first() {
        let mut writer = BitWriter::new();
        for bit in [1, 0, 1, 1, 0, 0, 0, 1, 1, 1] {
            writer.write_bit(bit);
        }
        assert_eq!(writer.bit_position(), 10);
        assert_eq!(writer.into_bytes(), vec![0b1011_0001, 0b1100_0000]);
    }

    #[test]
    fn test_write_symbol() {
        let mut writer = BitWriter::new();
        let symbol = SymbolCode { plain_symbol: b'a', weight: 1, encoded_symbol: 0b011, bit_len: 3 };
        writer.write_symbol(&symbol);
        writer.write_symbol(&symbol);
        writer.write_symbol(&symbol);
        assert_eq!(writer.bit_position(), 9);
        assert_eq!(writer.into_bytes(), vec![0b0110_1101, 0b1000_0000]);
    }

    #[test]
    fn test_unaligned_byte_and_align() {
        let mut writer = BitWriter::new();
        writer.write_bit(1);
        writer.write_byte(0xFF);
        assert!(!writer.is_aligned());
        writer.align_to_byte();
        assert!(writer.is_aligned());
        writer.write_byte(0x12);
        assert_eq!(writer.bit_position(), 24);
        assert_eq!(writer.into_bytes(), vec![0xFF, 0x80, 0x12]);
    }

    #[test]
    fn test_write_integers_le() {
        let mut writer = BitWriter::new();
        writer.write_u32(0x0403_0201);
        writer.write_u64(0x0C0B_0A09_0807_0605);
        assert_eq!(writer.into_bytes(), (1..=12).collect::<Vec<u8>>());
    }
}
