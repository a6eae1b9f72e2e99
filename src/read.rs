// Joseph Prichard
// 1/5/2023
// In-memory reader implementing a bit layer

use crate::bitwise::get_bit;
use crate::error::FormatError;

pub struct BitReader<'a> {
    // the compressed bytes being read
    buffer: &'a [u8],
    // the bit position of the next read in the buffer
    bit_position: u64,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> BitReader<'a> {
        BitReader { buffer, bit_position: 0 }
    }

    pub fn bit_position(&self) -> u64 {
        self.bit_position
    }

    pub fn byte_position(&self) -> u64 {
        (self.bit_position + 7) / 8
    }

    pub fn len(&self) -> u64 {
        self.buffer.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn remaining_bytes(&self) -> u64 {
        self.len().saturating_sub(self.byte_position())
    }

    pub fn eof(&self) -> bool {
        self.bit_position >= 8 * self.len()
    }

    // fails with the number of bytes a read of byte_count bytes would need
    pub fn require(&self, byte_count: u64) -> Result<(), FormatError> {
        let needed = self.byte_position() + byte_count;
        if needed > self.len() {
            return Err(FormatError::Truncated { needed, available: self.len() });
        }
        Ok(())
    }

    pub fn read_bit(&mut self) -> Result<u8, FormatError> {
        let index = self.bit_position / 8;
        let byte = match self.buffer.get(index as usize) {
            Some(byte) => *byte,
            None => return Err(FormatError::Truncated { needed: index + 1, available: self.len() }),
        };
        let bit = get_bit(byte, (self.bit_position % 8) as u32);
        self.bit_position += 1;
        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, FormatError> {
        if self.bit_position % 8 == 0 {
            let index = self.bit_position / 8;
            let byte = match self.buffer.get(index as usize) {
                Some(byte) => *byte,
                None => return Err(FormatError::Truncated { needed: index + 1, available: self.len() }),
            };
            self.bit_position += 8;
            Ok(byte)
        } else {
            // read each bit individually as they straddle two bytes in the buffer
            let mut byte = 0u8;
            for _ in 0..8 {
                byte = (byte << 1) | self.read_bit()?;
            }
            Ok(byte)
        }
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        self.require(N as u64)?;
        let mut buffer = [0u8; N];
        for byte in buffer.iter_mut() {
            *byte = self.read_byte()?;
        }
        Ok(buffer)
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, FormatError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits_msb_first() {
        let bytes = [0b1011_0001, 0b1100_0000];
        let reader = &mut BitReader::new(&bytes);
        let mut bits = vec![];
        while !reader.eof() {
            bits.push(reader.read_bit().unwrap());
        }
        assert_eq!(bits, vec![1, 0, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_read_past_end() {
        let bytes = [0xFF];
        let reader = &mut BitReader::new(&bytes);
        assert_eq!(reader.read_byte().unwrap(), 0xFF);
        assert_eq!(reader.read_bit(), Err(FormatError::Truncated { needed: 2, available: 1 }));
        assert_eq!(reader.read_byte(), Err(FormatError::Truncated { needed: 2, available: 1 }));
    }

    #[test]
    fn test_read_unaligned_byte() {
        let bytes = [0b0111_1111, 0b1000_0000];
        let reader = &mut BitReader::new(&bytes);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.read_byte().unwrap(), 0xFF);
        assert_eq!(reader.bit_position(), 9);
        assert_eq!(reader.remaining_bytes(), 0);
    }

    #[test]
    fn test_read_integers_le() {
        let bytes: Vec<u8> = (1..=12).collect();
        let reader = &mut BitReader::new(&bytes);
        assert_eq!(reader.read_u32().unwrap(), 0x0403_0201);
        assert_eq!(reader.read_u64().unwrap(), 0x0C0B_0A09_0807_0605);
        assert!(reader.eof());
    }

    #[test]
    fn test_truncated_integer_reads_nothing() {
        let bytes = [1, 2, 3];
        let reader = &mut BitReader::new(&bytes);
        assert_eq!(reader.read_u32(), Err(FormatError::Truncated { needed: 4, available: 3 }));
        assert_eq!(reader.bit_position(), 0);
    }
}
