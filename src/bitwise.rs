// Joseph Prichard
// 1/5/2023
// Bitwise helpers for most-significant-bit-first packing

// bit n counts from the most significant bit of the byte
pub fn set_bit(byte: u8, n: u32) -> u8 {
    byte | (0x80 >> n)
}

pub fn get_bit(byte: u8, n: u32) -> u8 {
    (byte >> (7 - n)) & 1
}

// bit n of a code of bit_len bits, counting from the first (highest) bit
pub fn get_code_bit(code: u64, bit_len: u8, n: u8) -> u8 {
    ((code >> (bit_len - 1 - n)) & 1) as u8
}
