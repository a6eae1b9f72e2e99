// Joseph Prichard
// 1/5/2023
// Canonical header at the front of every compressed file

use crate::error::{CompressError, FormatError};
use crate::freq::FrequencyTable;
use crate::read::BitReader;
use crate::utils::str_to_tag;
use crate::write::BitWriter;

pub const TAG_LEN: usize = 8;
pub const SIG: [u8; TAG_LEN] = str_to_tag("huffzip");

// tag, alphabet count, total character count then the frequency entries
pub fn header_size(freq_table: &FrequencyTable) -> u64 {
    TAG_LEN as u64 + freq_table.serialized_size()
}

pub fn write_header(writer: &mut BitWriter, freq_table: &FrequencyTable) -> Result<(), CompressError> {
    writer.write_bytes(&SIG);
    freq_table.write_to(writer)
}

pub fn read_header(reader: &mut BitReader) -> Result<FrequencyTable, FormatError> {
    // the tag is compared as a fixed length byte array, zero bytes included
    let tag: [u8; TAG_LEN] = reader.read_array()?;
    if tag != SIG {
        return Err(FormatError::BadMagicTag);
    }
    FrequencyTable::read_from(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let freq_table = FrequencyTable::build(b"aab");
        let mut writer = BitWriter::new();
        write_header(&mut writer, &freq_table).unwrap();
        let bytes = writer.into_bytes();

        assert_eq!(bytes.len() as u64, header_size(&freq_table));
        assert_eq!(&bytes[..8], b"huffzip\0");
        assert_eq!(&bytes[8..12], &2u32.to_le_bytes());
        assert_eq!(&bytes[12..20], &3u64.to_le_bytes());
        assert_eq!(&bytes[20..], &[b'a', 2, 0, 0, 0, b'b', 1, 0, 0, 0]);

        let reader = &mut BitReader::new(&bytes);
        assert_eq!(read_header(reader).unwrap(), freq_table);
        assert!(reader.eof());
    }

    #[test]
    fn test_bad_tag() {
        let freq_table = FrequencyTable::build(b"aab");
        let mut writer = BitWriter::new();
        write_header(&mut writer, &freq_table).unwrap();
        let mut bytes = writer.into_bytes();

        // the zero byte at the end of the tag is significant
        bytes[7] = b'!';
        assert_eq!(read_header(&mut BitReader::new(&bytes)), Err(FormatError::BadMagicTag));
    }

    #[test]
    fn test_short_tag() {
        assert_eq!(
            read_header(&mut BitReader::new(b"huff")),
            Err(FormatError::Truncated { needed: 8, available: 4 }));
    }
}
