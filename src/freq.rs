// Joseph Prichard
// 1/5/2023
// Symbol frequency table and its fixed width serialized form

use crate::error::{CompressError, FormatError};
use crate::read::BitReader;
use crate::write::BitWriter;

pub const TABLE_SIZE: usize = 256;

// size of a serialized entry: 1 byte symbol followed by a 4 byte weight
pub const ENTRY_SIZE: u64 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    // occurrence count for each symbol, zero when the symbol was never seen
    counts: Box<[u64; TABLE_SIZE]>,
    total_count: u64,
    alphabet_count: u32,
}

impl FrequencyTable {
    pub fn new() -> FrequencyTable {
        FrequencyTable {
            counts: Box::new([0u64; TABLE_SIZE]),
            total_count: 0,
            alphabet_count: 0,
        }
    }

    pub fn build(bytes: &[u8]) -> FrequencyTable {
        let mut freq_table = FrequencyTable::new();
        // iterate through each byte and increment count
        for &byte in bytes {
            freq_table.add(byte, 1);
        }
        freq_table
    }

    fn add(&mut self, symbol: u8, weight: u64) {
        let count = &mut self.counts[symbol as usize];
        if *count == 0 {
            self.alphabet_count += 1;
        }
        *count += weight;
        self.total_count += weight;
    }

    pub fn weight(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn alphabet_count(&self) -> u32 {
        self.alphabet_count
    }

    pub fn is_empty(&self) -> bool {
        self.alphabet_count == 0
    }

    // observed symbols in ascending order, the order they are serialized in
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    pub fn serialized_size(&self) -> u64 {
        4 + 8 + ENTRY_SIZE * self.alphabet_count as u64
    }

    // every weight must fit the 4 byte weight field of an entry
    pub fn check_weights(&self) -> Result<(), CompressError> {
        match self.iter().find(|&(_, weight)| weight > u32::MAX as u64) {
            Some((symbol, weight)) => Err(CompressError::WeightOverflow { symbol, weight }),
            None => Ok(()),
        }
    }

    pub fn write_to(&self, writer: &mut BitWriter) -> Result<(), CompressError> {
        self.check_weights()?;
        writer.write_u32(self.alphabet_count);
        writer.write_u64(self.total_count);
        for (symbol, weight) in self.iter() {
            writer.write_byte(symbol);
            writer.write_u32(weight as u32);
        }
        Ok(())
    }

    pub fn read_from(reader: &mut BitReader) -> Result<FrequencyTable, FormatError> {
        let alphabet_count = reader.read_u32()?;
        let total_count = reader.read_u64()?;
        if alphabet_count == 0 || alphabet_count as usize > TABLE_SIZE {
            return Err(FormatError::InvalidHeader(format!(
                "alphabet count {} is outside 1..={}", alphabet_count, TABLE_SIZE)));
        }
        reader.require(ENTRY_SIZE * alphabet_count as u64)?;

        let mut freq_table = FrequencyTable::new();
        let mut last_symbol: Option<u8> = None;
        for _ in 0..alphabet_count {
            let symbol = reader.read_byte()?;
            let weight = reader.read_u32()? as u64;
            // entries are strictly ascending, which also rules out duplicates
            if last_symbol.map_or(false, |last| symbol <= last) {
                return Err(FormatError::InvalidHeader(format!(
                    "symbol {:#04x} is out of order", symbol)));
            }
            if weight == 0 {
                return Err(FormatError::InvalidHeader(format!(
                    "symbol {:#04x} has a zero weight", symbol)));
            }
            freq_table.add(symbol, weight);
            last_symbol = Some(symbol);
        }

        if freq_table.total_count != total_count {
            return Err(FormatError::InvalidHeader(format!(
                "weights sum to {} but the total character count is {}",
                freq_table.total_count, total_count)));
        }
        Ok(freq_table)
    }

    pub fn serialize(&self) -> Result<Vec<u8>, CompressError> {
        let mut writer = BitWriter::with_capacity(self.serialized_size() as usize);
        self.write_to(&mut writer)?;
        Ok(writer.into_bytes())
    }

    pub fn deserialize(bytes: &[u8]) -> Result<FrequencyTable, FormatError> {
        FrequencyTable::read_from(&mut BitReader::new(bytes))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        FrequencyTable::new()
    }
}
