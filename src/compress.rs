// Joseph Prichard
// 1/5/2023
// Byte-by-byte compressor

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use rayon::prelude::*;
use tracing::{debug, info, warn};
use crate::code::CodeTable;
use crate::error::{self, CompressError};
use crate::freq::FrequencyTable;
use crate::header;
use crate::threading;
use crate::tree::{self, CodeTree};
use crate::utils;
use crate::write::BitWriter;

// a codebook is everything derived from a frequency table that is needed to encode or decode
pub struct CodeBook {
    pub freq_table: FrequencyTable,
    pub tree: CodeTree,
    pub code_table: CodeTable,
}

impl CodeBook {
    // None when the table is empty as there is no tree to grow
    pub fn new(freq_table: FrequencyTable) -> Option<CodeBook> {
        let tree = tree::grow(&freq_table)?;
        let code_table = CodeTable::generate(&tree);
        debug!("Generated {} codes for {} symbols", code_table.len(), freq_table.total_count());
        Some(CodeBook { freq_table, tree, code_table })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<CodeBook, CompressError> {
        let freq_table = FrequencyTable::build(bytes);
        freq_table.check_weights()?;
        CodeBook::new(freq_table).ok_or(CompressError::EmptyInput)
    }

    pub fn alphabet_count(&self) -> u32 {
        self.freq_table.alphabet_count()
    }

    pub fn total_count(&self) -> u64 {
        self.freq_table.total_count()
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.code_table
    }

    pub fn total_bits(&self) -> u64 {
        self.code_table.total_bits()
    }

    pub fn payload_size(&self) -> u64 {
        (self.total_bits() + 7) / 8
    }

    pub fn compressed_size(&self) -> u64 {
        header::header_size(&self.freq_table) + self.payload_size()
    }

    // writes the header followed by the payload, the input must be the bytes the book was built from
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressError> {
        let mut writer = BitWriter::with_capacity(self.compressed_size() as usize);
        header::write_header(&mut writer, &self.freq_table)?;
        encode_into(&mut writer, input, &self.code_table)?;
        Ok(writer.into_bytes())
    }
}

pub fn compress(input: &[u8]) -> Result<Vec<u8>, CompressError> {
    compress_with_book(input).map(|(_, compressed)| compressed)
}

pub fn compress_with_book(input: &[u8]) -> Result<(CodeBook, Vec<u8>), CompressError> {
    let code_book = CodeBook::from_bytes(input)?;
    let compressed = code_book.compress(input)?;
    Ok((code_book, compressed))
}

// packs the code of every input byte most significant bit first, zero padding the last byte
pub fn encode(input: &[u8], code_table: &CodeTable) -> Result<Vec<u8>, CompressError> {
    let mut writer = BitWriter::with_capacity((code_table.total_bits() / 8 + 1) as usize);
    encode_into(&mut writer, input, code_table)?;
    Ok(writer.into_bytes())
}

fn encode_into(writer: &mut BitWriter, input: &[u8], code_table: &CodeTable) -> Result<(), CompressError> {
    for &byte in input {
        // a byte missing from the table means the table was not built from this input
        let symbol = code_table.get(byte).ok_or(CompressError::MissingSymbol { symbol: byte })?;
        writer.write_symbol(symbol);
    }
    writer.align_to_byte();
    Ok(())
}

// the outcome of compressing or decompressing one file, kept for the summary listing
pub struct FileReport {
    pub filename: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    pub code_book: Option<CodeBook>,
}

pub fn compress_files(entries: &[PathBuf], multithreaded: bool) -> error::Result<Vec<FileReport>> {
    let now = Instant::now();

    utils::check_output_paths(entries, utils::compressed_path)?;
    let pool = threading::configure_thread_pool(multithreaded, entries.len())?;
    // each file is compressed independently so the files can be spread over the pool
    let reports: Vec<Option<FileReport>> = pool.install(|| {
        entries.par_iter()
            .map(|entry| compress_file(entry))
            .collect::<error::Result<_>>()
    })?;

    let elapsed = now.elapsed();
    info!("Finished compressing in {:.2?}", elapsed);
    Ok(reports.into_iter().flatten().collect())
}

// compresses a file into a sibling .cmp file, empty files are skipped
pub fn compress_file(path: &Path) -> error::Result<Option<FileReport>> {
    let input = fs::read(path)?;
    let (code_book, compressed) = match compress_with_book(&input) {
        Ok(result) => result,
        Err(CompressError::EmptyInput) => {
            warn!("Skipping empty file {}", path.display());
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let output = utils::compressed_path(path);
    fs::write(&output, &compressed)?;
    info!("Compressed {} into {} ({} -> {} bytes)",
        path.display(), output.display(), input.len(), compressed.len());

    Ok(Some(FileReport {
        filename: path.to_path_buf(),
        original_size: input.len() as u64,
        compressed_size: compressed.len() as u64,
        code_book: Some(code_book),
    }))
}
