// Joseph Prichard
// 1/5/2023
// Bit-by-bit decompressor

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use rayon::prelude::*;
use tracing::{info, warn};
use crate::compress::{CodeBook, FileReport};
use crate::error::{self, FormatError};
use crate::header;
use crate::read::BitReader;
use crate::threading;
use crate::tree::Tree;
use crate::utils;

pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>, FormatError> {
    expand(compressed).map(|(_, output)| output)
}

// decompresses and also hands back the codebook rebuilt from the header
pub fn expand(compressed: &[u8]) -> Result<(CodeBook, Vec<u8>), FormatError> {
    let reader = &mut BitReader::new(compressed);
    let code_book = read_code_book(reader)?;

    // the payload must hold every coded bit before anything is decoded
    let payload_size = code_book.payload_size();
    reader.require(payload_size)?;
    let start = reader.byte_position() as usize;
    let end = start + payload_size as usize;
    if end < compressed.len() {
        warn!("Ignoring {} trailing bytes after the payload", compressed.len() - end);
    }

    let output = decode(&compressed[start..end], &code_book.tree.root, code_book.total_bits())?;
    Ok((code_book, output))
}

// reads only the header and rebuilds the codebook from it
pub fn read_code_book(reader: &mut BitReader) -> Result<CodeBook, FormatError> {
    let freq_table = header::read_header(reader)?;
    // invariant: a header that passed validation has at least one symbol
    CodeBook::new(freq_table)
        .ok_or_else(|| FormatError::InvalidHeader(String::from("header has no symbols")))
}

// walks the tree one bit at a time for exactly total_bits bits, pad bits are never read
pub fn decode(payload: &[u8], root: &Tree, total_bits: u64) -> Result<Vec<u8>, FormatError> {
    let reader = &mut BitReader::new(payload);
    let mut output = Vec::with_capacity(root.weight as usize);

    let mut node = root;
    while reader.bit_position() < total_bits {
        let bit_offset = reader.bit_position();
        let bit = reader.read_bit()?;
        node = node.child(bit)
            .ok_or(FormatError::InvalidCode { bit_offset })?;
        if node.is_leaf() {
            output.push(node.plain_symbol);
            node = root;
        }
    }

    // the last code must end exactly on the last coded bit
    if !std::ptr::eq(node, root) {
        return Err(FormatError::InvalidCode { bit_offset: total_bits });
    }
    Ok(output)
}

pub fn decompress_files(entries: &[PathBuf], multithreaded: bool) -> error::Result<Vec<FileReport>> {
    let now = Instant::now();

    utils::check_output_paths(entries, utils::decompressed_path)?;
    let pool = threading::configure_thread_pool(multithreaded, entries.len())?;
    // decompress each file, this can be parallelized because each file is written to a different path
    let reports = pool.install(|| {
        entries.par_iter()
            .map(|entry| decompress_file(entry))
            .collect::<error::Result<Vec<_>>>()
    })?;

    let elapsed = now.elapsed();
    info!("Finished decompressing in {:.2?}", elapsed);
    Ok(reports)
}

pub fn decompress_file(path: &Path) -> error::Result<FileReport> {
    let compressed = fs::read(path)?;
    let (code_book, output) = expand(&compressed)?;

    let output_path = utils::decompressed_path(path);
    fs::write(&output_path, &output)?;
    info!("Decompressed {} into {} ({} -> {} bytes)",
        path.display(), output_path.display(), compressed.len(), output.len());

    Ok(FileReport {
        filename: output_path,
        original_size: output.len() as u64,
        compressed_size: compressed.len() as u64,
        code_book: Some(code_book),
    })
}

// reads the header of a compressed file without decoding the payload
pub fn list_file(path: &Path) -> error::Result<FileReport> {
    let compressed = fs::read(path)?;
    let code_book = read_code_book(&mut BitReader::new(&compressed))?;
    Ok(FileReport {
        filename: path.to_path_buf(),
        original_size: code_book.total_count(),
        compressed_size: compressed.len() as u64,
        code_book: Some(code_book),
    })
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use super::*;
    use crate::compress::{compress, compress_file};
    use crate::error::Error;
    use crate::header::TAG_LEN;
    use crate::utils::fixtures::{random_bytes, TempDir};

    #[test]
    fn test_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let len = rng.gen_range(1..10_000);
            let alphabet = rng.gen_range(0..=255u8);
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen_range(0..=alphabet)).collect();
            let compressed = compress(&bytes).unwrap();
            assert_eq!(decompress(&compressed).unwrap(), bytes);
        }
    }

    #[test]
    fn test_round_trip_text() {
        let text = b"Huffman coding is a greedy algorithm that builds optimal prefix codes. \
            The quick brown fox jumps over the lazy dog.";
        let (code_book, output) = expand(&compress(text).unwrap()).unwrap();
        assert_eq!(output, text.to_vec());
        assert_eq!(code_book.total_count(), text.len() as u64);
    }

    #[test]
    fn test_round_trip_single_symbol() {
        let bytes = vec![0x41; 1000];
        assert_eq!(decompress(&compress(&bytes).unwrap()).unwrap(), bytes);

        let bytes = vec![0x00];
        assert_eq!(decompress(&compress(&bytes).unwrap()).unwrap(), bytes);
    }

    #[test]
    fn test_round_trip_full_alphabet() {
        let bytes = random_bytes(20_000);
        assert_eq!(decompress(&compress(&bytes).unwrap()).unwrap(), bytes);
    }

    #[test]
    fn test_bad_magic_tag() {
        let compressed = compress(b"some text to compress").unwrap();
        for i in 0..TAG_LEN {
            let mut corrupt = compressed.clone();
            corrupt[i] ^= 0xFF;
            assert_eq!(decompress(&corrupt), Err(FormatError::BadMagicTag));
        }
    }

    #[test]
    fn test_truncated_payload() {
        let compressed = compress(b"some text to compress").unwrap();
        for len in TAG_LEN..compressed.len() {
            let result = decompress(&compressed[..len]);
            assert!(matches!(result, Err(FormatError::Truncated { .. })), "length {}", len);
        }
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut compressed = compress(b"trailing").unwrap();
        compressed.extend_from_slice(&[0xAB, 0xCD]);
        assert_eq!(decompress(&compressed).unwrap(), b"trailing".to_vec());
    }

    #[test]
    fn test_absent_child() {
        // a single symbol only has a left branch, a 1 bit selects nothing
        let mut compressed = compress(&[b'z'; 8]).unwrap();
        let last = compressed.len() - 1;
        compressed[last] = 0b0001_0000;
        assert_eq!(decompress(&compressed), Err(FormatError::InvalidCode { bit_offset: 3 }));
    }

    #[test]
    fn test_decode_stops_at_total_bits() {
        // a = 00, b = 01, c = 1; pad bits of 1 would decode as extra c symbols
        let code_book = CodeBook::from_bytes(b"abbcccc").unwrap();
        let output = decode(&[0b0001_1111], &code_book.tree.root, 5).unwrap();
        assert_eq!(output, b"abc".to_vec());

        // ending in the middle of a code is rejected
        assert_eq!(
            decode(&[0b0001_1111], &code_book.tree.root, 3),
            Err(FormatError::InvalidCode { bit_offset: 3 }));
    }

    #[test]
    fn test_decompress_file() {
        let dir = TempDir::new();
        let bytes = random_bytes(3000);
        let path = dir.create_file("data.bin", &bytes);
        compress_file(&path).unwrap();

        let report = decompress_file(&dir.path.join("data.cmp")).unwrap();
        assert_eq!(report.filename, dir.path.join("data"));
        assert_eq!(fs::read(dir.path.join("data")).unwrap(), bytes);

        let listed = list_file(&dir.path.join("data.cmp")).unwrap();
        assert_eq!(listed.original_size, 3000);
        assert_eq!(listed.compressed_size, report.compressed_size);
    }

    #[test]
    fn test_decompress_files_rejects_bad_file() {
        let dir = TempDir::new();
        let path = dir.create_file("bad.cmp", b"not a huffzip file at all");
        let result = decompress_files(&[path], false);
        assert!(matches!(result, Err(Error::Format(FormatError::BadMagicTag))));
        assert!(!dir.path.join("bad").exists());
    }
}
