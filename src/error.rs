// Joseph Prichard
// 1/5/2023
// Error types for compressing and decompressing

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompressError {
    // nothing to build a tree from, callers should skip the input
    #[error("cannot compress an empty input")]
    EmptyInput,

    #[error("symbol {symbol:#04x} occurs {weight} times which does not fit a 4 byte weight")]
    WeightOverflow { symbol: u8, weight: u64 },

    #[error("symbol {symbol:#04x} has no code in the code table")]
    MissingSymbol { symbol: u8 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("input is not a huffzip file: bad magic tag")]
    BadMagicTag,

    #[error("input is truncated: needed {needed} bytes but only {available} are present")]
    Truncated { needed: u64, available: u64 },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid code in payload at bit {bit_offset}")]
    InvalidCode { bit_offset: u64 },
}

// application level error for the file commands
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Compress(#[from] CompressError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("{} and {} would both be written to {}", .first.display(), .second.display(), .output.display())]
    OutputClash { output: PathBuf, first: PathBuf, second: PathBuf },

    #[error("output {} would overwrite the input {}", .output.display(), .input.display())]
    OverwritesInput { input: PathBuf, output: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FormatError::Truncated { needed: 20, available: 12 };
        assert_eq!(err.to_string(), "input is truncated: needed 20 bytes but only 12 are present");

        let err = CompressError::WeightOverflow { symbol: 0x41, weight: 1 << 33 };
        assert!(err.to_string().starts_with("symbol 0x41 occurs"));
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = FormatError::BadMagicTag.into();
        assert!(matches!(err, Error::Format(FormatError::BadMagicTag)));
        assert_eq!(err.to_string(), FormatError::BadMagicTag.to_string());

        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
