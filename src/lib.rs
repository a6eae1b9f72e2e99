// Joseph Prichard
// 1/5/2023
// Static huffman coding of byte streams into a self describing compressed format

pub mod bitwise;
pub mod code;
pub mod compress;
pub mod decompress;
pub mod error;
pub mod freq;
pub mod header;
pub mod read;
pub mod report;
pub mod threading;
pub mod tree;
pub mod utils;
pub mod write;

pub use code::{CodeTable, SymbolCode};
pub use compress::{compress, compress_with_book, encode, CodeBook};
pub use decompress::{decode, decompress, expand};
pub use error::{CompressError, Error, FormatError};
pub use freq::FrequencyTable;
pub use tree::{grow, CodeTree, Tree};
