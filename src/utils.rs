// Joseph Prichard
// 1/5/2023
// Utilities for paths, tags, and test fixtures

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use crate::error::{self, Error};

// converts a string into a zero padded 8 byte tag
pub const fn str_to_tag(str: &str) -> [u8; 8] {
    let mut buffer = [0u8; 8];
    let mut i = 0;
    while i < str.len() && i < 8 {
        buffer[i] = str.as_bytes()[i];
        i += 1;
    }
    buffer
}

pub fn get_no_ext(path: &Path) -> PathBuf {
    path.with_extension("")
}

// never the input itself: an input already ending in .cmp gets a second extension
pub fn compressed_path(path: &Path) -> PathBuf {
    if path.extension().map_or(false, |ext| ext == "cmp") {
        let mut name = path.as_os_str().to_os_string();
        name.push(".cmp");
        PathBuf::from(name)
    } else {
        path.with_extension("cmp")
    }
}

// strips the extension, or appends one if there is nothing to strip
pub fn decompressed_path(path: &Path) -> PathBuf {
    let no_ext = get_no_ext(path);
    if no_ext == path {
        path.with_extension("out")
    } else {
        no_ext
    }
}

// every input must map to its own output and no output may land on an input
pub fn check_output_paths(entries: &[PathBuf], output_path: fn(&Path) -> PathBuf) -> error::Result<()> {
    let mut outputs: HashMap<PathBuf, &PathBuf> = HashMap::new();
    for entry in entries {
        let output = output_path(entry);
        if let Some(input) = entries.iter().find(|input| **input == output) {
            return Err(Error::OverwritesInput { input: input.clone(), output });
        }
        if let Some(first) = outputs.insert(output.clone(), entry) {
            return Err(Error::OutputClash { output, first: first.clone(), second: entry.clone() });
        }
    }
    Ok(())
}
