//! Transparent gzip input
//!
//! Text structure and topology files are often shipped compressed. Anything
//! ending in `.gz` is decoded on the fly.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::IoResult;

/// Check if a path indicates a gzip file (by extension)
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Open a file for reading, decompressing it if the path ends in `.gz`
pub fn open_file(path: &Path) -> IoResult<Box<dyn Read>> {
    let file = File::open(path)?;

    if is_gzip_path(path) {
        log::debug!("Reading {} through gzip decoder", path.display());
        Ok(Box::new(GzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
