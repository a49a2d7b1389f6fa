//! PSF file format reader
//!
//! Reads CHARMM/X-PLOR protein structure files. The column layout of the
//! atom section is selected by keywords on the first line (`EXT`, `XPLOR`,
//! `CMAP CHEQ`, `SLB`), in any combination.

mod layout;
mod parser;
mod records;

pub use layout::{AtomLayout, Section};
pub use parser::PsfReader;
pub use records::*;

use std::io::Read;
use std::path::Path;

use crate::error::IoResult;

/// Read a PSF file from a path
///
/// Fails only if the file cannot be opened or read. A file that opens but
/// is not a usable PSF comes back with [`PsfTopology::is_valid`] false.
pub fn read_psf(path: &Path) -> IoResult<PsfTopology> {
    let file = crate::compress::open_file(path)?;
    PsfReader::new(file).read()
}

/// Read a PSF file from a string
pub fn read_psf_str(content: &str) -> IoResult<PsfTopology> {
    PsfReader::new(content.as_bytes()).read()
}

/// Read a PSF file from a reader
pub fn read_psf_from<R: Read>(reader: R) -> IoResult<PsfTopology> {
    PsfReader::new(reader).read()
}
