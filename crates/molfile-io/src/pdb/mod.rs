//! PDB file format reader
//!
//! Reads the unit cell (`CRYST1`) and atom records (`ATOM`) of Protein Data
//! Bank files, including the wide CHARMM/NAMD variants of the residue and
//! segment columns.

mod parser;
mod records;

pub use parser::PdbReader;
pub use records::*;

use std::io::Read;
use std::path::Path;

use crate::error::IoResult;
use crate::traits::ReadOptions;

/// Read a PDB file from a path
pub fn read_pdb(path: &Path) -> IoResult<PdbStructure> {
    read_pdb_with(path, ReadOptions::default())
}

/// Read a PDB file from a path with options
pub fn read_pdb_with(path: &Path, options: ReadOptions) -> IoResult<PdbStructure> {
    let file = crate::compress::open_file(path)?;
    PdbReader::with_options(file, options).read()
}

/// Read a PDB file from a string
pub fn read_pdb_str(content: &str) -> IoResult<PdbStructure> {
    PdbReader::new(content.as_bytes()).read()
}

/// Read a PDB file from a reader
pub fn read_pdb_from<R: Read>(reader: R) -> IoResult<PdbStructure> {
    PdbReader::new(reader).read()
}
