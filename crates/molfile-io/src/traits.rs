//! Format identification, read options and the common-atom seam
//!
//! Defines what the structure and topology readers have in common.

use std::path::Path;

use crate::atoms::CommonAtom;
use crate::compress::is_gzip_path;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Protein Data Bank fixed-column format
    Pdb,
    /// CHARMM/X-PLOR protein structure file
    Psf,
    /// CHARMM/NAMD binary trajectory
    Dcd,
    /// Unknown format
    Unknown,
}

impl FileFormat {
    /// Get the file format from a file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdb" => FileFormat::Pdb,
            "psf" => FileFormat::Psf,
            "dcd" => FileFormat::Dcd,
            _ => FileFormat::Unknown,
        }
    }

    /// Get the file format from a path
    ///
    /// A trailing `.gz` is looked through, so `model.pdb.gz` is a PDB file.
    pub fn from_path(path: &Path) -> Self {
        let path = if is_gzip_path(path) {
            Path::new(path.file_stem().unwrap_or_default())
        } else {
            path
        };

        path.extension()
            .and_then(|s| s.to_str())
            .map(FileFormat::from_extension)
            .unwrap_or(FileFormat::Unknown)
    }

    /// Get the default file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Pdb => "pdb",
            FileFormat::Psf => "psf",
            FileFormat::Dcd => "dcd",
            FileFormat::Unknown => "",
        }
    }

    /// Get a human-readable name for the format
    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Pdb => "PDB",
            FileFormat::Psf => "PSF",
            FileFormat::Dcd => "DCD",
            FileFormat::Unknown => "Unknown",
        }
    }

    /// Whether the format carries per-atom records that reduce to [`CommonAtom`]
    pub fn has_atoms(&self) -> bool {
        matches!(self, FileFormat::Pdb | FileFormat::Psf)
    }
}

/// A parsed document that can be reduced to the minimal common atom view
pub trait AtomSource {
    /// Build one [`CommonAtom`] per atom record.
    ///
    /// Returns `None` when the document has no usable atom list (an invalid
    /// PSF, or a PDB read from an empty file).
    fn common_atoms(&self, options: &ReadOptions) -> Option<Vec<CommonAtom>>;
}

/// Options for reading structure and topology files
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Also accept `HETATM` records in PDB files
    pub include_hetatm: bool,
    /// Trim blanks from the string fields of produced [`CommonAtom`]s
    pub trim_fields: bool,
}

impl ReadOptions {
    /// Create default read options: `ATOM` records only, fields untrimmed
    pub fn new() -> Self {
        ReadOptions::default()
    }

    /// Set whether to accept `HETATM` records
    pub fn with_hetatm(mut self, include_hetatm: bool) -> Self {
        self.include_hetatm = include_hetatm;
        self
    }

    /// Set whether to trim common atom fields
    pub fn with_trimmed_fields(mut self, trim_fields: bool) -> Self {
        self.trim_fields = trim_fields;
        self
    }
}
