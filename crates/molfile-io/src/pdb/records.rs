//! PDB record types
//!
//! Defines the data structures for the records the reader understands.

use crate::owned;

/// Unit cell from the first `CRYST1` record
#[derive(Debug, Clone, PartialEq)]
pub struct CrystalCell {
    /// Edge length a (Angstroms)
    pub a: f64,
    /// Edge length b (Angstroms)
    pub b: f64,
    /// Edge length c (Angstroms)
    pub c: f64,
    /// Angle between b and c (degrees)
    pub alpha: f64,
    /// Angle between a and c (degrees)
    pub beta: f64,
    /// Angle between a and b (degrees)
    pub gamma: f64,
    /// Space group symbol, 11 columns untrimmed
    pub space_group: String,
    /// Z value
    pub z: i64,
    /// Whether a `CRYST1` record was found
    pub valid: bool,
}

impl Default for CrystalCell {
    fn default() -> Self {
        CrystalCell {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            alpha: 0.0,
            beta: 0.0,
            gamma: 0.0,
            space_group: String::new(),
            z: -1,
            valid: false,
        }
    }
}

/// Fields read at the wider, non-standard offsets used by CHARMM and NAMD
///
/// These overlap the standard columns: a five-digit serial overflowing into
/// column 11, four-character residue names, residue numbers reaching into
/// the insertion code column, and the segment identifier spanning columns
/// 66-76.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideFields {
    /// Serial number, 6 columns
    pub serial: String,
    /// Residue name, 4 columns
    pub residue_name: String,
    /// Residue sequence number, 5 columns
    pub residue_seq: i64,
    /// Segment identifier, 10 columns
    pub segment: String,
}

/// Parsed ATOM record
///
/// String fields keep their column padding.
#[derive(Debug, Clone, PartialEq)]
pub struct PdbAtom {
    /// Atom serial number
    pub serial: i64,
    /// Atom name (4 columns)
    pub name: String,
    /// Alternate location indicator
    pub alt_loc: char,
    /// Residue name (3 columns)
    pub residue_name: String,
    /// Chain identifier
    pub chain: char,
    /// Residue sequence number
    pub residue_seq: i64,
    /// Insertion code
    pub icode: char,
    /// X coordinate (Angstroms)
    pub x: f64,
    /// Y coordinate (Angstroms)
    pub y: f64,
    /// Z coordinate (Angstroms)
    pub z: f64,
    /// Occupancy
    pub occupancy: f64,
    /// Temperature factor (B-factor)
    pub temp_factor: f64,
    /// Element symbol (2 columns)
    pub element: String,
    /// Charge code (2 columns, e.g. `2-`)
    pub charge: String,
    /// Same line read at the non-standard offsets
    pub wide: WideFields,
}

impl Default for PdbAtom {
    fn default() -> Self {
        PdbAtom {
            serial: 0,
            name: String::new(),
            alt_loc: ' ',
            residue_name: String::new(),
            chain: ' ',
            residue_seq: 0,
            icode: ' ',
            x: 0.0,
            y: 0.0,
            z: 0.0,
            occupancy: 0.0,
            temp_factor: 0.0,
            element: String::new(),
            charge: String::new(),
            wide: WideFields::default(),
        }
    }
}

impl PdbAtom {
    /// Numeric value of the two-column charge code
    pub fn formal_charge(&self) -> f64 {
        decode_charge(&self.charge)
    }
}

/// Decode a PDB charge code: a digit followed by `+` or `-`.
///
/// `"2-"` is -2, `"1+"` is +1. Anything else, blanks included, is 0.
pub fn decode_charge(code: &str) -> f64 {
    match code.as_bytes() {
        [digit @ b'0'..=b'9', sign, ..] => {
            let magnitude = f64::from(*digit - b'0');
            match *sign {
                b'+' => magnitude,
                b'-' => -magnitude,
                _ => 0.0,
            }
        }
        _ => 0.0,
    }
}

/// A parsed PDB document
#[derive(Debug, Clone, Default)]
pub struct PdbStructure {
    /// Unit cell, `valid == false` if the file had no `CRYST1` record
    pub cell: CrystalCell,
    /// Atom records, `None` if the input was empty
    pub atoms: Option<Vec<PdbAtom>>,
}

impl PdbStructure {
    /// Number of atom records, `None` if the input could not be read
    pub fn atom_count(&self) -> Option<usize> {
        self.atoms.as_ref().map(Vec::len)
    }

    /// Atom records, empty if there are none
    pub fn atoms(&self) -> &[PdbAtom] {
        self.atoms.as_deref().unwrap_or(&[])
    }

    /// Drop the atom records. Safe to call more than once.
    pub fn release(&mut self) {
        owned::release(&mut self.atoms);
    }
}
