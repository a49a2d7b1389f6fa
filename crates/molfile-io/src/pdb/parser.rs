//! PDB file parser
//!
//! Reads the unit cell and the atom records from fixed-column PDB text.
//! The cell and the atoms are gathered in two independent passes over the
//! same lines, so a `CRYST1` record anywhere in the file is honored.

use std::io::{BufReader, Read};

use crate::error::IoResult;
use crate::field::{field_char, float_field, int_field, string_field, Columns};
use crate::traits::ReadOptions;

use super::records::{CrystalCell, PdbAtom, PdbStructure, WideFields};

const CRYST1: &str = "CRYST1";
const ATOM: &str = "ATOM  ";
const HETATM: &str = "HETATM";

/// Initial capacity of the atom list
const INITIAL_ATOM_CAPACITY: usize = 100;

/// PDB file reader
pub struct PdbReader<R> {
    reader: BufReader<R>,
    options: ReadOptions,
}

impl<R: Read> PdbReader<R> {
    /// Create a new PDB reader
    pub fn new(reader: R) -> Self {
        PdbReader {
            reader: BufReader::new(reader),
            options: ReadOptions::default(),
        }
    }

    /// Create a PDB reader with options
    pub fn with_options(reader: R, options: ReadOptions) -> Self {
        PdbReader {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read the whole document
    pub fn read(&mut self) -> IoResult<PdbStructure> {
        let mut raw = Vec::new();
        self.reader.read_to_end(&mut raw)?;
        if raw.is_empty() {
            log::warn!("PDB input is empty");
            return Ok(PdbStructure::default());
        }

        let text = String::from_utf8_lossy(&raw);
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();

        let cell = find_cell(&lines);
        let atoms = self.collect_atoms(&lines);
        log::debug!(
            "Read {} PDB atoms (unit cell {})",
            atoms.len(),
            if cell.valid { "present" } else { "absent" }
        );

        Ok(PdbStructure {
            cell,
            atoms: Some(atoms),
        })
    }

    fn is_atom_line(&self, line: &str) -> bool {
        line.starts_with(ATOM) || (self.options.include_hetatm && line.starts_with(HETATM))
    }

    fn collect_atoms(&self, lines: &[&str]) -> Vec<PdbAtom> {
        let mut atoms = Vec::with_capacity(INITIAL_ATOM_CAPACITY);
        atoms.extend(
            lines
                .iter()
                .filter(|line| self.is_atom_line(line))
                .map(|line| parse_atom_record(line)),
        );
        atoms.shrink_to_fit();
        atoms
    }
}

/// First `CRYST1` record wins; later ones are ignored
fn find_cell(lines: &[&str]) -> CrystalCell {
    lines
        .iter()
        .find(|line| line.starts_with(CRYST1))
        .map(|line| parse_cryst1_record(line))
        .unwrap_or_default()
}

/// Parse a CRYST1 record
fn parse_cryst1_record(input: &str) -> CrystalCell {
    // CRYST1 record format (0-indexed):
    // 6-14: a (9)
    // 15-23: b (9)
    // 24-32: c (9)
    // 33-39: alpha (7)
    // 40-46: beta (7)
    // 47-53: gamma (7)
    // 54: space
    // 55-65: space group (11)
    // 66-69: z (4)
    let mut cols = Columns::new(input);
    cols.skip(CRYST1.len());

    CrystalCell {
        a: cols.take_float(9),
        b: cols.take_float(9),
        c: cols.take_float(9),
        alpha: cols.take_float(7),
        beta: cols.take_float(7),
        gamma: cols.take_float(7),
        space_group: cols.skip(1).take_string(11),
        z: cols.take_int(4),
        valid: true,
    }
}

/// Parse an ATOM (or HETATM) record
fn parse_atom_record(input: &str) -> PdbAtom {
    // Standard columns (0-indexed):
    // 6-10: serial (5)
    // 12-15: name (4)
    // 16: altLoc
    // 17-19: resName (3)
    // 21: chainID
    // 22-25: resSeq (4)
    // 26: iCode
    // 30-53: x, y, z (8 each)
    // 54-59: occupancy (6)
    // 60-65: tempFactor (6)
    // 76-77: element (2)
    // 78-79: charge (2)
    PdbAtom {
        serial: int_field(input, 6, 5),
        name: string_field(input, 12, 4),
        alt_loc: field_char(input, 16),
        residue_name: string_field(input, 17, 3),
        chain: field_char(input, 21),
        residue_seq: int_field(input, 22, 4),
        icode: field_char(input, 26),
        x: float_field(input, 30, 8),
        y: float_field(input, 38, 8),
        z: float_field(input, 46, 8),
        occupancy: float_field(input, 54, 6),
        temp_factor: float_field(input, 60, 6),
        element: string_field(input, 76, 2),
        charge: string_field(input, 78, 2),
        wide: parse_wide_fields(input),
    }
}

/// Re-read an atom line at the CHARMM/NAMD extended offsets
fn parse_wide_fields(input: &str) -> WideFields {
    WideFields {
        serial: string_field(input, 6, 6),
        residue_name: string_field(input, 17, 4),
        residue_seq: int_field(input, 22, 5),
        segment: string_field(input, 66, 10),
    }
}
