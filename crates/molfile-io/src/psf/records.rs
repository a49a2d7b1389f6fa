//! PSF record types
//!
//! Defines the signature, atom and connectivity records of a protein
//! structure file, and the document that owns them.

use crate::owned;

/// Format switches read from the first line of a PSF file
///
/// Every column width of the atom section is a function of these flags
/// (see [`AtomLayout`](super::AtomLayout)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PsfSignature {
    /// First line starts with `PSF`
    pub valid: bool,
    /// `EXT`: wide index and name columns
    pub extended: bool,
    /// `CMAP CHEQ`: two extra charge-equilibration columns per atom
    pub cmap_cheq: bool,
    /// `XPLOR`: atom types are names rather than integer codes
    pub xplor: bool,
    /// `SLB`: trailing neutron scattering length column
    pub scattering_length: bool,
}

impl PsfSignature {
    const MARKER: &'static str = "PSF";

    /// Derive the signature from the first line of a file.
    ///
    /// Keywords are matched case-sensitively anywhere on the line, in any
    /// order. A line that does not start with `PSF` yields an invalid
    /// signature with every switch off.
    pub fn parse(line: &str) -> Self {
        if !line.starts_with(Self::MARKER) {
            return PsfSignature::default();
        }

        PsfSignature {
            valid: true,
            extended: line.contains("EXT"),
            cmap_cheq: line.contains("CMAP CHEQ"),
            xplor: line.contains("XPLOR"),
            scattering_length: line.contains("SLB"),
        }
    }
}

/// IMOVE column: whether an atom is free to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mobility {
    Free,
    Fixed,
    LonePair,
    /// Any other code, kept as written
    Other(i64),
}

impl Mobility {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Mobility::Free,
            1 => Mobility::Fixed,
            -1 => Mobility::LonePair,
            other => Mobility::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Mobility::Free => 0,
            Mobility::Fixed => 1,
            Mobility::LonePair => -1,
            Mobility::Other(code) => *code,
        }
    }
}

/// Charge-equilibration parameters (`CMAP CHEQ` files only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cheq {
    pub electronegativity: f64,
    pub hardness: f64,
}

/// One record of the `!NATOM` section
///
/// String fields are copied from their columns untouched, padding included.
#[derive(Debug, Clone, PartialEq)]
pub struct PsfAtom {
    /// Segment identifier
    pub segment: String,
    /// Residue identifier (may carry an insertion letter, e.g. `27A`)
    pub residue_id: String,
    /// Residue name
    pub residue_name: String,
    /// Atom name
    pub name: String,
    /// Atom type: a name in XPLOR files, an integer code otherwise
    pub atom_type: String,
    /// Partial charge (e)
    pub charge: f64,
    /// Mass (amu)
    pub mass: f64,
    pub mobility: Mobility,
    pub cheq: Option<Cheq>,
    /// Neutron scattering length (`SLB` files only)
    pub scattering_length: Option<f64>,
}

/// Bond between two atoms, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
}

/// Angle over three atoms, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Angle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

/// Proper or improper dihedral over four atoms, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dihedral {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
}

impl From<[usize; 2]> for Bond {
    fn from([a, b]: [usize; 2]) -> Self {
        Bond { a, b }
    }
}

impl From<[usize; 3]> for Angle {
    fn from([a, b, c]: [usize; 3]) -> Self {
        Angle { a, b, c }
    }
}

impl From<[usize; 4]> for Dihedral {
    fn from([a, b, c, d]: [usize; 4]) -> Self {
        Dihedral { a, b, c, d }
    }
}

/// A parsed PSF document
///
/// Each section is `None` when it was missing or its record count did not
/// match its header. Only the atom section is essential: without it the
/// document is invalid and no later section is read.
#[derive(Debug, Clone, Default)]
pub struct PsfTopology {
    pub signature: PsfSignature,
    pub titles: Option<Vec<String>>,
    pub atoms: Option<Vec<PsfAtom>>,
    pub bonds: Option<Vec<Bond>>,
    pub angles: Option<Vec<Angle>>,
    pub dihedrals: Option<Vec<Dihedral>>,
    pub impropers: Option<Vec<Dihedral>>,
}

impl PsfTopology {
    /// Signature recognized and atom section complete
    pub fn is_valid(&self) -> bool {
        self.signature.valid && self.atoms.is_some()
    }

    pub fn title_count(&self) -> Option<usize> {
        self.titles.as_ref().map(Vec::len)
    }

    pub fn atom_count(&self) -> Option<usize> {
        self.atoms.as_ref().map(Vec::len)
    }

    pub fn bond_count(&self) -> Option<usize> {
        self.bonds.as_ref().map(Vec::len)
    }

    pub fn angle_count(&self) -> Option<usize> {
        self.angles.as_ref().map(Vec::len)
    }

    pub fn dihedral_count(&self) -> Option<usize> {
        self.dihedrals.as_ref().map(Vec::len)
    }

    pub fn improper_count(&self) -> Option<usize> {
        self.impropers.as_ref().map(Vec::len)
    }

    pub fn titles(&self) -> &[String] {
        self.titles.as_deref().unwrap_or(&[])
    }

    pub fn atoms(&self) -> &[PsfAtom] {
        self.atoms.as_deref().unwrap_or(&[])
    }

    pub fn bonds(&self) -> &[Bond] {
        self.bonds.as_deref().unwrap_or(&[])
    }

    pub fn angles(&self) -> &[Angle] {
        self.angles.as_deref().unwrap_or(&[])
    }

    pub fn dihedrals(&self) -> &[Dihedral] {
        self.dihedrals.as_deref().unwrap_or(&[])
    }

    pub fn impropers(&self) -> &[Dihedral] {
        self.impropers.as_deref().unwrap_or(&[])
    }

    /// Drop every section. The signature is kept; calling this again does
    /// nothing.
    pub fn release(&mut self) {
        owned::release(&mut self.titles);
        owned::release(&mut self.atoms);
        owned::release(&mut self.bonds);
        owned::release(&mut self.angles);
        owned::release(&mut self.dihedrals);
        owned::release(&mut self.impropers);
    }
}
