//! PSF section tags and atom column layout
//!
//! The CHARMM atom formats, as written by `psfres.src`:
//!
//! ```text
//! standard   (I8, 1X,A4, 1X,A4, 1X,A4, 1X,A4, 1X,I4, 1X,2G14.6,I8)
//! XPLOR      (I8, 1X,A4, 1X,A4, 1X,A4, 1X,A4, 1X,A4, 1X,2G14.6,I8)
//! EXT        (I10,1X,A8, 1X,A8, 1X,A8, 1X,A8, 1X,I4, 1X,2G14.6,I8)
//! EXT XPLOR  (I10,1X,A8, 1X,A8, 1X,A8, 1X,A8, 1X,A6, 1X,2G14.6,I8)
//! ```
//!
//! `CMAP CHEQ` appends `2G14.6` and `SLB` appends `1X,G14.6`.

use super::records::PsfSignature;

/// Width of each real-valued column (charge, mass, CHEQ terms, scattering length)
pub const REAL_WIDTH: usize = 14;
/// Width of the IMOVE column
pub const MOBILITY_WIDTH: usize = 8;
/// Blank separator between text columns
pub const GAP: usize = 1;

/// The sections of a PSF file, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Titles,
    Atoms,
    Bonds,
    Angles,
    Dihedrals,
    Impropers,
}

impl Section {
    /// Header token that introduces the section, preceded by its count
    pub fn tag(&self) -> &'static str {
        match self {
            Section::Titles => "!NTITLE",
            Section::Atoms => "!NATOM",
            Section::Bonds => "!NBOND",
            Section::Angles => "!NTHETA",
            Section::Dihedrals => "!NPHI",
            Section::Impropers => "!NIMPHI",
        }
    }

    /// Atoms per record: 2 for bonds, 3 for angles, 4 for dihedrals
    pub fn arity(&self) -> usize {
        match self {
            Section::Titles | Section::Atoms => 1,
            Section::Bonds => 2,
            Section::Angles => 3,
            Section::Dihedrals | Section::Impropers => 4,
        }
    }

    /// Records packed onto one line
    pub fn per_line(&self) -> usize {
        match self {
            Section::Titles | Section::Atoms => 1,
            Section::Bonds => 4,
            Section::Angles => 3,
            Section::Dihedrals | Section::Impropers => 2,
        }
    }

    /// Most integers a line of this section can hold
    pub fn max_indices_per_line(&self) -> usize {
        self.arity() * self.per_line()
    }
}

/// Column widths of an atom line for one signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomLayout {
    /// Atom index
    pub index: usize,
    /// Segment, residue id, residue name and atom name
    pub name: usize,
    /// Atom type
    pub atom_type: usize,
    /// Electronegativity and hardness columns follow IMOVE
    pub cheq: bool,
    /// Scattering length column ends the line
    pub scattering_length: bool,
}

impl AtomLayout {
    pub fn from_signature(signature: &PsfSignature) -> Self {
        AtomLayout {
            index: if signature.extended { 10 } else { 8 },
            name: if signature.extended { 8 } else { 4 },
            atom_type: if signature.extended && signature.xplor {
                6
            } else {
                4
            },
            cheq: signature.cmap_cheq,
            scattering_length: signature.scattering_length,
        }
    }

    /// Nominal length of a complete atom line
    pub fn line_width(&self) -> usize {
        let mut width = self.index
            + 4 * (GAP + self.name)
            + GAP
            + self.atom_type
            + GAP
            + 2 * REAL_WIDTH
            + MOBILITY_WIDTH;
        if self.cheq {
            width += 2 * REAL_WIDTH;
        }
        if self.scattering_length {
            width += GAP + REAL_WIDTH;
        }
        width
    }
}
