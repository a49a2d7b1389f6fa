//! Minimal common atom view over PDB and PSF documents
//!
//! Tools that only need to know which segment, residue and name an atom
//! has, and what charge it carries, can read either format through
//! [`read_struct`].

use std::path::Path;

use crate::error::{IoError, IoResult};
use crate::pdb::{self, PdbStructure};
use crate::psf::{self, PsfTopology};
use crate::traits::{AtomSource, FileFormat, ReadOptions};

/// Format-independent atom record
#[derive(Debug, Clone, PartialEq)]
pub struct CommonAtom {
    pub segment: String,
    pub residue_id: String,
    pub residue_type: String,
    pub name: String,
    pub charge: f64,
}

impl CommonAtom {
    fn new(
        segment: &str,
        residue_id: &str,
        residue_type: &str,
        name: &str,
        charge: f64,
        options: &ReadOptions,
    ) -> Self {
        let text = |s: &str| {
            if options.trim_fields {
                s.trim().to_string()
            } else {
                s.to_string()
            }
        };
        CommonAtom {
            segment: text(segment),
            residue_id: text(residue_id),
            residue_type: text(residue_type),
            name: text(name),
            charge,
        }
    }
}

impl AtomSource for PsfTopology {
    fn common_atoms(&self, options: &ReadOptions) -> Option<Vec<CommonAtom>> {
        if !self.is_valid() {
            return None;
        }
        let atoms = self
            .atoms()
            .iter()
            .map(|atom| {
                CommonAtom::new(
                    &atom.segment,
                    &atom.residue_id,
                    &atom.residue_name,
                    &atom.name,
                    atom.charge,
                    options,
                )
            })
            .collect();
        Some(atoms)
    }
}

/// PDB atoms are mapped through their wide CHARMM fields: the 10-column
/// segment, the 5-column residue number and the 4-column residue name.
impl AtomSource for PdbStructure {
    fn common_atoms(&self, options: &ReadOptions) -> Option<Vec<CommonAtom>> {
        let atoms = self.atoms.as_ref()?;
        let atoms = atoms
            .iter()
            .map(|atom| {
                CommonAtom::new(
                    &atom.wide.segment,
                    &atom.wide.residue_seq.to_string(),
                    &atom.wide.residue_name,
                    &atom.name,
                    atom.formal_charge(),
                    options,
                )
            })
            .collect();
        Some(atoms)
    }
}

/// Read the common atom view of a `.psf` or `.pdb` file
pub fn read_struct(path: &Path) -> IoResult<Vec<CommonAtom>> {
    read_struct_with(path, &ReadOptions::default())
}

/// Read the common atom view of a `.psf` or `.pdb` file with options
///
/// Dispatch is by extension only; the content is never sniffed.
pub fn read_struct_with(path: &Path, options: &ReadOptions) -> IoResult<Vec<CommonAtom>> {
    let format = FileFormat::from_path(path);
    if !format.has_atoms() {
        return Err(IoError::unknown_format(path.display().to_string()));
    }

    let atoms = match format {
        FileFormat::Psf => {
            let doc = psf::read_psf(path)?;
            doc.common_atoms(options).ok_or_else(|| {
                IoError::invalid_document(format.name(), "missing or inconsistent atom section")
            })?
        }
        _ => {
            let doc = pdb::read_pdb_with(path, options.clone())?;
            doc.common_atoms(options).ok_or(IoError::EmptyFile)?
        }
    };

    log::debug!(
        "Read {} atoms from {} file {}",
        atoms.len(),
        format.name(),
        path.display()
    );
    Ok(atoms)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDB: &str = "\
ATOM      1  N   MET A   1      27.340  24.430   2.614  1.00  9.67      PROA N1+
ATOM      2  OD1 ASP A   2      26.266  25.413   2.842  1.00 10.38      PROA O2-
ATOM      3  OH2 TIP3W1000      -1.525   2.374  -0.361  1.00  0.00      WT1  O
";

    #[test]
    fn test_pdb_common_atoms() {
        let doc = pdb::read_pdb_str(PDB).unwrap();
        let atoms = doc.common_atoms(&ReadOptions::default()).unwrap();

        assert_eq!(atoms.len(), 3);
        assert_eq!(atoms[0].segment, "      PROA");
        assert_eq!(atoms[0].residue_id, "1");
        assert_eq!(atoms[0].residue_type, "MET ");
        assert_eq!(atoms[0].name, " N  ");
        assert_eq!(atoms[0].charge, 1.0);
        assert_eq!(atoms[1].charge, -2.0);
        assert_eq!(atoms[2].residue_type, "TIP3");
        assert_eq!(atoms[2].residue_id, "1000");
        assert_eq!(atoms[2].charge, 0.0);
    }

    #[test]
    fn test_trimmed_fields() {
        let doc = pdb::read_pdb_str(PDB).unwrap();
        let options = ReadOptions::new().with_trimmed_fields(true);
        let atoms = doc.common_atoms(&options).unwrap();

        assert_eq!(atoms[0].segment, "PROA");
        assert_eq!(atoms[0].residue_type, "MET");
        assert_eq!(atoms[0].name, "N");
        assert_eq!(atoms[2].segment, "WT1");
    }

    #[test]
    fn test_psf_common_atoms() {
        let psf = format!(
            "PSF EXT\n\n         1 !NATOM\n{:>10} {:<8} {:<8} {:<8} {:<8} {:<4} {:>14.6}{:>14.6}{:>8}\n\n",
            1, "SOLV", "27A", "TIP3", "OH2", "75", -0.834, 15.9994, 0
        );
        let doc = psf::read_psf_str(&psf).unwrap();
        let atoms = doc.common_atoms(&ReadOptions::default()).unwrap();

        assert_eq!(
            atoms,
            vec![CommonAtom {
                segment: "SOLV    ".to_string(),
                residue_id: "27A     ".to_string(),
                residue_type: "TIP3    ".to_string(),
                name: "OH2     ".to_string(),
                charge: -0.834,
            }]
        );
    }

    #[test]
    fn test_invalid_psf_has_no_common_atoms() {
        let doc = psf::read_psf_str("PSF\n\n       2 !NATOM\n\n").unwrap();
        assert!(doc.common_atoms(&ReadOptions::default()).is_none());
    }

    #[test]
    fn test_empty_pdb_has_no_common_atoms() {
        let doc = pdb::read_pdb_str("").unwrap();
        assert!(doc.common_atoms(&ReadOptions::default()).is_none());
    }

    #[test]
    fn test_unknown_extension() {
        let err = read_struct(Path::new("coordinates.xyz")).unwrap_err();
        assert!(matches!(err, IoError::UnknownFormat(_)));

        let err = read_struct(Path::new("trajectory.dcd")).unwrap_err();
        assert!(matches!(err, IoError::UnknownFormat(_)));
    }
}
