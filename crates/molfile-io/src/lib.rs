//! Molecular structure and topology file I/O
//!
//! This crate provides readers for the text formats used alongside
//! CHARMM/NAMD simulations:
//!
//! - **PDB** - fixed-column coordinate files (`CRYST1` and `ATOM` records)
//! - **PSF** - protein structure files, in every combination of the
//!   `EXT`, `XPLOR`, `CMAP CHEQ` and `SLB` column variants
//!
//! Both documents can be reduced to a minimal [`CommonAtom`] view through
//! [`read_struct`], which dispatches on the file extension.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let psf = molfile_io::psf::read_psf(Path::new("system.psf")).unwrap();
//! if psf.is_valid() {
//!     println!("{} atoms, {:?} bonds", psf.atoms().len(), psf.bond_count());
//! }
//!
//! let atoms = molfile_io::read_struct(Path::new("system.pdb")).unwrap();
//! for atom in &atoms {
//!     println!("{} {} {:+.1}", atom.residue_type, atom.name, atom.charge);
//! }
//! ```

pub mod atoms;
pub mod compress;
pub mod error;
pub mod field;
pub mod owned;
pub mod pdb;
pub mod psf;
pub mod traits;

pub use atoms::{read_struct, read_struct_with, CommonAtom};
pub use error::{IoError, IoResult};
pub use traits::{AtomSource, FileFormat, ReadOptions};
