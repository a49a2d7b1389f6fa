//! CHARMM/NAMD DCD trajectory access
//!
//! A DCD file is a fixed binary header followed by fixed-size frames, so any
//! frame can be reached with one seek. [`DcdFile`] keeps the file open and
//! exposes a frame cursor: position it with [`DcdFile::go_to_frame`] or
//! [`DcdFile::next_frame`], then read or overwrite the unit cell and
//! coordinate blocks of the frame under the cursor.
//!
//! ```no_run
//! use std::path::Path;
//! use molfile_dcd::DcdFile;
//!
//! let mut dcd = DcdFile::open(Path::new("run.dcd")).unwrap();
//! for frame in 0..dcd.n_frames() {
//!     dcd.go_to_frame(frame).unwrap();
//!     let [a, b, c] = dcd.read_unit_cell().unwrap();
//!     let coords = dcd.read_coords().unwrap();
//!     println!("{frame}: box {a} x {b} x {c}, first x = {}", coords.x[0]);
//! }
//! ```
//!
//! Only little-endian files with a unit cell block in every frame (the
//! CHARMM and NAMD default for periodic systems) are supported.

mod error;
mod file;
pub mod layout;

pub use error::{DcdError, DcdResult};
pub use file::{Coordinates, DcdFile, DcdHeader, Frame};
