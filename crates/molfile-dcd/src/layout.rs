//! Byte layout of a DCD file
//!
//! DCD files are Fortran unformatted sequential files: every record is
//! bracketed by a 4-byte marker holding the record length. All offsets
//! below count those markers.
//!
//! ```text
//! header   [84] "CORD" nframes ... [84]
//! titles   [4+80*ts] ts  title * ts  [4+80*ts]
//! atoms    [4] natoms [4]
//! frame    [48] cell: 6 x f64 [48]
//!          [4n] x: n x f32 [4n]
//!          [4n] y: n x f32 [4n]
//!          [4n] z: n x f32 [4n]
//! ```
//!
//! The unit cell is stored in CHARMM order `A, gamma, B, beta, alpha, C`,
//! with the angles written either in degrees or as cosines depending on the
//! program that produced the file.

/// Size of a Fortran record marker
pub const MARKER: u64 = 4;

/// Frame count, inside the first header record
pub const FRAME_COUNT_OFFSET: u64 = 8;

/// Title count, first field of the title record
pub const TITLE_COUNT_OFFSET: u64 = 96;

/// Length of one title line
pub const TITLE_LINE: u64 = 80;

/// Unit cell values per frame
pub const CELL_VALUES: usize = 6;

/// Unit cell record including both markers
pub const CELL_BLOCK: u64 = MARKER + 8 * CELL_VALUES as u64 + MARKER;

/// Cell slots holding the box edge lengths A, B and C
pub const CELL_LENGTH_SLOTS: [usize; 3] = [0, 2, 5];

/// Fixed part of every frame: the cell block plus markers around three arrays
pub const FRAME_OVERHEAD: u64 = CELL_BLOCK + 3 * 2 * MARKER;

/// Offset of the atom count, after `title_count` title lines
pub fn atom_count_offset(title_count: u64) -> u64 {
    // title count field, titles, closing title marker, opening atom marker
    TITLE_COUNT_OFFSET + 4 + TITLE_LINE * title_count + 2 * MARKER
}

/// Offset of frame 0
pub fn first_frame_offset(title_count: u64) -> u64 {
    atom_count_offset(title_count) + 4 + MARKER
}

/// Bytes per frame
pub fn frame_size(n_atoms: usize) -> u64 {
    12 * n_atoms as u64 + FRAME_OVERHEAD
}

/// Offset of cell value `slot` from the start of its frame
pub fn cell_slot_offset(slot: usize) -> u64 {
    MARKER + 8 * slot as u64
}

/// Offset of the coordinate array for `axis` (0 = x, 1 = y, 2 = z) from
/// the start of its frame
pub fn coord_array_offset(n_atoms: usize, axis: usize) -> u64 {
    CELL_BLOCK + MARKER + axis as u64 * (4 * n_atoms as u64 + 2 * MARKER)
}
