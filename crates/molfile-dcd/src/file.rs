//! Random-access DCD reader and writer

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{DcdError, DcdResult};
use crate::layout;

/// Counts and offsets fixed when the file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcdHeader {
    /// Frame count recorded in the header
    pub n_frames: usize,
    /// Atoms per frame
    pub n_atoms: usize,
    /// Number of 80-byte title lines
    pub n_titles: usize,
    /// Byte offset of frame 0
    pub first_frame_offset: u64,
}

/// One frame's coordinates, one array per axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinates {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl Coordinates {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Position of atom `index`
    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        Some([
            *self.x.get(index)?,
            *self.y.get(index)?,
            *self.z.get(index)?,
        ])
    }
}

/// Unit cell and coordinates of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Raw cell record, CHARMM order `A, gamma, B, beta, alpha, C`
    pub cell: [f64; layout::CELL_VALUES],
    pub coords: Coordinates,
}

/// An open DCD trajectory with a frame cursor
///
/// Reads and writes address the frame that starts at the current position
/// and leave the position unchanged, so several blocks of one frame can be
/// accessed in any order.
#[derive(Debug)]
pub struct DcdFile<F = File> {
    file: F,
    header: DcdHeader,
}

impl DcdFile<File> {
    /// Open a DCD file for reading
    pub fn open(path: &Path) -> DcdResult<Self> {
        let file = File::open(path)?;
        log::debug!("Opened {} read-only", path.display());
        Self::from_reader(file)
    }

    /// Open a DCD file for reading and in-place frame updates
    pub fn open_writable(path: &Path) -> DcdResult<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        log::debug!("Opened {} for update", path.display());
        Self::from_reader(file)
    }
}

impl<F: Read + Seek> DcdFile<F> {
    /// Parse the header of an already open stream and move to frame 0
    pub fn from_reader(mut file: F) -> DcdResult<Self> {
        let n_frames = read_u32_at(&mut file, layout::FRAME_COUNT_OFFSET, "frame count")?;
        let n_titles = read_u32_at(&mut file, layout::TITLE_COUNT_OFFSET, "title count")?;
        let n_atoms = read_u32_at(
            &mut file,
            layout::atom_count_offset(u64::from(n_titles)),
            "atom count",
        )?;
        let first_frame_offset = layout::first_frame_offset(u64::from(n_titles));
        file.seek(SeekFrom::Start(first_frame_offset))?;

        let header = DcdHeader {
            n_frames: n_frames as usize,
            n_atoms: n_atoms as usize,
            n_titles: n_titles as usize,
            first_frame_offset,
        };
        log::debug!(
            "DCD header: {} frames of {} atoms, {} title lines, data at byte {}",
            header.n_frames,
            header.n_atoms,
            header.n_titles,
            header.first_frame_offset
        );

        Ok(DcdFile { file, header })
    }

    pub fn header(&self) -> &DcdHeader {
        &self.header
    }

    pub fn n_frames(&self) -> usize {
        self.header.n_frames
    }

    pub fn n_atoms(&self) -> usize {
        self.header.n_atoms
    }

    pub fn first_frame_offset(&self) -> u64 {
        self.header.first_frame_offset
    }

    /// Bytes per frame
    pub fn frame_size(&self) -> u64 {
        layout::frame_size(self.header.n_atoms)
    }

    /// Move the cursor to the start of `frame`.
    ///
    /// The frame count is not checked: positioning past the last frame
    /// succeeds, and the next read reports the end of file.
    pub fn go_to_frame(&mut self, frame: usize) -> DcdResult<()> {
        let position = self.header.first_frame_offset + frame as u64 * self.frame_size();
        self.file.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Advance the cursor by one frame
    pub fn next_frame(&mut self) -> DcdResult<()> {
        let step = i64::try_from(self.frame_size())
            .map_err(|_| std::io::Error::from(std::io::ErrorKind::InvalidInput))?;
        self.file.seek(SeekFrom::Current(step))?;
        Ok(())
    }

    /// Index of the frame the cursor is in
    pub fn current_frame(&mut self) -> DcdResult<usize> {
        let position = self.file.stream_position()?;
        let offset = self.header.first_frame_offset;
        if position < offset {
            return Err(DcdError::BeforeFirstFrame { position, offset });
        }
        Ok(((position - offset) / self.frame_size()) as usize)
    }

    /// Box edge lengths A, B and C of the current frame
    pub fn read_unit_cell(&mut self) -> DcdResult<[f64; 3]> {
        self.at_frame_start(|file, start| {
            let mut lengths = [0.0; 3];
            for (length, slot) in lengths.iter_mut().zip(layout::CELL_LENGTH_SLOTS) {
                *length = read_f64_at(file, start + layout::cell_slot_offset(slot), "unit cell")?;
            }
            Ok(lengths)
        })
    }

    /// All six stored cell values of the current frame
    pub fn read_cell_record(&mut self) -> DcdResult<[f64; layout::CELL_VALUES]> {
        self.at_frame_start(|file, start| {
            let mut cell = [0.0; layout::CELL_VALUES];
            for (slot, value) in cell.iter_mut().enumerate() {
                *value = read_f64_at(file, start + layout::cell_slot_offset(slot), "unit cell")?;
            }
            Ok(cell)
        })
    }

    /// Coordinates of the current frame
    pub fn read_coords(&mut self) -> DcdResult<Coordinates> {
        let n_atoms = self.header.n_atoms;
        self.at_frame_start(|file, start| {
            let mut axis = |index: usize, what: &'static str| {
                let position = start + layout::coord_array_offset(n_atoms, index);
                read_f32_array_at(file, position, n_atoms, what)
            };
            Ok(Coordinates {
                x: axis(0, "x coordinates")?,
                y: axis(1, "y coordinates")?,
                z: axis(2, "z coordinates")?,
            })
        })
    }

    /// Cell and coordinates of the current frame
    pub fn read_frame(&mut self) -> DcdResult<Frame> {
        let cell = self.read_cell_record()?;
        let coords = self.read_coords()?;
        Ok(Frame { cell, coords })
    }

    /// Release the file. Consumes the handle, so it cannot be used again.
    pub fn close(self) {
        log::debug!("Closing DCD file");
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> F {
        self.file
    }

    /// Run `op` with the current position as frame start, then seek back
    /// there whether or not `op` succeeded
    fn at_frame_start<T>(
        &mut self,
        op: impl FnOnce(&mut F, u64) -> DcdResult<T>,
    ) -> DcdResult<T> {
        let start = self.file.stream_position()?;
        let result = op(&mut self.file, start);
        self.file.seek(SeekFrom::Start(start))?;
        result
    }
}

impl<F: Read + Write + Seek> DcdFile<F> {
    /// Overwrite the coordinates of the current frame.
    ///
    /// Each array must hold exactly one value per atom.
    pub fn write_coords(&mut self, x: &[f32], y: &[f32], z: &[f32]) -> DcdResult<()> {
        let n_atoms = self.header.n_atoms;
        for (axis, values) in [('x', x), ('y', y), ('z', z)] {
            if values.len() != n_atoms {
                log::error!(
                    "Refusing to write {} {} values into a frame of {} atoms",
                    values.len(),
                    axis,
                    n_atoms
                );
                return Err(DcdError::LengthMismatch {
                    axis,
                    expected: n_atoms,
                    actual: values.len(),
                });
            }
        }

        self.at_frame_start(|file, start| {
            for (index, values) in [x, y, z].into_iter().enumerate() {
                let position = start + layout::coord_array_offset(n_atoms, index);
                write_f32_array_at(file, position, values)?;
            }
            Ok(())
        })
    }

    /// Flush pending writes to the underlying stream
    pub fn flush(&mut self) -> DcdResult<()> {
        self.file.flush()?;
        Ok(())
    }
}

// ============================================================================
// Binary helpers
// ============================================================================

fn read_exact_at<F: Read + Seek>(
    file: &mut F,
    position: u64,
    buf: &mut [u8],
    what: &'static str,
) -> DcdResult<()> {
    file.seek(SeekFrom::Start(position))?;
    file.read_exact(buf)
        .map_err(|err| DcdError::from_read(err, what, position))
}

fn read_u32_at<F: Read + Seek>(file: &mut F, position: u64, what: &'static str) -> DcdResult<u32> {
    let mut buf = [0u8; 4];
    read_exact_at(file, position, &mut buf, what)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f64_at<F: Read + Seek>(file: &mut F, position: u64, what: &'static str) -> DcdResult<f64> {
    let mut buf = [0u8; 8];
    read_exact_at(file, position, &mut buf, what)?;
    Ok(f64::from_le_bytes(buf))
}

fn read_f32_array_at<F: Read + Seek>(
    file: &mut F,
    position: u64,
    count: usize,
    what: &'static str,
) -> DcdResult<Vec<f32>> {
    let mut raw = vec![0u8; 4 * count];
    read_exact_at(file, position, &mut raw, what)?;
    Ok(raw
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn write_f32_array_at<F: Write + Seek>(file: &mut F, position: u64, values: &[f32]) -> DcdResult<()> {
    let raw: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    file.seek(SeekFrom::Start(position))?;
    file.write_all(&raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const N_ATOMS: usize = 3;

    fn marker(buf: &mut Vec<u8>, len: usize) {
        buf.extend_from_slice(&(len as u32).to_le_bytes());
    }

    fn cell_for(frame: usize) -> [f64; 6] {
        let f = frame as f64;
        [30.0 + f, 90.0, 31.0 + f, 90.0, 90.0, 32.0 + f]
    }

    fn coord(frame: usize, axis: usize, atom: usize) -> f32 {
        (100 * frame + 10 * axis + atom) as f32 + 0.5
    }

    /// Build a little-endian DCD image with two title lines
    fn synthetic_dcd(n_frames: usize) -> Vec<u8> {
        let mut buf = Vec::new();

        marker(&mut buf, 84);
        buf.extend_from_slice(b"CORD");
        buf.extend_from_slice(&(n_frames as u32).to_le_bytes());
        buf.resize(buf.len() + 76, 0);
        marker(&mut buf, 84);

        let titles = 2;
        marker(&mut buf, 4 + 80 * titles);
        buf.extend_from_slice(&(titles as u32).to_le_bytes());
        for line in ["* synthetic trajectory", "* for unit tests"] {
            let mut title = [b' '; 80];
            title[..line.len()].copy_from_slice(line.as_bytes());
            buf.extend_from_slice(&title);
        }
        marker(&mut buf, 4 + 80 * titles);

        marker(&mut buf, 4);
        buf.extend_from_slice(&(N_ATOMS as u32).to_le_bytes());
        marker(&mut buf, 4);

        for frame in 0..n_frames {
            marker(&mut buf, 48);
            for value in cell_for(frame) {
                buf.extend_from_slice(&value.to_le_bytes());
            }
            marker(&mut buf, 48);
            for axis in 0..3 {
                marker(&mut buf, 4 * N_ATOMS);
                for atom in 0..N_ATOMS {
                    buf.extend_from_slice(&coord(frame, axis, atom).to_le_bytes());
                }
                marker(&mut buf, 4 * N_ATOMS);
            }
        }
        buf
    }

    fn open(n_frames: usize) -> DcdFile<Cursor<Vec<u8>>> {
        DcdFile::from_reader(Cursor::new(synthetic_dcd(n_frames))).unwrap()
    }

    #[test]
    fn test_header() {
        let mut dcd = open(4);
        assert_eq!(dcd.n_frames(), 4);
        assert_eq!(dcd.n_atoms(), N_ATOMS);
        assert_eq!(dcd.header().n_titles, 2);
        assert_eq!(dcd.first_frame_offset(), 276);
        assert_eq!(dcd.frame_size(), 12 * N_ATOMS as u64 + 80);
        assert_eq!(dcd.current_frame().unwrap(), 0);

        let image_len = dcd.into_inner().into_inner().len() as u64;
        assert_eq!(image_len, 276 + 4 * (12 * N_ATOMS as u64 + 80));
    }

    #[test]
    fn test_go_to_frame_round_trips() {
        let mut dcd = open(5);
        for frame in (0..5).rev() {
            dcd.go_to_frame(frame).unwrap();
            assert_eq!(dcd.current_frame().unwrap(), frame);
        }
    }

    #[test]
    fn test_next_frame_matches_go_to_frame() {
        let mut dcd = open(4);
        for frame in 0..3 {
            dcd.go_to_frame(frame).unwrap();
            dcd.next_frame().unwrap();
            let stepped = dcd.read_frame().unwrap();
            assert_eq!(dcd.current_frame().unwrap(), frame + 1);

            dcd.go_to_frame(frame + 1).unwrap();
            assert_eq!(dcd.read_frame().unwrap(), stepped);
        }
    }

    #[test]
    fn test_read_unit_cell() {
        let mut dcd = open(3);
        dcd.go_to_frame(2).unwrap();
        assert_eq!(dcd.read_unit_cell().unwrap(), [32.0, 33.0, 34.0]);
        assert_eq!(dcd.read_cell_record().unwrap(), cell_for(2));
        assert_eq!(dcd.current_frame().unwrap(), 2);
    }

    #[test]
    fn test_read_coords() {
        let mut dcd = open(2);
        dcd.go_to_frame(1).unwrap();
        let coords = dcd.read_coords().unwrap();
        assert_eq!(coords.len(), N_ATOMS);
        assert_eq!(coords.x, vec![100.5, 101.5, 102.5]);
        assert_eq!(coords.y, vec![110.5, 111.5, 112.5]);
        assert_eq!(coords.z, vec![120.5, 121.5, 122.5]);
        assert_eq!(coords.position(2), Some([102.5, 112.5, 122.5]));
        assert_eq!(coords.position(3), None);
    }

    #[test]
    fn test_reads_do_not_move_cursor() {
        let mut dcd = open(3);
        dcd.go_to_frame(1).unwrap();

        let cell_first = dcd.read_unit_cell().unwrap();
        let coords_second = dcd.read_coords().unwrap();
        let coords_first = dcd.read_coords().unwrap();
        let cell_second = dcd.read_unit_cell().unwrap();

        assert_eq!(cell_first, cell_second);
        assert_eq!(coords_first, coords_second);
        assert_eq!(dcd.current_frame().unwrap(), 1);
    }

    #[test]
    fn test_write_then_read_back() {
        let mut dcd = open(3);
        let x = [1.0, 2.0, 3.0];
        let y = [-4.0, -5.0, -6.0];
        let z = [0.25, 0.5, 0.75];

        dcd.go_to_frame(1).unwrap();
        dcd.write_coords(&x, &y, &z).unwrap();
        assert_eq!(dcd.current_frame().unwrap(), 1);

        let coords = dcd.read_coords().unwrap();
        assert_eq!(coords.x, x);
        assert_eq!(coords.y, y);
        assert_eq!(coords.z, z);

        // Neighbouring frames and the cell block are untouched
        assert_eq!(dcd.read_cell_record().unwrap(), cell_for(1));
        dcd.go_to_frame(2).unwrap();
        assert_eq!(dcd.read_coords().unwrap().x, vec![200.5, 201.5, 202.5]);
        dcd.go_to_frame(0).unwrap();
        assert_eq!(dcd.read_coords().unwrap().z, vec![20.5, 21.5, 22.5]);
    }

    #[test]
    fn test_write_length_mismatch() {
        let mut dcd = open(1);
        let err = dcd
            .write_coords(&[1.0, 2.0, 3.0], &[1.0, 2.0], &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(matches!(
            err,
            DcdError::LengthMismatch {
                axis: 'y',
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(dcd.read_coords().unwrap().y, vec![10.5, 11.5, 12.5]);
    }

    #[test]
    fn test_past_last_frame() {
        let mut dcd = open(2);
        dcd.go_to_frame(2).unwrap();
        assert_eq!(dcd.current_frame().unwrap(), 2);
        assert!(matches!(
            dcd.read_coords(),
            Err(DcdError::UnexpectedEof { .. })
        ));
        assert_eq!(dcd.current_frame().unwrap(), 2);
    }

    #[test]
    fn test_truncated_header() {
        let image = synthetic_dcd(1)[..100].to_vec();
        let err = DcdFile::from_reader(Cursor::new(image)).unwrap_err();
        assert!(matches!(
            err,
            DcdError::UnexpectedEof {
                what: "atom count",
                ..
            }
        ));
    }

    #[test]
    fn test_before_first_frame() {
        let mut dcd = open(1);
        dcd.file.set_position(10);
        assert!(matches!(
            dcd.current_frame(),
            Err(DcdError::BeforeFirstFrame {
                position: 10,
                offset: 276
            })
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join("molfile_dcd_file_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("traj.dcd");
        std::fs::write(&path, synthetic_dcd(2)).unwrap();

        let mut dcd = DcdFile::open_writable(&path).unwrap();
        dcd.go_to_frame(1).unwrap();
        dcd.write_coords(&[7.0; 3], &[8.0; 3], &[9.0; 3]).unwrap();
        dcd.flush().unwrap();
        dcd.close();

        let mut dcd = DcdFile::open(&path).unwrap();
        assert_eq!(dcd.n_frames(), 2);
        dcd.next_frame().unwrap();
        let frame = dcd.read_frame().unwrap();
        assert_eq!(frame.coords.z, vec![9.0; 3]);
        assert_eq!(frame.cell, cell_for(1));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
