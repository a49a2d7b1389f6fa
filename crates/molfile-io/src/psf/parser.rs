//! PSF file parser
//!
//! A PSF file is a signature line followed by sections, each introduced by
//! a `<count> !N<TAG>` header and normally closed by a blank line. The
//! parser walks them in file order: titles, atoms, bonds, angles,
//! dihedrals, impropers.
//!
//! Every section except the atoms is best-effort. When a section's header
//! is missing, or the number of records found does not match the declared
//! count, that section is dropped and parsing moves on.

use std::io::{BufReader, Read};

use nom::{
    character::complete::{i64 as integer, multispace0},
    multi::many_m_n,
    sequence::preceded,
    IResult,
};

use crate::error::IoResult;
use crate::field::Columns;

use super::layout::{AtomLayout, Section, GAP, MOBILITY_WIDTH, REAL_WIDTH};
use super::records::{Cheq, Mobility, PsfAtom, PsfSignature, PsfTopology};

/// PSF file reader
pub struct PsfReader<R> {
    reader: BufReader<R>,
}

impl<R: Read> PsfReader<R> {
    /// Create a new PSF reader
    pub fn new(reader: R) -> Self {
        PsfReader {
            reader: BufReader::new(reader),
        }
    }

    /// Read the whole document
    pub fn read(&mut self) -> IoResult<PsfTopology> {
        let mut raw = Vec::new();
        self.reader.read_to_end(&mut raw)?;
        let text = String::from_utf8_lossy(&raw);
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();

        Ok(parse_document(&lines))
    }
}

fn parse_document(lines: &[&str]) -> PsfTopology {
    let mut doc = PsfTopology::default();

    let Some(first) = lines.first() else {
        log::warn!("PSF input is empty");
        return doc;
    };

    doc.signature = PsfSignature::parse(first);
    if !doc.signature.valid {
        log::warn!("Not a PSF file: first line does not start with PSF");
        return doc;
    }
    log::debug!("PSF signature: {:?}", doc.signature);

    let mut cursor = LineCursor::new(lines, 1);
    let layout = AtomLayout::from_signature(&doc.signature);

    doc.titles = read_titles(&mut cursor);
    doc.atoms = read_atoms(&mut cursor, &layout);
    if doc.atoms.is_none() {
        log::warn!("PSF atom section unusable, document is invalid");
        return doc;
    }

    doc.bonds = read_connectivity::<2>(&mut cursor, Section::Bonds).map(into_records);
    doc.angles = read_connectivity::<3>(&mut cursor, Section::Angles).map(into_records);
    doc.dihedrals = read_connectivity::<4>(&mut cursor, Section::Dihedrals).map(into_records);
    doc.impropers = read_connectivity::<4>(&mut cursor, Section::Impropers).map(into_records);

    doc
}

fn into_records<T: From<[usize; N]>, const N: usize>(tuples: Vec<[usize; N]>) -> Vec<T> {
    tuples.into_iter().map(T::from).collect()
}

// ============================================================================
// Line cursor
// ============================================================================

/// Position in the file shared by all section readers
struct LineCursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(lines: &'a [&'a str], pos: usize) -> Self {
        LineCursor { lines, pos }
    }

    /// 1-based number of the line the cursor sits on
    fn line_number(&self) -> usize {
        self.pos + 1
    }

    /// Find the header of `section` and return its declared count.
    ///
    /// Tokens are scanned across lines until one starts with the section
    /// tag; the count is the token right before it. Records start on the
    /// line after the header. If the tag never appears the cursor is left
    /// where it was, so later sections can still be found.
    fn read_bang(&mut self, section: Section) -> Option<usize> {
        let tag = section.tag();
        let lines = self.lines;
        let mut previous: Option<&str> = None;

        for (offset, line) in lines[self.pos..].iter().enumerate() {
            for token in line.split_whitespace() {
                if token.starts_with(tag) {
                    self.pos += offset + 1;
                    let count = previous.and_then(|t| t.parse::<usize>().ok());
                    if count.is_none() {
                        log::warn!(
                            "{} header on line {} has no usable count",
                            tag,
                            self.pos
                        );
                    }
                    return count;
                }
                previous = Some(token);
            }
        }

        log::debug!("No {} section", tag);
        None
    }

    /// Next record line of the current section.
    ///
    /// Returns `None` at end of input, at a blank line (which is consumed),
    /// or at a line containing `!` (which is left for the next header scan,
    /// since it means the blank separator is missing).
    fn next_record_line(&mut self) -> Option<&'a str> {
        let line = *self.lines.get(self.pos)?;
        if line.contains('!') {
            return None;
        }
        self.pos += 1;
        if line.trim().is_empty() {
            return None;
        }
        Some(line)
    }
}

/// Keep `records` only if their number matches the header
fn checked<T>(section: Section, declared: usize, mut records: Vec<T>) -> Option<Vec<T>> {
    if records.len() == declared {
        records.shrink_to_fit();
        log::debug!("Read {} {} records", records.len(), section.tag());
        Some(records)
    } else {
        log::warn!(
            "{} declares {} records but {} were found, discarding section",
            section.tag(),
            declared,
            records.len()
        );
        None
    }
}

// ============================================================================
// Sections
// ============================================================================

fn read_titles(cursor: &mut LineCursor<'_>) -> Option<Vec<String>> {
    let declared = cursor.read_bang(Section::Titles)?;
    let mut titles = Vec::new();
    while let Some(line) = cursor.next_record_line() {
        titles.push(line.to_string());
    }
    checked(Section::Titles, declared, titles)
}

fn read_atoms(cursor: &mut LineCursor<'_>, layout: &AtomLayout) -> Option<Vec<PsfAtom>> {
    let declared = cursor.read_bang(Section::Atoms)?;
    let mut atoms = Vec::new();
    while let Some(line) = cursor.next_record_line() {
        match parse_atom_line(line, layout, atoms.len() + 1) {
            Some(atom) => atoms.push(atom),
            None => {
                log::warn!(
                    "Atom index out of sequence on line {}, expected {}",
                    cursor.line_number() - 1,
                    atoms.len() + 1
                );
                break;
            }
        }
    }
    checked(Section::Atoms, declared, atoms)
}

/// Parse one atom line; `None` if its index is not `expected_index`
fn parse_atom_line(line: &str, layout: &AtomLayout, expected_index: usize) -> Option<PsfAtom> {
    let mut cols = Columns::new(line);

    if usize::try_from(cols.take_int(layout.index)).ok()? != expected_index {
        return None;
    }

    let segment = cols.skip(GAP).take_string(layout.name);
    let residue_id = cols.skip(GAP).take_string(layout.name);
    let residue_name = cols.skip(GAP).take_string(layout.name);
    let name = cols.skip(GAP).take_string(layout.name);
    let atom_type = cols.skip(GAP).take_string(layout.atom_type);
    let charge = cols.skip(GAP).take_float(REAL_WIDTH);
    let mass = cols.take_float(REAL_WIDTH);
    let mobility = Mobility::from_code(cols.take_int(MOBILITY_WIDTH));

    let cheq = layout.cheq.then(|| Cheq {
        electronegativity: cols.take_float(REAL_WIDTH),
        hardness: cols.take_float(REAL_WIDTH),
    });
    let scattering_length = layout
        .scattering_length
        .then(|| cols.skip(GAP).take_float(REAL_WIDTH));

    Some(PsfAtom {
        segment,
        residue_id,
        residue_name,
        name,
        atom_type,
        charge,
        mass,
        mobility,
        cheq,
        scattering_length,
    })
}

/// Read a bond, angle or dihedral section as `N`-tuples of zero-based indices
fn read_connectivity<const N: usize>(
    cursor: &mut LineCursor<'_>,
    section: Section,
) -> Option<Vec<[usize; N]>> {
    debug_assert_eq!(section.arity(), N);

    let declared = cursor.read_bang(section)?;
    let mut tuples = Vec::new();
    while let Some(line) = cursor.next_record_line() {
        let indices = scan_indices(line, section.max_indices_per_line());
        tuples.extend(
            indices
                .chunks_exact(N)
                .map(|chunk| std::array::from_fn(|i| chunk[i])),
        );
    }
    checked(section, declared, tuples)
}

fn integers(input: &str, max: usize) -> IResult<&str, Vec<i64>> {
    many_m_n(0, max, preceded(multispace0, integer))(input)
}

/// Up to `max` leading integers of `line`, converted to zero-based indices.
///
/// Scanning stops at the first token that is not an integer, or at an index
/// below 1; an incomplete trailing tuple is dropped by the caller.
fn scan_indices(line: &str, max: usize) -> Vec<usize> {
    let values = integers(line, max)
        .map(|(_, values)| values)
        .unwrap_or_default();
    values
        .into_iter()
        .map_while(|value| value.checked_sub(1).and_then(|v| usize::try_from(v).ok()))
        .collect()
}
