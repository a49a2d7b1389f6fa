//! File-level tests for the common atom reader

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use molfile_io::{read_struct, read_struct_with, IoError, ReadOptions};

const PSF: &str = "PSF CMAP CHEQ

       1 !NTITLE
* two waters

       6 !NATOM
       1 W1   1    TIP3 OH2    75      -0.834000       15.9994       0     0.0000000     0.0000000
       2 W1   1    TIP3 H1      4       0.417000        1.0080       0     0.0000000     0.0000000
       3 W1   1    TIP3 H2      4       0.417000        1.0080       0     0.0000000     0.0000000
       4 W1   2    TIP3 OH2    75      -0.834000       15.9994       0     0.0000000     0.0000000
       5 W1   2    TIP3 H1      4       0.417000        1.0080       0     0.0000000     0.0000000
       6 W1   2    TIP3 H2      4       0.417000        1.0080       0     0.0000000     0.0000000

       4 !NBOND: bonds
       1       2       1       3       4       5       4       6

";

const PDB: &str = "\
REMARK two waters
CRYST1   18.856   18.856   18.856  90.00  90.00  90.00 P 1           1
ATOM      1  OH2 TIP3    1      -1.525   2.374  -0.361  1.00  0.00      W1   O
ATOM      2  H1  TIP3    1      -0.585   2.296  -0.205  1.00  0.00      W1   H
ATOM      3  H2  TIP3    1      -1.803   3.183   0.074  1.00  0.00      W1   H
ATOM      4  OH2 TIP3    2       3.212  -0.116   1.950  1.00  0.00      W1   O
ATOM      5  H1  TIP3    2       2.551   0.570   2.054  1.00  0.00      W1   H
ATOM      6  H2  TIP3    2       3.984   0.305   1.573  1.00  0.00      W1   H
END
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("molfile_io_{name}_test"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_gz(path: &Path, content: &str) {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    fs::write(path, encoder.finish().unwrap()).unwrap();
}

#[test]
fn test_psf_and_pdb_agree() {
    let dir = scratch_dir("agree");
    let psf_path = dir.join("water.psf");
    let pdb_path = dir.join("water.pdb");
    fs::write(&psf_path, PSF).unwrap();
    fs::write(&pdb_path, PDB).unwrap();

    let options = ReadOptions::new().with_trimmed_fields(true);
    let from_psf = read_struct_with(&psf_path, &options).unwrap();
    let from_pdb = read_struct_with(&pdb_path, &options).unwrap();

    assert_eq!(from_psf.len(), 6);
    assert_eq!(from_pdb.len(), 6);
    for (a, b) in from_psf.iter().zip(&from_pdb) {
        assert_eq!(a.segment, b.segment);
        assert_eq!(a.residue_id, b.residue_id);
        assert_eq!(a.residue_type, b.residue_type);
        assert_eq!(a.name, b.name);
    }
    assert!((from_psf[0].charge + 0.834).abs() < 1e-9);
    // PDB charge codes are blank here
    assert_eq!(from_pdb[0].charge, 0.0);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_gzipped_inputs() {
    let dir = scratch_dir("gzip");
    let psf_path = dir.join("water.psf.gz");
    let pdb_path = dir.join("water.PDB.gz");
    write_gz(&psf_path, PSF);
    write_gz(&pdb_path, PDB);

    assert_eq!(read_struct(&psf_path).unwrap().len(), 6);
    assert_eq!(read_struct(&pdb_path).unwrap().len(), 6);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_failures() {
    let dir = scratch_dir("failures");

    let missing = dir.join("missing.psf");
    assert!(matches!(read_struct(&missing), Err(IoError::Io(_))));

    let broken = dir.join("broken.psf");
    fs::write(&broken, "PSF\n\n       7 !NATOM\n\n").unwrap();
    assert!(matches!(
        read_struct(&broken),
        Err(IoError::InvalidDocument { .. })
    ));

    let not_psf = dir.join("not_really.psf");
    fs::write(&not_psf, PDB).unwrap();
    assert!(matches!(
        read_struct(&not_psf),
        Err(IoError::InvalidDocument { .. })
    ));

    let empty = dir.join("empty.pdb");
    fs::write(&empty, "").unwrap();
    assert!(matches!(read_struct(&empty), Err(IoError::EmptyFile)));

    let other = dir.join("water.txt");
    fs::write(&other, PDB).unwrap();
    assert!(matches!(read_struct(&other), Err(IoError::UnknownFormat(_))));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_psf_sections_from_file() {
    let dir = scratch_dir("sections");
    let path = dir.join("water.psf");
    fs::write(&path, PSF).unwrap();

    let doc = molfile_io::psf::read_psf(&path).unwrap();
    assert!(doc.is_valid());
    assert!(doc.signature.cmap_cheq);
    assert_eq!(doc.title_count(), Some(1));
    assert_eq!(doc.bond_count(), Some(4));
    assert_eq!(doc.angle_count(), None);
    assert_eq!(doc.bonds()[3].a, 3);
    assert_eq!(doc.bonds()[3].b, 5);

    let cheq = doc.atoms()[0].cheq.unwrap();
    assert_eq!(cheq.electronegativity, 0.0);

    let pdb = molfile_io::pdb::read_pdb(&dir.join("missing.pdb"));
    assert!(pdb.is_err());

    fs::remove_dir_all(&dir).unwrap();
}
