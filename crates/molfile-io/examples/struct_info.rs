//! Print the common atom view of a PSF or PDB file
//!
//! Usage: `cargo run -p molfile-io --example struct_info -- system.psf`

use std::path::Path;
use std::process::ExitCode;

use molfile_io::{read_struct_with, ReadOptions};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: struct_info <file.psf|file.pdb>");
        return ExitCode::FAILURE;
    };

    let options = ReadOptions::new().with_trimmed_fields(true);
    let atoms = match read_struct_with(Path::new(&path), &options) {
        Ok(atoms) if !atoms.is_empty() => atoms,
        Ok(_) => {
            println!("No atoms found.");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{} atoms found.", atoms.len());
    let sample = i32::MAX as usize % atoms.len();
    let atom = &atoms[sample];
    println!("Atom {sample}:");
    println!("  segment  {}", atom.segment);
    println!("  residue  {} {}", atom.residue_type, atom.residue_id);
    println!("  name     {}", atom.name);
    println!("  charge   {:.6}", atom.charge);

    ExitCode::SUCCESS
}
