//! Print the unit cell and a sample atom of a PDB file
//!
//! Usage: `cargo run -p molfile-io --example pdb_info -- model.pdb [--hetatm]`

use std::path::Path;
use std::process::ExitCode;

use molfile_io::pdb;
use molfile_io::ReadOptions;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.iter().find(|arg| !arg.starts_with("--")) else {
        eprintln!("usage: pdb_info <file.pdb> [--hetatm]");
        return ExitCode::FAILURE;
    };
    let options = ReadOptions::new().with_hetatm(args.iter().any(|arg| arg == "--hetatm"));

    let doc = match pdb::read_pdb_with(Path::new(path), options) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cell = &doc.cell;
    if cell.valid {
        println!(
            "Cell: {:.3} {:.3} {:.3}  {:.2} {:.2} {:.2}  {} Z={}",
            cell.a, cell.b, cell.c, cell.alpha, cell.beta, cell.gamma, cell.space_group, cell.z
        );
    } else {
        println!("Cell: not found");
    }

    let atoms = doc.atoms();
    println!("Atoms: {}", atoms.len());
    if atoms.is_empty() {
        return ExitCode::SUCCESS;
    }

    let sample = i32::MAX as usize % atoms.len();
    let atom = &atoms[sample];
    println!("Atom {sample}:");
    println!("  serial   {} ({})", atom.serial, atom.wide.serial);
    println!("  name     {}", atom.name);
    println!(
        "  residue  {} {}{} chain {}",
        atom.residue_name, atom.residue_seq, atom.icode, atom.chain
    );
    println!("  wide     {} {} {}", atom.wide.residue_name, atom.wide.residue_seq, atom.wide.segment);
    println!("  xyz      {:.3} {:.3} {:.3}", atom.x, atom.y, atom.z);
    println!("  occ/b    {:.2} {:.2}", atom.occupancy, atom.temp_factor);
    println!("  element  {} charge {:+}", atom.element, atom.formal_charge());

    ExitCode::SUCCESS
}
