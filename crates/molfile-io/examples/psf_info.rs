//! Print a summary of a PSF file
//!
//! Usage: `cargo run -p molfile-io --example psf_info -- system.psf`

use std::path::Path;
use std::process::ExitCode;

use molfile_io::psf::{self, Mobility};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: psf_info <file.psf>");
        return ExitCode::FAILURE;
    };

    let doc = match psf::read_psf(Path::new(&path)) {
        Ok(doc) if doc.signature.valid => doc,
        Ok(_) => {
            eprintln!("{path}: not a PSF file");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let sig = &doc.signature;
    println!("Extended:           {}", yes_no(sig.extended));
    println!("CMAP CHEQ:          {}", yes_no(sig.cmap_cheq));
    println!("XPLOR:              {}", yes_no(sig.xplor));
    println!("Scattering lengths: {}", yes_no(sig.scattering_length));
    println!();

    if let Some(titles) = &doc.titles {
        println!("Titles ({}):", titles.len());
        for title in titles {
            println!("{title}");
        }
        println!();
    }

    let Some(atoms) = doc.atoms.as_deref().filter(|atoms| !atoms.is_empty()) else {
        println!("Atom information not found");
        return ExitCode::FAILURE;
    };

    let sample = i32::MAX as usize % atoms.len();
    let atom = &atoms[sample];
    println!("Atoms: {}", atoms.len());
    println!("Atom {sample}:");
    println!("  segment  {}", atom.segment);
    println!("  residue  {} {}", atom.residue_name, atom.residue_id);
    println!("  name     {}", atom.name);
    println!("  type     {}", atom.atom_type);
    println!("  charge   {:.6}", atom.charge);
    println!("  mass     {:.6}", atom.mass);
    let mobility = match atom.mobility {
        Mobility::Free => "free".to_string(),
        Mobility::Fixed => "fixed".to_string(),
        Mobility::LonePair => "lone pair".to_string(),
        Mobility::Other(code) => format!("unknown ({code})"),
    };
    println!("  imove    {mobility}");
    if let Some(cheq) = atom.cheq {
        println!("  cheq     {:.6} / {:.6}", cheq.electronegativity, cheq.hardness);
    }
    if let Some(b) = atom.scattering_length {
        println!("  slb      {b:.6}");
    }
    println!();

    let section = |name: &str, count: Option<usize>| match count {
        Some(n) => println!("{name}: {n}"),
        None => println!("{name}: not found"),
    };
    section("Bonds", doc.bond_count());
    section("Angles", doc.angle_count());
    section("Dihedrals", doc.dihedral_count());
    section("Impropers", doc.improper_count());

    for bond in doc.bonds().iter().filter(|b| b.a == sample || b.b == sample) {
        println!("  {} -- {}", bond.a, bond.b);
    }

    ExitCode::SUCCESS
}
