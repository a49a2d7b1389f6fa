//! Print the header and per-frame box sizes of a DCD trajectory
//!
//! Usage: `cargo run -p molfile-dcd --example dcd_info -- run.dcd`

use std::path::Path;
use std::process::ExitCode;

use molfile_dcd::{DcdFile, DcdResult};

fn summarize(path: &Path) -> DcdResult<()> {
    let mut dcd = DcdFile::open(path)?;
    println!(
        "{} frames, {} atoms, frame size {} bytes",
        dcd.n_frames(),
        dcd.n_atoms(),
        dcd.frame_size()
    );

    for _ in 0..dcd.n_frames() {
        let frame = dcd.current_frame()?;
        let [a, b, c] = dcd.read_unit_cell()?;
        let coords = dcd.read_coords()?;
        let first = coords.position(0).unwrap_or_default();
        println!(
            "frame {frame}: box {a:.3} {b:.3} {c:.3}  atom 0 at {:.3} {:.3} {:.3}",
            first[0], first[1], first[2]
        );
        dcd.next_frame()?;
    }

    dcd.close();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: dcd_info <file.dcd>");
        return ExitCode::FAILURE;
    };

    match summarize(Path::new(&path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{path}: {e}");
            ExitCode::FAILURE
        }
    }
}
