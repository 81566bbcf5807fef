use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use upgma::{DistanceMatrix, Upgma};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Pairwise distance file, one `<label_a> <label_b> <distance>` record per line
    #[arg(value_name = "DISTANCES")]
    input: PathBuf,

    /// Path to write the DOT rendering of the merge tree to
    #[arg(value_name = "DOT_FILE")]
    output: PathBuf,
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let contents = fs::read_to_string(&args.input)
        .map_err(|e| format!("failed to read {}: {e}", args.input.display()))?;

    let matrix = DistanceMatrix::parse(&contents).map_err(|e| e.to_string())?;
    let tree = Upgma::new(&matrix).cluster().map_err(|e| e.to_string())?;

    // The DOT file is written only once the full tree exists, so a failed run
    // never leaves a partial artifact behind.
    println!("{}", tree.to_bracket());
    fs::write(&args.output, tree.to_dot())
        .map_err(|e| format!("failed to write {}: {e}", args.output.display()))?;

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
