//! gridbatch - batch processor for delimited text tables.
//!
//! Reads a table, runs a command stream against it, and writes the result
//! back to the same file. The file is only rewritten after every command has
//! succeeded.

use std::env;
use std::path::Path;

use gridbatch_core::{GridbatchError, Interpreter, Result, load_commands, table};

fn print_usage() {
    eprintln!("Usage: gridbatch [-d DELIMS] COMMANDS FILE");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  COMMANDS   Commands separated by ';', or -cPATH to read one");
    eprintln!("             command per line from PATH");
    eprintln!("  FILE       Delimited table to read; also the output path");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -d DELIMS  Delimiter characters; the first one is used on");
    eprintln!("             output (default: a single space)");
}

fn run(args: &[String]) -> Result<()> {
    let (delims, spec, file) = match args {
        [flag, delims, spec, file] if flag == "-d" => (delims.as_str(), spec, file),
        [spec, file] => (" ", spec, file),
        _ => return Err(GridbatchError::MissingArgs),
    };

    table::io::check_delims(delims)?;
    let commands = load_commands(spec)?;

    let path = Path::new(file);
    let mut table = table::io::load(path, delims)?;
    Interpreter::new().run(&mut table, &commands)?;
    table::io::save(&table, path)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        if matches!(&e, GridbatchError::MissingArgs) {
            print_usage();
        }
        std::process::exit(e.exit_code());
    }
}
