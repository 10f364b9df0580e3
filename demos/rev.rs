//! Print a file with its lines in reverse order, like `tac`.
//!
//! Usage: cargo run --example rev -- <path>

use revline::ReverseLineReader;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args().nth(1).ok_or("usage: rev <path>")?;

    let reader = ReverseLineReader::open(&path)?;
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in reader {
        out.write_all(&line?)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    Ok(())
}
