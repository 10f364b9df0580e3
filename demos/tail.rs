//! Print the last lines of a file, like `tail -n`.
//!
//! Usage: cargo run --example tail -- <path> [lines]
//!
//! Set `RUST_LOG=trace` to watch the reader fetch chunks from the end.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: tail <path> [lines]")?;
    let n = match args.next() {
        Some(count) => count.parse::<usize>()?,
        None => 10,
    };

    for line in revline::tail(&path, n)? {
        println!("{line}");
    }

    Ok(())
}
