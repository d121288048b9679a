use std::env;
use std::io::{self, BufRead};
use std::process;

use logwheel::Logger;

// Tee stdin into time-windowed files: `logwheel <directory>`.
fn main() {
    let directory = env::args().nth(1).unwrap_or_else(|| ".".to_string());

    if let Err(err) = run(&directory) {
        eprintln!("logwheel: {err}");
        process::exit(1);
    }
}

fn run(directory: &str) -> Result<(), logwheel::Error> {
    let logger = Logger::open(directory)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let mut line = line?;
        line.push('\n');
        logger.append_str(&line)?;
    }

    Ok(())
}
