use std::fs;

use tracing::info;
use tracing_subscriber::EnvFilter;

use logwheel::Logger;

// Wires the rotating writer into tracing-subscriber as its output sink.
// Events land in demo-logs/<current hour>.log; run it across an hour
// boundary and a new file appears with no further ceremony.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all("demo-logs")?;

    let logger = Logger::open("demo-logs")?;
    logger.set_prefix("demo");
    logger.set_separator("-");

    println!("writing events to demo-logs/{}", logger.file_name());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(logger)
        .with_ansi(false)
        .init();

    for iteration in 0..5 {
        info!(iteration, "demo event");
    }

    Ok(())
}
