use std::str::FromStr;
use tracing::Level;

pub fn init(level: &str) {
    let level = Level::from_str(level).unwrap_or(Level::INFO);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
