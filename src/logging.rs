use tracing::Level;

/// Parse a level name, falling back to `info`
pub fn parse_level(level: &str) -> Level {
    level.trim().parse::<Level>().unwrap_or(Level::INFO)
}

/// Install the global fmt subscriber. Output goes to stderr so command
/// output on stdout stays clean. Safe to call more than once.
pub fn init_logging(level: &str) {
    let result = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if result.is_err() {
        tracing::debug!("logging already initialised");
    }
}
