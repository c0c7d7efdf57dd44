use log::LevelFilter;

/// Initialize the logger with the specified level.
///
/// `RUST_LOG` still applies per module; `level` sets the default filter.
/// Output goes to stderr so PPM written to stdout stays clean.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}
