//! Logger setup for the binary. Library code only uses the `log` macros.

use log::LevelFilter;

/// Install the colored logger. `RUST_LOG` wins over the configured level.
pub fn init(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);

    let mut builder = colog::default_builder();
    builder.filter_level(filter);
    builder.parse_default_env();

    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
}
