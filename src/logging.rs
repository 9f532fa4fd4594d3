//! Logger bootstrap for the demo binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Maps a `-v` repetition count onto a log level.
///
/// # Examples
/// ```
/// use coyote::logging::level_for;
/// use log::LevelFilter;
/// assert_eq!(level_for(0), LevelFilter::Info);
/// assert_eq!(level_for(1), LevelFilter::Debug);
/// assert_eq!(level_for(5), LevelFilter::Trace);
/// ```
#[must_use]
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` takes precedence over the level derived from `verbosity`, so
/// per-substep collision tracing can be enabled for a single module with
/// `RUST_LOG=coyote::resolver=trace`.
pub fn init(verbosity: u8) {
    let env = Env::default().default_filter_or(level_for(verbosity).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp(None);

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
