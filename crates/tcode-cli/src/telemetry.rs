//! Log subscriber setup

use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives
pub(crate) const LOG_ENV: &str = "TCODE_LOG";

/// Default level for a count of `-v` flags
pub(crate) fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber, logging to stderr
///
/// `TCODE_LOG` directives override the verbosity default.
pub(crate) fn init(verbosity: u8, json: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(err) = installed {
        eprintln!("logging disabled: {err}");
    }
}
