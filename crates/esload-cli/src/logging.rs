//! Tracing setup for the `esload` binary.
//!
//! `esload-core` only emits events; installing a subscriber is the binary's
//! job. Logs always go to stderr so `--json` command output on stdout stays a
//! single parseable object.

use miette::{IntoDiagnostic, Result};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;

/// Map `-v` occurrences to a level: none = WARN, `-v` = DEBUG, `-vv` = TRACE.
fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` is honored; the verbosity flag raises the level for esload's
/// own targets on top of it. With `json_logs`, each event is one JSON line:
///
/// ```json
/// {"timestamp":"...","level":"DEBUG","fields":{"message":"loading local module","path":"/app/mod.ts","media_type":"TypeScript"},"target":"esload_core::loader"}
/// ```
pub fn init(config: &Config) -> Result<()> {
    let level = level_for(config.verbosity);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"))
        .add_directive(format!("esload_core={level}").parse().into_diagnostic()?)
        .add_directive(format!("esload={level}").parse().into_diagnostic()?);

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .into_diagnostic()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .into_diagnostic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), Level::WARN);
        assert_eq!(level_for(1), Level::DEBUG);
        assert_eq!(level_for(2), Level::TRACE);
        assert_eq!(level_for(9), Level::TRACE);
    }
}
