//! Tracing subscriber setup for the CLI

use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const APP_TARGET: &str = "tattva";

/// Level for this crate's own events.
fn app_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Installs a stderr subscriber. `RUST_LOG` refines the default filter.
pub fn init_logging(verbose: bool) {
    let level = app_level(verbose);
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(Targets::new().with_target(APP_TARGET, level))
        .with(env_filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_level() {
        assert_eq!(app_level(true), LevelFilter::DEBUG);
        assert_eq!(app_level(false), LevelFilter::WARN);
    }
}
