//! Tracing setup shared by the binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` wins, otherwise the configured level for
/// this crate plus `default_directives`.
pub fn env_filter(config: &LoggingConfig, default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = format!("ticketmaster={}", config.level);
        if !default_directives.is_empty() {
            directives.push(',');
            directives.push_str(default_directives);
        }
        EnvFilter::new(directives)
    })
}

/// Install the global subscriber. Logs go to stderr so CLI output stays clean.
pub fn init_tracing(config: &LoggingConfig, default_directives: &str) {
    let filter = env_filter(config, default_directives);
    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
