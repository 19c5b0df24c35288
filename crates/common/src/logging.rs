use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set. Command-line tools keep stderr quiet
/// unless something went wrong.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Initialize tracing subscriber with pretty formatting for development
/// and JSON formatting for production.
///
/// Uses RUST_LOG environment variable for filtering (defaults to
/// [`DEFAULT_LOG_FILTER`] if not set). Log records go to stderr; stdout is
/// reserved for the run report.
pub fn setup_logging(environment: Environment) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // try_init: a second call (e.g. from tests) keeps the first subscriber.
    let _ = match environment {
        Environment::Production => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        Environment::Development => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
}
