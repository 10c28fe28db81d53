use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `LOG_LEVEL` takes precedence over `default_level`. Returns `false` if a
/// subscriber was already installed.
pub fn init_tracing(default_level: &str) -> bool {
    let default_directive = LevelFilter::from_str(default_level).unwrap_or(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(default_directive.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .is_ok()
}
