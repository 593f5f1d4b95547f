use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Directive enabled by `--debug` on top of whatever filter is in effect
pub const DEBUG_DIRECTIVE: &str = "ntp_fingerprint_lib=debug";

/// Build the event filter.
///
/// A parseable, non-empty `env_directives` (the value of `RUST_LOG`) wins over
/// `log_level`. With `debug` set, [`DEBUG_DIRECTIVE`] is added to either.
pub fn build_filter(
    log_level: &str,
    env_directives: Option<&str>,
    debug: bool,
) -> Result<EnvFilter, String> {
    let from_env = env_directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok());
    let filter = match from_env {
        Some(filter) => filter,
        None => EnvFilter::try_new(log_level)
            .map_err(|e| format!("Invalid log level {log_level:?}: {e}"))?,
    };

    if !debug {
        return Ok(filter);
    }
    let directive: Directive = DEBUG_DIRECTIVE
        .parse()
        .map_err(|e| format!("Invalid debug directive {DEBUG_DIRECTIVE:?}: {e}"))?;
    Ok(filter.add_directive(directive))
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`, but never masks the debug
/// directive. Events go to stderr so stdout only carries the identification
/// result.
pub fn init_tracing(
    log_level: &str,
    show_target: bool,
    debug: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(log_level, env_directives.as_deref(), debug)?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(show_target)
        .with_writer(std::io::stderr);

    let subscriber = Registry::default().with(env_filter).with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to set global tracing subscriber: {e}"))?;

    Ok(())
}
