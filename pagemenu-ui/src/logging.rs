//! Tracing bootstrap for hosts and demos.
//!
//! ## Usage
//!
//! Call [`init_tracing`] once at startup. `RUST_LOG` wins when it is set.

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "error,pagemenu_components=info";

/// Installs a pretty `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Calling it again, or after another subscriber was installed, is a no-op.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_FILTER);
}

/// Like [`init_tracing`] with a caller-chosen fallback directive.
pub fn init_tracing_with_default(directive: &str) {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(directive) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}
