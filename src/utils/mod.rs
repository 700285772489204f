pub mod persistence;

use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` is honoured; `directive` is layered on top. An unparsable
/// directive is ignored. Only the first call in a process has any effect.
pub fn init_tracing(directive: &str) {
    TRACING_INIT.call_once(|| {
        let filter = match directive.parse::<Directive>() {
            Ok(parsed) => EnvFilter::from_default_env().add_directive(parsed),
            Err(_) => EnvFilter::from_default_env(),
        };

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        tracing::info!("Cadence tracing initialized.");
    });
}
