//! Logging setup using tracing, written to stderr.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Calling this more than once is harmless, later calls are ignored.
pub fn init_logging(level: &str) {
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(format!("swatchbook={level},pal={level}")))
		.unwrap_or_else(|_| EnvFilter::new("warn"));

	let layer = fmt::layer()
		.with_writer(std::io::stderr)
		.with_target(true)
		.with_level(true);

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(layer)
		.try_init();
}
