use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Map the repeated `-v` count onto a default filter directive.
pub fn default_directive(verbose: u8) -> &'static str {
	match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	}
}

/// Install the stderr subscriber; `RUST_LOG` overrides the verbosity default.
///
/// Stdout is reserved for command output, so JSON stays parseable with logging on.
pub fn init(verbose: u8) {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

	let console_layer = fmt::layer()
		.with_target(true)
		.with_ansi(false)
		.with_writer(io::stderr)
		.with_filter(env_filter);

	// A subscriber installed earlier in the process stays in place.
	let _ = Registry::default().with(console_layer).try_init();
}

#[cfg(test)]
mod tests {
	use super::default_directive;

	#[test]
	fn verbosity_raises_the_default_level() {
		assert_eq!(default_directive(0), "warn");
		assert_eq!(default_directive(1), "debug");
		assert_eq!(default_directive(2), "trace");
		assert_eq!(default_directive(9), "trace");
	}
}
