use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber: `RUST_LOG` filter (default `info`) and a
/// compact stdout formatter.
pub fn setup_tracing() {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Ensure the fmt layer logs to the console
    let fmt_layer = fmt::layer()
        .with_line_number(true)
        .compact()
        .with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
