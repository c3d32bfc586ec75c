//! Stderr logging setup, grounded on
//! `examples/rhaiscript-lsp/crates/lsp/bin/rhai/main.rs`'s
//! `setup_stderr_logging`: an `EnvFilter` seeded from `RUST_LOG` (falling
//! back to `info`), a compact event format by default, and a pretty one
//! under `--verbose`.

use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

pub fn setup_stderr_logging(spans: bool, verbose: bool, colors: bool) {
    let span_events = if spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry();

    let env_filter = match std::env::var("RUST_LOG").ok() {
        Some(log) => EnvFilter::new(log),
        None => EnvFilter::default().add_directive(tracing::Level::INFO.into()),
    };

    if verbose {
        registry
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(colors)
                    .with_span_events(span_events)
                    .event_format(tracing_subscriber::fmt::format().pretty().with_ansi(colors))
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    } else {
        registry
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(colors)
                    .event_format(
                        tracing_subscriber::fmt::format()
                            .compact()
                            .with_source_location(false)
                            .with_target(false)
                            .without_time()
                            .with_ansi(colors),
                    )
                    .without_time()
                    .with_file(false)
                    .with_line_number(false)
                    .with_span_events(span_events)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }
}
