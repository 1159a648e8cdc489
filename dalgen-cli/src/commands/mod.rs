use std::fmt::Display;
use tracing_subscriber::{prelude::*, EnvFilter};

pub mod generate;

pub use generate::*;

pub fn handle_error<E>(error: E)
where
    E: Display,
{
    eprintln!("{error}");
    ::std::process::exit(1);
}

/// Install the global subscriber; `RUST_LOG` wins over the defaults
pub fn init_tracing(verbose: bool) {
    let filter = match verbose {
        true => "debug",
        false => "dalgen=info",
    };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if verbose {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(false)
            .without_time();
        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    }
}
