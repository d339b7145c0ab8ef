// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Diagnostic logging for the CLI.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";
/// Filter used when `RUST_LOG` is unset and verbose output was requested.
const VERBOSE_FILTER: &str = "warn,redirgen=debug";

/// Installs the global `tracing` subscriber.
///
/// Events go to stderr so stdout only carries the run summary or JSON output.
/// `RUST_LOG` takes precedence over `verbose`. Calling this more than once is
/// harmless: later calls leave the first subscriber in place.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
