//! Logger bootstrap shared by the server binary and tests.
//!
//! Verbosity only raises this crate's own level. Dependencies stay at info so
//! hyper and tungstenite frame traces do not bury room events.
use env_logger::{Builder, Env};
use log::debug;

/// Filter used when `RUST_LOG` is not set.
///
/// # Examples
///
/// ```
/// assert_eq!(mece::logging::default_filter(true), "mece=debug,info");
/// ```
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let own = if verbose { "debug" } else { "info" };
    format!("{}={own},info", env!("CARGO_PKG_NAME"))
}

/// Initializes the global logger.
///
/// `RUST_LOG` takes precedence over [`default_filter`]. Calling this again
/// keeps the logger installed first.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder
        .format_timestamp_millis()
        .format_module_path(false)
        .format_target(true);

    if builder.try_init().is_err() {
        debug!("logger already installed");
    }
}
