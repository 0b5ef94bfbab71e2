//! Logger initialisation for the game loop and the engine it drives.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages from the engine are printed.
/// Otherwise only info level and above are shown. `RUST_LOG` overrides both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // A logger may already be installed; repeated calls are a no-op.
    let _ = builder.try_init();
}
