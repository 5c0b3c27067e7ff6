pub mod config;
pub mod errors;
pub mod executor;
pub mod navigator;
pub mod perception;
pub mod solver;

pub use config::AppConfig;
pub use errors::{ErrorTier, MowerError, MowerResult};
pub use perception::types::{Coordinate, Landmark, Location, Scene};
pub use solver::{RetryOutcome, Settle, Solver, Task};

/// Installs the global `tracing` subscriber and loads `.env` if present.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
