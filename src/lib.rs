pub use fable_core::*;
pub use fable_node::*;

pub use fable_core::config::{ContextConfig, DiagnosticsConfig, LogConfig};

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` wins over `config.filter`. Returns `false` if a global
/// subscriber was already installed.
pub fn init_logging(config: &LogConfig) -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter)),
        )
        .with_target(config.with_target)
        .try_init()
        .is_ok();
    if !installed {
        tracing::debug!("Global subscriber already installed, keeping it");
    }
    installed
}
