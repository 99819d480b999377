pub mod bus;
pub mod config;
pub mod context;
pub mod diagnostic;
pub mod error;
pub mod traits;
pub mod types;

pub use bus::DiagnosticBus;
pub use config::AppConfig;
pub use context::{ContextScope, RuntimeContext};
pub use diagnostic::{
    CapabilityKind, CollectingSink, Diagnostic, DiagnosticKind, DiagnosticLevel, DiagnosticSink,
    TracingSink,
};
pub use error::{FableError, Result};
pub use traits::{Condition, Event};
pub use types::*;
