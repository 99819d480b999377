use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bus::DiagnosticBus;
use crate::context::RuntimeContext;
use crate::error::{FableError, Result};

/// Top-level Fable configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    #[serde(default)]
    pub context: ContextConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Include the event target in log lines.
    #[serde(default)]
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            with_target: false,
        }
    }
}

fn default_log_filter() -> String {
    "fable=info,warn".to_string()
}

/// Diagnostic delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Buffered diagnostics per subscriber before the oldest are dropped.
    #[serde(default = "default_bus_capacity")]
    pub bus_capacity: usize,
    /// Echo every diagnostic to `tracing` as well as the bus.
    #[serde(default = "default_trace")]
    pub trace: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            bus_capacity: default_bus_capacity(),
            trace: default_trace(),
        }
    }
}

fn default_bus_capacity() -> usize {
    256
}

fn default_trace() -> bool {
    true
}

impl DiagnosticsConfig {
    /// Build the diagnostic bus described by this section.
    pub fn build_bus(&self) -> DiagnosticBus {
        DiagnosticBus::new(self.bus_capacity).with_trace(self.trace)
    }
}

/// Initial runtime contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Label of the local context.
    #[serde(default = "default_local_label")]
    pub label: String,
    /// Seed values for the local context.
    #[serde(default)]
    pub local: HashMap<String, serde_json::Value>,
    /// Seed values for the shared context. Absent means no shared context.
    #[serde(default)]
    pub shared: Option<HashMap<String, serde_json::Value>>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            label: default_local_label(),
            local: HashMap::new(),
            shared: None,
        }
    }
}

fn default_local_label() -> String {
    "local".to_string()
}

impl ContextConfig {
    /// Build the local context and, if configured, the shared one.
    pub fn build(&self) -> (RuntimeContext, Option<RuntimeContext>) {
        let local = RuntimeContext::from_map(self.label.clone(), self.local.clone());
        let shared = self
            .shared
            .as_ref()
            .map(|seed| RuntimeContext::from_map("shared", seed.clone()));
        (local, shared)
    }
}

impl AppConfig {
    /// Load config from a TOML file, with env var expansion.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| FableError::ConfigNotFound(path.display().to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse config from TOML text, with env var expansion.
    pub fn from_toml(content: &str) -> Result<Self> {
        // Expand ${ENV_VAR} references
        let expanded = expand_env_vars(content);

        toml::from_str(&expanded).map_err(|e| FableError::Config(e.to_string()))
    }
}

/// Expand `${ENV_VAR}` patterns in a string.
///
/// Unset variables and an unterminated `${` are left as written.
fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };
        let var_name = &after[..end];
        match std::env::var(var_name) {
            Ok(val) => result.push_str(&val),
            Err(_) => result.push_str(&rest[start..start + end + 3]),
        }
        rest = &after[end + 1..];
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("TEST_FABLE_VAR", "hello");
        let result = expand_env_vars("key = \"${TEST_FABLE_VAR}\"");
        assert_eq!(result, "key = \"hello\"");
        std::env::remove_var("TEST_FABLE_VAR");
    }

    #[test]
    fn test_expand_env_vars_missing() {
        let result = expand_env_vars("key = \"${NONEXISTENT_FABLE_VAR}\"");
        assert_eq!(result, "key = \"${NONEXISTENT_FABLE_VAR}\"");
    }

    #[test]
    fn test_expand_env_vars_unterminated() {
        assert_eq!(expand_env_vars("filter = \"${FOO"), "filter = \"${FOO");
        assert_eq!(expand_env_vars("a $ b ${"), "a $ b ${");
    }

    #[test]
    fn test_expand_env_vars_adjacent() {
        std::env::set_var("TEST_FABLE_LEFT", "fable");
        std::env::set_var("TEST_FABLE_RIGHT", "debug");
        let result = expand_env_vars("${TEST_FABLE_LEFT}=${TEST_FABLE_RIGHT}, $x");
        assert_eq!(result, "fable=debug, $x");
        std::env::remove_var("TEST_FABLE_LEFT");
        std::env::remove_var("TEST_FABLE_RIGHT");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.log.filter, "fable=info,warn");
        assert!(!config.log.with_target);
        assert_eq!(config.diagnostics.bus_capacity, 256);
        assert!(config.diagnostics.trace);
        assert_eq!(config.context.label, "local");
        assert!(config.context.local.is_empty());
        assert!(config.context.shared.is_none());
    }

    #[test]
    fn test_context_seeds() {
        let toml_str = r#"
[context]
label = "hero"

[context.local]
gold = 10
met_king = true

[context.shared]
chapter = "two"
"#;
        let config = AppConfig::from_toml(toml_str).unwrap();
        let (local, shared) = config.context.build();
        assert_eq!(local.label(), "hero");
        assert_eq!(local.get_i64("gold"), Some(10));
        assert_eq!(local.get("met_king"), Some(&serde_json::json!(true)));

        let shared = shared.expect("shared context configured");
        assert_eq!(shared.label(), "shared");
        assert_eq!(shared.get_str("chapter"), Some("two"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[log\nfilter = ").unwrap_err();
        assert!(matches!(err, FableError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = AppConfig::load(Path::new("/definitely/not/here/fable.toml")).unwrap_err();
        assert!(matches!(err, FableError::ConfigNotFound(_)));
    }
}
