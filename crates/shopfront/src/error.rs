//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use shopfront_config::ConfigError;
use shopfront_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the catalog API at {url}")]
    #[diagnostic(
        code(shopfront::connection_failed),
        help(
            "Check that the catalog server is running and reachable.\n\
             Override the URL with --api-url or `shopfront config set api_url <URL>`."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(shopfront::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(shopfront::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
        #[help]
        hint: Option<String>,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(shopfront::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(shopfront::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(shopfront::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: shopfront config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(shopfront::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(shopfront::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::ProductNotFound { identifier } => CliError::NotFound {
                hint: list_hint("product"),
                resource_type: "product".into(),
                identifier,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                hint: list_hint(&entity_type),
                resource_type: entity_type,
                identifier,
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "transport".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

/// Help line pointing at the listing command for `entity_type`, if the CLI
/// has one.
fn list_hint(entity_type: &str) -> Option<String> {
    let (command, plural) = match entity_type {
        "product" => ("products list", "products"),
        "category" => ("categories list", "categories"),
        "brand" => ("brands list", "brands"),
        _ => return None,
    };
    Some(format!("Run: shopfront {command} to see available {plural}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        let not_found = CliError::from(CoreError::ProductNotFound {
            identifier: "7".into(),
        });
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        let refused = CliError::from(CoreError::ConnectionFailed {
            url: "http://localhost:8080/products".into(),
            reason: "connection refused".into(),
        });
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);
        let bad = CliError::from(CoreError::ValidationFailed {
            message: "empty id".into(),
        });
        assert_eq!(bad.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn api_errors_carry_http_status() {
        let err = CliError::from(CoreError::Api {
            message: "boom".into(),
            status: Some(503),
        });
        assert_eq!(err.to_string(), "API error (503): boom");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn config_validation_becomes_usage_error() {
        let err = CliError::from(ConfigError::Validation {
            field: "api_url".into(),
            reason: "invalid URL".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn not_found_hint_names_a_real_command() {
        let product = CliError::from(CoreError::ProductNotFound {
            identifier: "7".into(),
        });
        assert_eq!(
            product.help().map(|h| h.to_string()).as_deref(),
            Some("Run: shopfront products list to see available products")
        );

        let generic = CliError::from(CoreError::NotFound {
            entity_type: "resource".into(),
            identifier: "Not Found".into(),
        });
        assert_eq!(generic.exit_code(), exit_code::NOT_FOUND);
        assert!(generic.help().is_none());
    }
}
