//! Error types for the CSR engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition the engine can report.

use thiserror::Error;

/// The main error type for the CSR engine.
///
/// All fallible operations in the engine return this error type, so the
/// HTTP layer and library callers handle failures in one place.
///
/// # Example
///
/// ```
/// use csr_engine::error::EngineError;
///
/// let error = EngineError::InvalidSnapshot {
///     field: "inspections.missed".to_string(),
///     message: "exceeds total_sessions".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid snapshot field 'inspections.missed': exceeds total_sessions"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but describes an unusable scoring model.
    #[error("Invalid scoring configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// A compliance snapshot was malformed or internally inconsistent.
    #[error("Invalid snapshot field '{field}': {message}")]
    InvalidSnapshot {
        /// The snapshot field that failed validation.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A viewer role asked for a projection it is not entitled to.
    #[error("Role '{role}' is not permitted to view the safety rating of '{company_id}'")]
    UnauthorizedView {
        /// The requesting role.
        role: String,
        /// The company whose rating was requested.
        company_id: String,
    },

    /// No company with the given identifier is registered.
    #[error("Company not found: {company_id}")]
    CompanyNotFound {
        /// The company identifier that was not found.
        company_id: String,
    },

    /// A company with the given identifier is already registered.
    #[error("Company already registered: {company_id}")]
    CompanyAlreadyExists {
        /// The duplicated company identifier.
        company_id: String,
    },

    /// A compliance event could not be applied to the current facts.
    #[error("Invalid event for company '{company_id}': {message}")]
    InvalidEvent {
        /// The company the event targeted.
        company_id: String,
        /// Why the event was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/tiers.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/tiers.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/categories.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/categories.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_message() {
        let error = EngineError::InvalidConfig {
            message: "tier thresholds must descend".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid scoring configuration: tier thresholds must descend"
        );
    }

    #[test]
    fn test_unauthorized_view_displays_role_and_company() {
        let error = EngineError::UnauthorizedView {
            role: "resident".to_string(),
            company_id: "acme_rope".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Role 'resident' is not permitted to view the safety rating of 'acme_rope'"
        );
    }

    #[test]
    fn test_company_not_found_displays_id() {
        let error = EngineError::CompanyNotFound {
            company_id: "ghost".to_string(),
        };
        assert_eq!(error.to_string(), "Company not found: ghost");
    }

    #[test]
    fn test_invalid_event_displays_company_and_message() {
        let error = EngineError::InvalidEvent {
            company_id: "acme_rope".to_string(),
            message: "unknown project 'tower_9'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid event for company 'acme_rope': unknown project 'tower_9'"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::CompanyNotFound {
                company_id: "ghost".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
