//! Report error types.

use folio_shared::AppError;
use thiserror::Error;

use crate::fiscal::FiscalError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Required filter inputs are missing or invalid for the selected mode.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The chart of accounts is inconsistent.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// A data-source collaborator failed.
    #[error("Data source error: {0}")]
    Source(String),

    /// No report is registered under the given name.
    #[error("Unknown report: {0}")]
    UnknownReport(String),
}

impl ReportError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::DataIntegrity(_) => "DATA_INTEGRITY_ERROR",
            Self::Source(_) => "DATA_SOURCE_ERROR",
            Self::UnknownReport(_) => "UNKNOWN_REPORT",
        }
    }

    pub(crate) fn missing_parent(account: &str, parent: &str) -> Self {
        Self::DataIntegrity(format!(
            "account '{account}' references missing parent account '{parent}'"
        ))
    }

    pub(crate) fn parent_cycle(account: &str) -> Self {
        Self::DataIntegrity(format!(
            "parent chain of account '{account}' loops back on itself"
        ))
    }
}

impl From<FiscalError> for ReportError {
    fn from(err: FiscalError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Configuration(msg) => Self::Validation(msg),
            ReportError::DataIntegrity(msg) => Self::BusinessRule(msg),
            ReportError::Source(msg) => Self::Database(msg),
            ReportError::UnknownReport(name) => Self::NotFound(format!("report '{name}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_shared::types::MonthDay;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ReportError::Configuration(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(
            ReportError::DataIntegrity(String::new()).error_code(),
            "DATA_INTEGRITY_ERROR"
        );
        assert_eq!(ReportError::Source(String::new()).error_code(), "DATA_SOURCE_ERROR");
        assert_eq!(
            ReportError::UnknownReport(String::new()).error_code(),
            "UNKNOWN_REPORT"
        );
    }

    #[test]
    fn test_missing_parent_message() {
        let err = ReportError::missing_parent("Sales", "Income");
        assert_eq!(
            err.to_string(),
            "Data integrity error: account 'Sales' references missing parent account 'Income'"
        );
    }

    #[test]
    fn test_fiscal_error_is_configuration() {
        let err: ReportError = FiscalError::InvalidBoundary {
            month_day: MonthDay::new(2, 29),
            year: 2023,
        }
        .into();
        assert!(matches!(err, ReportError::Configuration(_)));
    }

    #[test]
    fn test_app_error_mapping() {
        let app: AppError = ReportError::Configuration("x".into()).into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");

        let app: AppError = ReportError::DataIntegrity("x".into()).into();
        assert_eq!(app.error_code(), "BUSINESS_RULE_VIOLATION");

        let app: AppError = ReportError::Source("x".into()).into();
        assert_eq!(app.error_code(), "DATABASE_ERROR");

        let app: AppError = ReportError::UnknownReport("x".into()).into();
        assert_eq!(app.to_string(), "Not found: report 'x'");
    }
}
