//! Generation modes and the fixed output schemas.
//!
//! A schema is a plain ordered column list, not a record type: projection and
//! header emission downstream are generic over any ordered column list, so
//! the three modes differ only in data.

use clap::ValueEnum;

/// Output columns for API test cases.
pub const API_COLUMNS: &[&str] = &[
    "Test Case ID",
    "Test Case Description",
    "Preconditions",
    "Endpoint",
    "Method",
    "Request Body",
    "Expected Response",
    "Remarks",
];

/// Output columns for UI test cases.
pub const UI_COLUMNS: &[&str] = &[
    "Test Case ID",
    "Test Case Description",
    "Preconditions",
    "Steps",
    "Expected Result",
    "Remarks",
];

/// Output columns for functional test cases.
pub const FUNCTIONAL_COLUMNS: &[&str] = &[
    "Test Case ID",
    "Test Case Description",
    "Preconditions",
    "Test Steps",
    "Expected Outcome",
    "Remarks",
];

/// Selects the classification rule, instruction template, and output schema
/// for one generation run.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationMode {
    Api,
    Ui,
    Functional,
}

impl GenerationMode {
    /// Lowercase mode name used for logging and output file naming.
    pub fn label(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Ui => "ui",
            Self::Functional => "functional",
        }
    }

    /// Ordered output columns for this mode.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Api => API_COLUMNS,
            Self::Ui => UI_COLUMNS,
            Self::Functional => FUNCTIONAL_COLUMNS,
        }
    }

    /// Provenance label used in context block headers.
    pub fn doc_category(self) -> &'static str {
        match self {
            Self::Api => "Swagger",
            Self::Ui => "UI Doc",
            Self::Functional => "Functional Doc",
        }
    }
}
