use std::path::PathBuf;

use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

/// Process exit codes reported by the `jsoncmd` binary.
pub mod exit_codes {
    pub const OK: u8 = 0;
    pub const DIFF: u8 = 1; // compare mismatch / nothing found
    pub const USAGE: u8 = 2; // bad invocation, or help was shown
    pub const NO_FILE: u8 = 3;
    pub const PARSE_ERROR: u8 = 4;
    pub const B64_ERROR: u8 = 5;
}

// Failures of the command layer. The query engine itself never fails.
#[derive(Debug, Error)]
pub enum CmdError {
    // Wrong arguments for the selected mode
    #[error("usage error: {0}")]
    Usage(String),

    // The JSON file named by `/f` (or the default) does not exist
    #[error("JSON file not found: {}", .0.display())]
    NoFile(PathBuf),

    // Reading the JSON file or writing the report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // The JSON file is not valid JSON
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    // A `b64:` literal did not decode to UTF-8 text
    #[error("failed to decode Base64 literal: {0}")]
    Base64(String),
}

impl CmdError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CmdError::Usage(_) => exit_codes::USAGE,
            CmdError::NoFile(_) => exit_codes::NO_FILE,
            CmdError::Io(_) | CmdError::Parse(_) => exit_codes::PARSE_ERROR,
            CmdError::Base64(_) => exit_codes::B64_ERROR,
        }
    }
}

// Type alias for results that use `CmdError` as the error type
pub type Result<T> = std::result::Result<T, CmdError>;
