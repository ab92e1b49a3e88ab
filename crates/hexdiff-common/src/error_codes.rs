//! Error categories and their process exit codes.
//!
//! Exit codes follow BSD sysexits.h so scripts can tell a bad invocation
//! from an unreadable input.

/// Exit codes based on BSD sysexits.h
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USAGE: i32 = 64; // EX_USAGE: command line usage error
    pub const NOINPUT: i32 = 66; // EX_NOINPUT: cannot open input
    pub const SOFTWARE: i32 = 70; // EX_SOFTWARE: internal software error
    pub const IOERR: i32 = 74; // EX_IOERR: input/output error
}

/// Error category for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid configuration or arguments
    InvalidInput,
    /// An input could not be opened
    NotFound,
    /// Reading an input or writing the output failed
    External,
    /// Bug or unexpected internal state
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidInput => "invalid_input",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::External => "external",
            ErrorCategory::Internal => "internal",
        }
    }

    /// Converts to UNIX sysexits.h-compliant exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::InvalidInput => exit_codes::USAGE,
            ErrorCategory::NotFound => exit_codes::NOINPUT,
            ErrorCategory::External => exit_codes::IOERR,
            ErrorCategory::Internal => exit_codes::SOFTWARE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_as_str() {
        assert_eq!(ErrorCategory::InvalidInput.as_str(), "invalid_input");
        assert_eq!(ErrorCategory::NotFound.as_str(), "not_found");
        assert_eq!(ErrorCategory::External.as_str(), "external");
        assert_eq!(ErrorCategory::Internal.as_str(), "internal");
    }

    #[test]
    fn test_category_exit_codes_are_distinct() {
        let codes = [
            ErrorCategory::InvalidInput.exit_code(),
            ErrorCategory::NotFound.exit_code(),
            ErrorCategory::External.exit_code(),
            ErrorCategory::Internal.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, exit_codes::SUCCESS);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
