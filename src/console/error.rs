//! Console error types

/// Input error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Line longer than the input buffer, excess dropped
    Overflow,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Overflow => "E01",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Overflow => "line too long, truncated",
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
