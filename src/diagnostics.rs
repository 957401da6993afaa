//! Structured records of everything that went wrong while validating an
//! argument vector. None of these stop the scan; any record at all means
//! validation failed.

use std::fmt;

use log::debug;

/// The argument diagnostics, numbered as they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A parameter was declared with a kind tag nothing can dispatch on
    UnknownKind = 1,
    /// An alias was supplied after it had already been bound
    AlreadyUsed = 2,
    /// A flag names no registered alias
    UnknownParameter = 3,
    /// An argument carries no `-`/`--` marker where an option was expected
    Unmarked = 4,
    /// A string option is followed by a flag instead of a value
    InvalidString = 5,
    /// A mandatory parameter was never bound away from its default
    MandatoryMissing = 6,
}

impl ErrorCode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::UnknownKind => "Unknown option type in parameter declaration.",
            ErrorCode::AlreadyUsed => "Parameter already used.",
            ErrorCode::UnknownParameter => "Unknown parameter.",
            ErrorCode::Unmarked => {
                "Argument is not marked with - or --, or a marker is missing before a value."
            }
            ErrorCode::InvalidString => "Invalid string.",
            ErrorCode::MandatoryMissing => "Argument is mandatory and has not been filled.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    /// The offending argument, kind tag or alias list
    pub context: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} [{}]",
            self.code.code(),
            self.message,
            self.context
        )
    }
}

/// Append-only list of diagnostics, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn raise(&mut self, code: ErrorCode, context: impl Into<String>) {
        let diagnostic = Diagnostic {
            code,
            message: code.message(),
            context: context.into(),
        };
        debug!("raised {diagnostic}");
        self.records.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.records
    }

    /// The codes raised so far, in order.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.records.iter().map(|record| record.code).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn codes_are_numbered() {
        assert_eq!(ErrorCode::UnknownKind.code(), 1);
        assert_eq!(ErrorCode::MandatoryMissing.code(), 6);
    }

    #[test]
    fn renders_code_message_and_context() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.raise(ErrorCode::UnknownParameter, "--nope");
        let rendered: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["3 - Unknown parameter. [--nope]"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.raise(ErrorCode::Unmarked, "a");
        diagnostics.raise(ErrorCode::Unmarked, "a");
        diagnostics.raise(ErrorCode::AlreadyUsed, "-r");
        assert_eq!(
            diagnostics.codes(),
            vec![ErrorCode::Unmarked, ErrorCode::Unmarked, ErrorCode::AlreadyUsed]
        );
    }
}
