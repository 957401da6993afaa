//! A declarative command-line argument parser.
//!
//! Parameters are registered with a kind, a mandatory flag, a description,
//! a default and a set of aliases. [`Parser::validate`] then walks the
//! argument vector, binds values to every alias of the matching parameter,
//! and records a [`Diagnostic`] for anything it cannot accept.

mod diagnostics;
mod dispatch;
mod lexer;
mod output;
mod parser;
mod registry;

pub use diagnostics::{Diagnostic, Diagnostics, ErrorCode};
pub use lexer::{Marker, Token, TokenKind, Tokenizer};
pub use output::{errors, manual, trace, Report, HELP, VERBOSE};
pub use parser::{Emit, Failure, OutputConfig, Parser, State};
pub use registry::{
    Declaration, DeclaredKind, Field, Kind, OutputMap, ParamIndex, Parameter, RegistrationError,
    Registry, UnknownKind, Value,
};
