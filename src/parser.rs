use log::debug;
use thiserror::Error;

use crate::{
    diagnostics::{Diagnostic, Diagnostics, ErrorCode},
    dispatch::Dispatcher,
    lexer::Tokenizer,
    output::Report,
    registry::{
        Declaration, DeclaredKind, Kind, OutputMap, ParamIndex, Parameter, RegistrationError,
        Registry, Value,
    },
};

/// Where rendered text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// Written to standard output as soon as it is rendered
    #[default]
    Stdout,
    /// Kept until [`Parser::take_output`] is called
    Capture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputConfig {
    pub emit: Emit,
    /// Print a one-line error count when validation fails without
    /// `--verbose`. Off by default, so such failures are silent.
    pub failure_summary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Nothing validated yet
    #[default]
    Idle,
    Succeeded,
    Failed,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("argument validation failed with {count} diagnostic(s)")]
pub struct Failure {
    pub count: usize,
}

impl Failure {
    /// Process exit status for a failed validation.
    pub fn status(&self) -> i32 {
        1
    }
}

fn builtin(aliases: [&str; 2], description: &str) -> Parameter {
    Parameter {
        aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        kind: DeclaredKind::Known(Kind::Boolean),
        mandatory: false,
        description: description.to_owned(),
        default: Value::Flag(false),
    }
}

/// A declarative command-line parser: register parameters, then validate
/// the argument vector it was built with.
///
/// ```
/// use paramparse::{Declaration, Kind, OutputConfig, Emit, Parser};
///
/// let mut parser = Parser::new(["prog", "--name", "ferris"], "Greets someone.")
///     .with_config(OutputConfig { emit: Emit::Capture, ..Default::default() });
/// parser
///     .register(
///         Declaration::new()
///             .mandatory(true)
///             .kind(Kind::String)
///             .description("Who to greet.")
///             .default_value("")
///             .aliases(["n", "name"]),
///     )
///     .unwrap();
/// assert!(parser.validate().is_ok());
/// assert_eq!(parser.args().unwrap().text("n"), Some("ferris"));
/// ```
#[derive(Debug)]
pub struct Parser {
    argv: Vec<String>,
    description: String,
    registry: Registry,
    out: OutputMap,
    diagnostics: Diagnostics,
    config: OutputConfig,
    state: State,
    captured: String,
}

impl Parser {
    /// Element 0 of `argv` is the program name and is never scanned.
    /// `-v|--verbose` and `-h|--help` are registered up front.
    pub fn new<I, S>(argv: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parser = Self {
            argv: argv.into_iter().map(Into::into).collect(),
            description: description.into(),
            registry: Registry::new(),
            out: OutputMap::new(),
            diagnostics: Diagnostics::new(),
            config: OutputConfig::default(),
            state: State::Idle,
            captured: String::new(),
        };
        for param in [
            builtin(["v", "verbose"], "Make project verbose."),
            builtin(["h", "help"], "Show manual."),
        ] {
            parser.out.seed(&param);
            parser.registry.insert(param);
        }
        parser
    }

    pub fn with_config(mut self, config: OutputConfig) -> Self {
        self.config = config;
        self
    }

    pub fn register(&mut self, decl: Declaration) -> Result<ParamIndex, RegistrationError> {
        let index = self.registry.register(decl)?;
        if let Some(param) = self.registry.get(index) {
            self.out.seed(param);
        }
        Ok(index)
    }

    /// Scans the argument vector, checks mandatory parameters, then emits
    /// whatever the verbose and help flags ask for.
    ///
    /// Diagnostics accumulate across calls, so validating twice reports the
    /// first pass's bindings as reuse.
    pub fn validate(&mut self) -> Result<(), Failure> {
        let mut tokens = Tokenizer::new(&self.argv).peekable();
        Dispatcher::new(&self.registry, &mut self.out, &mut self.diagnostics).run(&mut tokens);
        check_mandatory(&self.registry, &self.out, &mut self.diagnostics);

        let text = Report {
            program: self.program(),
            description: &self.description,
            registry: &self.registry,
            out: &self.out,
            diagnostics: &self.diagnostics,
            failure_summary: self.config.failure_summary,
        }
        .render();
        self.emit(&text);

        if self.diagnostics.is_empty() {
            self.state = State::Succeeded;
            Ok(())
        } else {
            debug!("validation failed with {} diagnostic(s)", self.diagnostics.len());
            self.state = State::Failed;
            Err(Failure {
                count: self.diagnostics.len(),
            })
        }
    }

    fn emit(&mut self, text: &str) {
        match self.config.emit {
            Emit::Stdout => print!("{text}"),
            Emit::Capture => self.captured.push_str(text),
        }
    }

    /// The resolved values, available only after a successful validation.
    pub fn args(&self) -> Option<&OutputMap> {
        match self.state {
            State::Succeeded => Some(&self.out),
            State::Idle | State::Failed => None,
        }
    }

    /// 0 after a successful validation, 1 otherwise.
    pub fn status(&self) -> i32 {
        match self.state {
            State::Succeeded => 0,
            State::Idle | State::Failed => 1,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn program(&self) -> &str {
        self.argv.first().map_or("", String::as_str)
    }

    /// Drains text held back by [`Emit::Capture`].
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.captured)
    }
}

/// Raises a diagnostic for every mandatory parameter none of whose aliases
/// moved away from the default.
fn check_mandatory(registry: &Registry, out: &OutputMap, diagnostics: &mut Diagnostics) {
    for param in registry.iter().filter(|param| param.mandatory) {
        if !out.is_touched(param) {
            debug!("mandatory parameter {} was not supplied", param.alias_list());
            diagnostics.raise(ErrorCode::MandatoryMissing, param.alias_list());
        }
    }
}
