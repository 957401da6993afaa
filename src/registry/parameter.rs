use std::{fmt, str::FromStr};

use thiserror::Error;

/// The value kinds a parameter can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Consumes the following argument as literal text
    String,
    /// A flag, switched on by its presence
    Boolean,
    /// A group of mutually exclusive switches; each alias is a branch
    Enumerated,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized parameter kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "string" => Ok(Kind::String),
            "bool" | "boolean" => Ok(Kind::Boolean),
            "enum" | "enumerated" => Ok(Kind::Enumerated),
            other => Err(UnknownKind(other.to_owned())),
        }
    }
}

/// A kind as it was declared. Tags that did not parse are kept so their use
/// can be reported against the argument that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredKind {
    Known(Kind),
    Unrecognized(String),
}

/// A bound value in the output map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Flag(bool),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(flag) => Some(*flag),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Flag(flag)
    }
}

/// A registered parameter definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub aliases: Vec<String>,
    pub kind: DeclaredKind,
    pub mandatory: bool,
    pub description: String,
    /// The value that counts as "not supplied"
    pub default: Value,
}

impl Parameter {
    /// Renders the aliases as they are typed on a command line, e.g.
    /// `-r|--req-string`.
    pub fn alias_list(&self) -> String {
        self.aliases
            .iter()
            .map(|alias| {
                if alias.chars().count() == 1 {
                    format!("-{alias}")
                } else {
                    format!("--{alias}")
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Whether a default is of the variant this kind binds.
    pub(crate) fn default_fits(&self) -> bool {
        match (&self.kind, &self.default) {
            (DeclaredKind::Known(Kind::String), Value::Text(_)) => true,
            (DeclaredKind::Known(Kind::Boolean | Kind::Enumerated), Value::Flag(_)) => true,
            (DeclaredKind::Unrecognized(_), _) => true,
            _ => false,
        }
    }
}

/// Fields of a [`Declaration`], in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mandatory,
    Kind,
    Description,
    DefaultValue,
    Aliases,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Mandatory => "mandatory",
            Field::Kind => "kind",
            Field::Description => "description",
            Field::DefaultValue => "defaultValue",
            Field::Aliases => "aliases",
        })
    }
}

/// A parameter under construction. Every field must be set before it can be
/// registered.
///
/// ```
/// use paramparse::{Declaration, Kind};
///
/// let decl = Declaration::new()
///     .mandatory(true)
///     .kind(Kind::String)
///     .description("A required string.")
///     .default_value("")
///     .aliases(["r", "req-string"]);
/// assert!(decl.build().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Declaration {
    mandatory: Option<bool>,
    kind: Option<DeclaredKind>,
    description: Option<String>,
    default: Option<Value>,
    aliases: Option<Vec<String>>,
}

impl Declaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = Some(mandatory);
        self
    }

    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(DeclaredKind::Known(kind));
        self
    }

    /// Declares the kind by its tag (`string`, `bool`, `enum`). An
    /// unrecognized tag is accepted here and reported when the parameter is
    /// used.
    pub fn kind_tag(mut self, tag: &str) -> Self {
        self.kind = Some(match tag.parse() {
            Ok(kind) => DeclaredKind::Known(kind),
            Err(UnknownKind(tag)) => DeclaredKind::Unrecognized(tag),
        });
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }

    /// Turns the declaration into a parameter, naming the first missing field
    /// otherwise.
    pub fn build(self) -> Result<Parameter, Field> {
        Ok(Parameter {
            mandatory: self.mandatory.ok_or(Field::Mandatory)?,
            kind: self.kind.ok_or(Field::Kind)?,
            description: self.description.ok_or(Field::Description)?,
            default: self.default.ok_or(Field::DefaultValue)?,
            aliases: self.aliases.ok_or(Field::Aliases)?,
        })
    }
}
