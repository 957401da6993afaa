mod parameter;
use std::collections::HashMap;

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

pub use parameter::*;

/// Index of a parameter within the registry, in registration order
pub type ParamIndex = usize;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("parameter declaration is missing `{0}`")]
    MissingField(Field),
    #[error("parameter declaration has no aliases")]
    NoAliases,
    #[error("parameter declaration has an empty alias")]
    EmptyAlias,
    #[error("alias `{0}` is already registered")]
    DuplicateAlias(String),
    #[error("default value `{default}` does not fit parameter `{aliases}`")]
    DefaultMismatch { aliases: String, default: Value },
}

impl From<Field> for RegistrationError {
    fn from(field: Field) -> Self {
        RegistrationError::MissingField(field)
    }
}

/// The declared parameters, in registration order, plus a lookup from every
/// alias to the parameter that owns it.
#[derive(Debug, Default)]
pub struct Registry {
    parameters: Vec<Parameter>,
    lookup: HashMap<String, ParamIndex>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a declaration and appends it.
    pub fn register(&mut self, decl: Declaration) -> Result<ParamIndex, RegistrationError> {
        let param = decl.build()?;
        if param.aliases.is_empty() {
            return Err(RegistrationError::NoAliases);
        }
        for (position, alias) in param.aliases.iter().enumerate() {
            if alias.is_empty() {
                return Err(RegistrationError::EmptyAlias);
            }
            if self.lookup.contains_key(alias) || param.aliases[..position].contains(alias) {
                return Err(RegistrationError::DuplicateAlias(alias.clone()));
            }
        }
        if !param.default_fits() {
            return Err(RegistrationError::DefaultMismatch {
                aliases: param.alias_list(),
                default: param.default,
            });
        }
        Ok(self.insert(param))
    }

    /// Appends a parameter whose aliases are known to be fresh.
    pub(crate) fn insert(&mut self, param: Parameter) -> ParamIndex {
        let index = self.parameters.len();
        for alias in &param.aliases {
            self.lookup.insert(alias.clone(), index);
        }
        trace!("registered {} at index {index}", param.alias_list());
        self.parameters.push(param);
        index
    }

    pub fn lookup(&self, alias: &str) -> Option<ParamIndex> {
        self.lookup.get(alias).copied()
    }

    pub fn get(&self, index: ParamIndex) -> Option<&Parameter> {
        self.parameters.get(index)
    }

    /// Resolves an alias straight to its parameter.
    pub fn resolve(&self, alias: &str) -> Option<&Parameter> {
        self.lookup(alias).and_then(|index| self.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Every alias mapped to its currently bound value, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputMap {
    values: IndexMap<String, Value>,
}

impl OutputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every alias of a freshly registered parameter to its default.
    pub(crate) fn seed(&mut self, param: &Parameter) {
        for alias in &param.aliases {
            self.values.insert(alias.clone(), param.default.clone());
        }
    }

    pub(crate) fn bind(&mut self, alias: &str, value: Value) {
        trace!("binding {alias:?} to {value:?}");
        if let Some(slot) = self.values.get_mut(alias) {
            *slot = value;
        }
    }

    /// Binds the same value to every alias of a parameter.
    pub(crate) fn bind_all(&mut self, param: &Parameter, value: Value) {
        for alias in &param.aliases {
            self.bind(alias, value.clone());
        }
    }

    /// Whether any alias of the parameter is bound away from its default.
    pub fn is_touched(&self, param: &Parameter) -> bool {
        param
            .aliases
            .iter()
            .any(|alias| self.values.get(alias) != Some(&param.default))
    }

    pub fn get(&self, alias: &str) -> Option<&Value> {
        self.values.get(alias)
    }

    pub fn text(&self, alias: &str) -> Option<&str> {
        self.get(alias).and_then(Value::as_text)
    }

    pub fn flag(&self, alias: &str) -> Option<bool> {
        self.get(alias).and_then(Value::as_flag)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.values.contains_key(alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(alias, value)| (alias.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
