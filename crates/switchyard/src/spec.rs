use std::cmp::Ordering;
use std::fmt;

use crate::error::ConstructionError;
use crate::value::{Literal, Value, ValueType};

/// Whether a spec describes a leading positional argument or a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKind {
    Argument,
    Option,
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Argument => "argument",
            Self::Option => "option",
        })
    }
}

/// Name collection for a declaration: a single name or `[name, alias, ...]`.
pub trait SpecNames {
    fn into_names(self) -> Vec<String>;
}

impl SpecNames for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl SpecNames for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl SpecNames for &[&str] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> SpecNames for [&str; N] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl SpecNames for Vec<String> {
    fn into_names(self) -> Vec<String> {
        self
    }
}

/// Raw declaration fields, validated by [`SpecDef::build`].
///
/// `value_type` is a type token (`"string"`, `"numeric"`, ...) so declarations
/// coming from untyped sources can be rejected with a proper error.
#[derive(Debug, Clone)]
pub struct SpecDef {
    pub kind: SpecKind,
    pub name: String,
    pub description: Option<String>,
    pub required: bool,
    pub value_type: String,
    pub default: Option<Value>,
    /// Ignored for arguments.
    pub aliases: Vec<String>,
}

impl Default for SpecDef {
    fn default() -> Self {
        Self {
            kind: SpecKind::Option,
            name: String::new(),
            description: None,
            required: false,
            value_type: ValueType::Default.as_str().to_string(),
            default: None,
            aliases: Vec::new(),
        }
    }
}

impl SpecDef {
    pub fn build(self) -> Result<ValueSpec, ConstructionError> {
        let kind = self.kind;
        if self.name.trim().is_empty() {
            return Err(ConstructionError::MissingName { kind });
        }
        if self.required && self.default.is_some() {
            return Err(ConstructionError::RequiredWithDefault {
                kind,
                name: self.name,
            });
        }
        if kind == SpecKind::Argument && !self.required && self.default.is_none() {
            return Err(ConstructionError::OptionalArgumentWithoutDefault { name: self.name });
        }
        let value_type = self
            .value_type
            .parse::<ValueType>()
            .map_err(|e| ConstructionError::UnknownType {
                kind,
                value_type: e.0,
            })?;
        let aliases = match kind {
            SpecKind::Option => self.aliases,
            SpecKind::Argument => Vec::new(),
        };
        Ok(ValueSpec {
            kind,
            name: self.name,
            description: self.description,
            required: self.required,
            value_type,
            default: self.default,
            aliases,
        })
    }
}

/// Declaration of one named value: a switch or a leading argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    kind: SpecKind,
    name: String,
    description: Option<String>,
    required: bool,
    value_type: ValueType,
    default: Option<Value>,
    aliases: Vec<String>,
}

impl ValueSpec {
    /// Declare an option from `names` and an untyped literal.
    ///
    /// `names` is a single name or `[name, alias, ...]`. The literal decides
    /// the type and default:
    /// - `required` symbol: required string
    /// - `optional`/`default` symbol: optional, any shape
    /// - a type-name symbol: that type, no default
    /// - any other symbol: optional, any shape
    /// - map/sequence/bool/number/string: hash/array/boolean/numeric/string,
    ///   defaulting to the literal
    pub fn parse(
        names: impl SpecNames,
        literal: impl Into<Literal>,
    ) -> Result<Self, ConstructionError> {
        let mut names = names.into_names();
        if names.is_empty() {
            return Err(ConstructionError::MissingName {
                kind: SpecKind::Option,
            });
        }
        let name = names.remove(0);

        let (value_type, required, default) = match literal.into() {
            Literal::Symbol(sym) => match sym.as_str() {
                "required" => (ValueType::String, true, None),
                "optional" | "default" => (ValueType::Default, false, None),
                other => (
                    other.parse::<ValueType>().unwrap_or(ValueType::Default),
                    false,
                    None,
                ),
            },
            Literal::Map(map) => (ValueType::Hash, false, Some(Value::Hash(map))),
            Literal::Sequence(items) => (ValueType::Array, false, Some(Value::Array(items))),
            Literal::Bool(b) => (ValueType::Boolean, false, Some(Value::Bool(b))),
            Literal::Int(n) => (ValueType::Numeric, false, Some(Value::Int(n))),
            Literal::Float(n) => (ValueType::Numeric, false, Some(Value::Float(n))),
            Literal::Str(s) => (ValueType::String, false, Some(Value::Str(s))),
        };

        SpecDef {
            kind: SpecKind::Option,
            name,
            required,
            value_type: value_type.as_str().to_string(),
            default,
            aliases: names,
            ..Default::default()
        }
        .build()
    }

    /// Declare a typed option with no default.
    pub fn option(
        name: &str,
        value_type: ValueType,
        required: bool,
    ) -> Result<Self, ConstructionError> {
        SpecDef {
            kind: SpecKind::Option,
            name: name.to_string(),
            required,
            value_type: value_type.as_str().to_string(),
            ..Default::default()
        }
        .build()
    }

    /// Declare a leading argument; it is required exactly when it has no default.
    pub fn argument(
        name: &str,
        value_type: ValueType,
        default: Option<Value>,
    ) -> Result<Self, ConstructionError> {
        SpecDef {
            kind: SpecKind::Argument,
            name: name.to_string(),
            required: default.is_none(),
            value_type: value_type.as_str().to_string(),
            default,
            ..Default::default()
        }
        .build()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(&self) -> SpecKind {
        self.kind
    }

    pub fn is_argument(&self) -> bool {
        self.kind == SpecKind::Argument
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_optional(&self) -> bool {
        !self.required
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn input_required(&self) -> bool {
        self.value_type.input_required()
    }

    /// `--foo-bar` for `foo_bar`, `-f` for `f`; already dashed names are kept.
    pub fn switch_name(&self) -> String {
        switch_form(&self.name)
    }

    /// The switch name without its leading dashes.
    pub fn human_name(&self) -> String {
        self.switch_name().trim_start_matches('-').to_string()
    }

    /// Every switch form this spec answers to, aliases first.
    pub fn switch_forms(&self) -> Vec<String> {
        let mut forms: Vec<String> = self.aliases.iter().map(|a| switch_form(a)).collect();
        forms.push(self.switch_name());
        forms
    }

    /// Priority order for display: arguments before options, then required
    /// before optional.
    pub fn cmp_priority(&self, other: &Self) -> Ordering {
        let rank = |s: &Self| (s.kind == SpecKind::Option, !s.required);
        rank(self).cmp(&rank(other))
    }

    /// One-line usage fragment, e.g. `[--foo=FOO]` or `-f, --foo=FOO`.
    pub fn usage(&self) -> String {
        let body = match self.kind {
            SpecKind::Argument => self.placeholder().unwrap_or_else(|| self.human_name()),
            SpecKind::Option => {
                let mut body = self.switch_forms().join(", ");
                if let Some(placeholder) = self.placeholder() {
                    body.push('=');
                    body.push_str(&placeholder);
                }
                body
            }
        };
        if self.required {
            body
        } else {
            format!("[{body}]")
        }
    }

    fn placeholder(&self) -> Option<String> {
        if let Some(default) = &self.default {
            return match self.value_type {
                ValueType::Boolean => None,
                _ => Some(default.to_string()),
            };
        }
        match self.value_type {
            ValueType::Boolean => None,
            ValueType::Numeric => Some("N".to_string()),
            ValueType::Array => Some("one two three".to_string()),
            ValueType::Hash => Some("key:value".to_string()),
            ValueType::String | ValueType::Default => {
                Some(self.human_name().replace('-', "_").to_ascii_uppercase())
            }
        }
    }
}

pub(crate) fn switch_form(raw: &str) -> String {
    let dashed = raw.trim().replace('_', "-");
    if dashed.starts_with('-') {
        dashed
    } else if dashed.chars().count() == 1 {
        format!("-{dashed}")
    } else {
        format!("--{dashed}")
    }
}

/// Stable sort into [`ValueSpec::cmp_priority`] order.
pub fn sort_specs(specs: &mut [ValueSpec]) {
    specs.sort_by(ValueSpec::cmp_priority);
}
