use std::fmt;

use thiserror::Error;

use crate::spec::SpecKind;

/// A spec or spec set that cannot be declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("{kind} name can't be empty")]
    MissingName { kind: SpecKind },

    #[error("{kind} '{name}' cannot be required and have default values")]
    RequiredWithDefault { kind: SpecKind, name: String },

    #[error("argument '{name}' is optional and needs a default value")]
    OptionalArgumentWithoutDefault { name: String },

    #[error("type '{value_type}' is not valid for {kind}s")]
    UnknownType { kind: SpecKind, value_type: String },

    #[error("switch definition conflict: {switch} maps to both '{first}' and '{second}'")]
    SwitchConflict {
        switch: String,
        first: String,
        second: String,
    },
}

/// Why a switch's value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformation {
    /// Another switch sat where the value was expected.
    SwitchAsValue,
    NotNumeric,
    NotBoolean,
}

/// A token stream that does not satisfy the declared specs.
///
/// A failed parse yields no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Every required argument or switch left without a value, in declaration
    /// order. Arguments are reported by name, switches by switch form.
    #[error(
        "no value provided for required {} {}",
        noun(.names),
        QuotedList(.names)
    )]
    RequiredArgumentMissing { names: Vec<String> },

    #[error("{}", describe_malformed(.switch, .value, .problem))]
    MalformattedArgument {
        switch: String,
        value: String,
        problem: Malformation,
    },
}

impl ParseError {
    pub(crate) fn malformed(switch: &str, value: &str, problem: Malformation) -> Self {
        Self::MalformattedArgument {
            switch: switch.to_string(),
            value: value.to_string(),
            problem,
        }
    }

    /// Names reported by a `RequiredArgumentMissing` error.
    pub fn missing_names(&self) -> &[String] {
        match self {
            Self::RequiredArgumentMissing { names } => names,
            Self::MalformattedArgument { .. } => &[],
        }
    }
}

fn noun(names: &[String]) -> &'static str {
    if names.len() == 1 { "argument" } else { "arguments" }
}

fn describe_malformed(switch: &str, value: &str, problem: &Malformation) -> String {
    match problem {
        Malformation::SwitchAsValue => format!("cannot pass switch '{value}' as an argument"),
        Malformation::NotNumeric => format!("expected numeric value for '{switch}'; got {value:?}"),
        Malformation::NotBoolean => format!("expected boolean value for '{switch}'; got {value:?}"),
    }
}

struct QuotedList<'a>(&'a [String]);

impl fmt::Display for QuotedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{name}'")?;
        }
        Ok(())
    }
}
