//! Switch and argument parsing for command-line tools.
//!
//! Callers declare what a command accepts as [`ValueSpec`]s (options and
//! leading arguments), collect them in an [`OrderedMap`] so declaration order
//! is kept, and run a [`SwitchParser`] over the raw tokens once:
//!
//! ```
//! use switchyard::{Literal, OrderedMap, SwitchParser, Value, ValueSpec, ValueType};
//!
//! let mut specs = OrderedMap::new();
//! specs.set("interval".to_string(), ValueSpec::argument("interval", ValueType::Numeric, None)?);
//! specs.set("unit".to_string(), ValueSpec::parse("unit", "days")?);
//! specs.set("force".to_string(), ValueSpec::parse("force", Literal::of_type(ValueType::Boolean))?);
//!
//! let parser = SwitchParser::new(&specs)?;
//! let result = parser.parse(&["3.0", "--unit", "months", "-f", "extra"])?;
//!
//! assert_eq!(result.arguments, [Value::Float(3.0)]);
//! assert_eq!(result.get("unit"), Some(&Value::from("months")));
//! assert_eq!(result.get("force"), Some(&Value::Bool(true)));
//! assert_eq!(result.trailing, ["extra"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Unknown switches are not errors: they land in [`ParseResult::trailing`]
//! so they can be passed through to another command.

pub mod error;
pub mod ordered_map;
pub mod parser;
pub mod spec;
pub mod switches;
pub mod value;

pub use error::{ConstructionError, Malformation, ParseError};
pub use ordered_map::OrderedMap;
pub use parser::{ParseResult, SwitchParser};
pub use spec::{SpecDef, SpecKind, SpecNames, ValueSpec, sort_specs};
pub use switches::to_switches;
pub use value::{Literal, Value, ValueType};
