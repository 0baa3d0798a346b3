use serde::Serialize;

use crate::error::{ConstructionError, Malformation, ParseError};
use crate::ordered_map::OrderedMap;
use crate::spec::{ValueSpec, switch_form};
use crate::value::{Value, ValueType};

/// Outcome of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    /// Resolved option values keyed by human name (`foo` for `--foo`).
    pub values: OrderedMap<String, Value>,
    /// Leading argument values in declaration order.
    pub arguments: Vec<Value>,
    /// Tokens that were neither a recognized switch, a switch's value, nor a
    /// leading argument, in their original order.
    pub trailing: Vec<String>,
}

impl ParseResult {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Option(usize),
    Argument(usize),
}

/// Parses token lists against a fixed set of declared specs.
///
/// Every alias of an option resolves to the same spec. An option declared
/// with a single long name also answers to `-<first letter>` unless another
/// switch already claims it. Leading arguments may also be given as
/// `--<name> value` as long as they were not filled positionally.
#[derive(Debug, Clone)]
pub struct SwitchParser {
    arguments: Vec<ValueSpec>,
    options: Vec<ValueSpec>,
    switches: OrderedMap<String, Target>,
}

impl SwitchParser {
    /// Build a parser from a single declaration map holding arguments and
    /// options in declaration order.
    pub fn new(specs: &OrderedMap<String, ValueSpec>) -> Result<Self, ConstructionError> {
        Self::from_specs(specs.values().cloned())
    }

    /// Build a parser from separate argument and option declarations.
    pub fn with_arguments(
        arguments: &OrderedMap<String, ValueSpec>,
        options: &OrderedMap<String, ValueSpec>,
    ) -> Result<Self, ConstructionError> {
        Self::from_specs(arguments.values().chain(options.values()).cloned())
    }

    pub fn from_specs(
        specs: impl IntoIterator<Item = ValueSpec>,
    ) -> Result<Self, ConstructionError> {
        let (arguments, options): (Vec<ValueSpec>, Vec<ValueSpec>) =
            specs.into_iter().partition(ValueSpec::is_argument);

        let mut parser = Self {
            arguments,
            options,
            switches: OrderedMap::new(),
        };

        for idx in 0..parser.arguments.len() {
            let switch = parser.arguments[idx].switch_name();
            parser.register(switch, Target::Argument(idx))?;
        }
        for idx in 0..parser.options.len() {
            for switch in parser.options[idx].switch_forms() {
                parser.register(switch, Target::Option(idx))?;
            }
        }

        // Single-name long switches get their first letter as a short alias.
        for idx in 0..parser.options.len() {
            let spec = &parser.options[idx];
            if !spec.aliases().is_empty() || !spec.switch_name().starts_with("--") {
                continue;
            }
            let Some(first) = spec.human_name().chars().next() else {
                continue;
            };
            let short = format!("-{first}");
            if !parser.switches.contains_key(&short) {
                tracing::trace!(switch = %short, option = spec.name(), "auto short alias");
                parser.switches.set(short, Target::Option(idx));
            }
        }

        Ok(parser)
    }

    fn register(&mut self, switch: String, target: Target) -> Result<(), ConstructionError> {
        if let Some(&prev) = self.switches.get(&switch) {
            if prev != target {
                return Err(ConstructionError::SwitchConflict {
                    first: self.spec(prev).name().to_string(),
                    second: self.spec(target).name().to_string(),
                    switch,
                });
            }
            return Ok(());
        }
        self.switches.set(switch, target);
        Ok(())
    }

    fn spec(&self, target: Target) -> &ValueSpec {
        match target {
            Target::Option(idx) => &self.options[idx],
            Target::Argument(idx) => &self.arguments[idx],
        }
    }

    pub fn arguments(&self) -> &[ValueSpec] {
        &self.arguments
    }

    pub fn options(&self) -> &[ValueSpec] {
        &self.options
    }

    /// Find the spec a switch form (`--foo`, `-f`) resolves to.
    pub fn lookup(&self, switch: &str) -> Option<&ValueSpec> {
        self.switches.get(switch).map(|&t| self.spec(t))
    }

    /// Usage fragments of every spec, arguments first, required before
    /// optional.
    pub fn formatted_usage(&self) -> String {
        let mut specs: Vec<&ValueSpec> = self.arguments.iter().chain(&self.options).collect();
        specs.sort_by(|a, b| a.cmp_priority(b));
        specs
            .iter()
            .map(|s| s.usage())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse `tokens` (process arguments without the program name).
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseResult, ParseError> {
        let mut scan = Scan::new(self, tokens);
        let mut state = State::ReadingArguments;
        while state != State::Done {
            state = match state {
                State::ReadingArguments => scan.read_argument()?,
                State::ReadingSwitches => scan.read_switch()?,
                State::Done => State::Done,
            };
        }
        scan.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ReadingArguments,
    ReadingSwitches,
    Done,
}

enum ShortStep<'t> {
    Flag(usize),
    Input {
        option: usize,
        switch: String,
        inline: Option<&'t str>,
    },
}

fn is_switch(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

fn parse_bool(switch: &str, raw: &str) -> Result<Value, ParseError> {
    match raw {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err(ParseError::malformed(switch, raw, Malformation::NotBoolean)),
    }
}

struct Scan<'p, 't> {
    parser: &'p SwitchParser,
    tokens: Vec<&'t str>,
    pos: usize,
    values: OrderedMap<String, Value>,
    arguments: Vec<Option<Value>>,
    next_argument: usize,
    trailing: Vec<String>,
}

impl<'p, 't> Scan<'p, 't> {
    fn new<S: AsRef<str>>(parser: &'p SwitchParser, tokens: &'t [S]) -> Self {
        Self {
            parser,
            tokens: tokens.iter().map(|t| t.as_ref()).collect(),
            pos: 0,
            values: OrderedMap::new(),
            arguments: vec![None; parser.arguments.len()],
            next_argument: 0,
            trailing: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&'t str> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_value(&self) -> Option<&'t str> {
        self.peek().filter(|t| !is_switch(t))
    }

    fn push_trailing(&mut self, token: &str) {
        tracing::trace!(token, "routing token to trailing");
        self.trailing.push(token.to_string());
    }

    fn read_argument(&mut self) -> Result<State, ParseError> {
        let parser = self.parser;
        let Some(spec) = parser.arguments.get(self.next_argument) else {
            return Ok(State::ReadingSwitches);
        };
        let Some(token) = self.peek_value() else {
            tracing::debug!(
                filled = self.next_argument,
                declared = parser.arguments.len(),
                "leading arguments stopped at switch or end of input"
            );
            return Ok(State::ReadingSwitches);
        };
        self.pos += 1;
        let value = match spec.value_type() {
            ValueType::Boolean => parse_bool(spec.name(), token)?,
            _ => self.take_input(spec, spec.name(), token)?,
        };
        self.arguments[self.next_argument] = Some(value);
        self.next_argument += 1;
        Ok(State::ReadingArguments)
    }

    fn read_switch(&mut self) -> Result<State, ParseError> {
        let Some(token) = self.peek() else {
            return Ok(State::Done);
        };
        self.pos += 1;

        if token == "--" {
            let rest = &self.tokens[self.pos..];
            self.trailing.extend(rest.iter().map(|t| t.to_string()));
            self.pos = self.tokens.len();
            return Ok(State::Done);
        }
        if !is_switch(token) {
            self.push_trailing(token);
            return Ok(State::ReadingSwitches);
        }

        let (switch, inline) = match token.split_once('=') {
            Some((switch, value)) => (switch, Some(value)),
            None => (token, None),
        };

        if let Some(target) = self.lookup(switch) {
            self.resolve(target, switch, inline)?;
        } else if let Some(idx) = self.negated(switch, inline) {
            let name = self.parser.options[idx].human_name();
            self.values.set(name, Value::Bool(false));
        } else if let Some(steps) = self.conjoined(token, switch, inline) {
            self.apply_conjoined(steps)?;
        } else {
            self.push_trailing(token);
        }
        Ok(State::ReadingSwitches)
    }

    /// Arguments stop answering to their switch once filled.
    fn lookup(&self, switch: &str) -> Option<Target> {
        match self.parser.switches.get(switch).copied()? {
            Target::Argument(idx) if self.arguments[idx].is_some() => None,
            target => Some(target),
        }
    }

    fn negated(&self, switch: &str, inline: Option<&str>) -> Option<usize> {
        if inline.is_some() {
            return None;
        }
        let name = switch.strip_prefix("--no-")?;
        match self.lookup(&switch_form(name))? {
            Target::Option(idx) if self.parser.options[idx].value_type() == ValueType::Boolean => {
                Some(idx)
            }
            _ => None,
        }
    }

    /// Plan `-abc` as `-a -b -c`. The first character naming an option that
    /// needs input takes the rest of the token (or the next token) as value.
    /// An `=value` suffix belongs to that option, or to the last flag when
    /// every character is a flag.
    fn conjoined(
        &self,
        token: &'t str,
        switch: &str,
        inline: Option<&'t str>,
    ) -> Option<Vec<ShortStep<'t>>> {
        let body = switch.strip_prefix('-')?;
        if body.starts_with('-') || body.chars().count() < 2 {
            return None;
        }
        let mut steps = Vec::new();
        let mut last = None;
        for (offset, c) in body.char_indices() {
            let short = format!("-{c}");
            let Some(Target::Option(idx)) = self.lookup(&short) else {
                return None;
            };
            if self.parser.options[idx].input_required() {
                // `token` starts with `switch`, so this slices past `c`
                let rest = &token[1 + offset + c.len_utf8()..];
                let inline = match rest.strip_prefix('=') {
                    Some(value) => Some(value),
                    None => (!rest.is_empty()).then_some(rest),
                };
                steps.push(ShortStep::Input {
                    option: idx,
                    switch: short,
                    inline,
                });
                return Some(steps);
            }
            steps.push(ShortStep::Flag(idx));
            last = Some((idx, short));
        }
        if let (Some(value), Some((option, switch))) = (inline, last) {
            steps.pop();
            steps.push(ShortStep::Input {
                option,
                switch,
                inline: Some(value),
            });
        }
        Some(steps)
    }

    fn apply_conjoined(&mut self, steps: Vec<ShortStep<'t>>) -> Result<(), ParseError> {
        let parser = self.parser;
        for step in steps {
            match step {
                ShortStep::Flag(idx) => {
                    self.values
                        .set(parser.options[idx].human_name(), Value::Bool(true));
                }
                ShortStep::Input {
                    option,
                    switch,
                    inline,
                } => {
                    let spec = &parser.options[option];
                    let value = self.resolve_value(spec, &switch, inline)?;
                    self.values.set(spec.human_name(), value);
                }
            }
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        target: Target,
        switch: &str,
        inline: Option<&'t str>,
    ) -> Result<(), ParseError> {
        let parser = self.parser;
        let spec = parser.spec(target);
        let value = self.resolve_value(spec, switch, inline)?;
        match target {
            Target::Option(_) => {
                self.values.set(spec.human_name(), value);
            }
            Target::Argument(idx) => self.arguments[idx] = Some(value),
        }
        Ok(())
    }

    fn resolve_value(
        &mut self,
        spec: &ValueSpec,
        switch: &str,
        inline: Option<&'t str>,
    ) -> Result<Value, ParseError> {
        if let Some(raw) = inline {
            return match spec.value_type() {
                ValueType::Boolean => parse_bool(switch, raw),
                _ => self.take_input(spec, switch, raw),
            };
        }

        match spec.value_type() {
            ValueType::Boolean => Ok(Value::Bool(true)),
            ValueType::Default => match self.peek_value() {
                Some(raw) => {
                    self.pos += 1;
                    Ok(Value::Str(raw.to_string()))
                }
                None => Ok(Value::Bool(true)),
            },
            ValueType::Array | ValueType::Hash => match self.peek_value() {
                Some(raw) => {
                    self.pos += 1;
                    self.take_input(spec, switch, raw)
                }
                None if spec.value_type() == ValueType::Array => Ok(Value::Array(Vec::new())),
                None => Ok(Value::Hash(OrderedMap::new())),
            },
            ValueType::String | ValueType::Numeric => match self.peek() {
                None => Err(ParseError::RequiredArgumentMissing {
                    names: vec![switch.to_string()],
                }),
                Some(next) if is_switch(next) => Err(ParseError::malformed(
                    switch,
                    next,
                    Malformation::SwitchAsValue,
                )),
                Some(raw) => {
                    self.pos += 1;
                    self.take_input(spec, switch, raw)
                }
            },
        }
    }

    /// Coerce `first` per the spec's type; arrays and hashes keep consuming
    /// tokens until the next switch.
    fn take_input(
        &mut self,
        spec: &ValueSpec,
        switch: &str,
        first: &str,
    ) -> Result<Value, ParseError> {
        match spec.value_type() {
            ValueType::String | ValueType::Default => Ok(Value::Str(first.to_string())),
            ValueType::Boolean => Ok(Value::Bool(true)),
            ValueType::Numeric => Value::parse_numeric(first)
                .ok_or_else(|| ParseError::malformed(switch, first, Malformation::NotNumeric)),
            ValueType::Array => {
                let mut items = vec![Value::Str(first.to_string())];
                while let Some(raw) = self.peek_value() {
                    self.pos += 1;
                    items.push(Value::Str(raw.to_string()));
                }
                Ok(Value::Array(items))
            }
            ValueType::Hash => {
                let mut map = OrderedMap::new();
                Value::collect_pairs(first, &mut map);
                while let Some(raw) = self.peek_value() {
                    self.pos += 1;
                    Value::collect_pairs(raw, &mut map);
                }
                Ok(Value::Hash(map))
            }
        }
    }

    fn finish(self) -> Result<ParseResult, ParseError> {
        let parser = self.parser;

        let missing: Vec<String> = parser
            .arguments
            .iter()
            .zip(&self.arguments)
            .filter(|(spec, slot)| spec.is_required() && slot.is_none())
            .map(|(spec, _)| spec.human_name())
            .collect();
        if !missing.is_empty() {
            return Err(ParseError::RequiredArgumentMissing { names: missing });
        }

        let missing: Vec<String> = parser
            .options
            .iter()
            .filter(|spec| spec.is_required() && !self.values.contains_key(&spec.human_name()))
            .map(ValueSpec::switch_name)
            .collect();
        if !missing.is_empty() {
            return Err(ParseError::RequiredArgumentMissing { names: missing });
        }

        let mut values = self.values;
        for spec in &parser.options {
            let name = spec.human_name();
            if values.contains_key(&name) {
                continue;
            }
            if let Some(default) = spec.default_value() {
                values.set(name, default.clone());
            }
        }

        // Optional arguments always carry a default, so every slot is filled.
        let arguments: Vec<Value> = parser
            .arguments
            .iter()
            .zip(self.arguments)
            .filter_map(|(spec, slot)| slot.or_else(|| spec.default_value().cloned()))
            .collect();

        tracing::debug!(
            values = values.len(),
            arguments = arguments.len(),
            trailing = self.trailing.len(),
            "parse finished"
        );

        Ok(ParseResult {
            values,
            arguments,
            trailing: self.trailing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Literal;

    fn parser(decls: Vec<ValueSpec>) -> SwitchParser {
        SwitchParser::from_specs(decls).unwrap()
    }

    fn opt(names: &[&str], literal: impl Into<Literal>) -> ValueSpec {
        ValueSpec::parse(names, literal).unwrap()
    }

    fn str_value(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn empty_declarations_and_input() {
        let result = parser(vec![]).parse::<&str>(&[]).unwrap();
        assert!(result.values.is_empty());
        assert!(result.arguments.is_empty());
        assert!(result.trailing.is_empty());
    }

    #[test]
    fn optional_switches_without_input_stay_unset() {
        let p = parser(vec![
            opt(&["--foo"], ValueType::Boolean),
            opt(&["--bar"], Literal::optional()),
        ]);
        assert!(p.parse::<&str>(&[]).unwrap().values.is_empty());
    }

    #[test]
    fn auto_short_alias_only_for_single_name() {
        let p = parser(vec![opt(&["--foo"], true)]);
        assert_eq!(p.parse(&["-f"]).unwrap().get("foo"), Some(&Value::Bool(true)));

        let p = parser(vec![opt(&["--foo", "--bar"], ValueType::Boolean)]);
        let result = p.parse(&["-f"]).unwrap();
        assert_eq!(result.get("foo"), None);
        assert_eq!(result.trailing, ["-f"]);
    }

    #[test]
    fn auto_short_alias_does_not_steal_declared_shorts() {
        let p = parser(vec![opt(&["--force"], true), opt(&["f"], Literal::optional())]);
        let result = p.parse(&["-f", "12"]).unwrap();
        assert_eq!(result.get("f"), Some(&str_value("12")));
        assert_eq!(result.get("force"), Some(&Value::Bool(true)));
    }

    #[test]
    fn every_alias_resolves_to_the_primary_name() {
        let p = parser(vec![opt(&["--foo", "--bar", "--baz"], Literal::optional())]);
        for switch in ["--foo", "--bar", "--baz"] {
            assert_eq!(p.parse(&[switch, "12"]).unwrap().get("foo"), Some(&str_value("12")));
        }

        let p = parser(vec![opt(&["--bar", "-f"], Literal::optional())]);
        let result = p.parse(&["-f", "12"]).unwrap();
        assert_eq!(result.values.keys().map(String::as_str).collect::<Vec<_>>(), ["bar"]);
    }

    #[test]
    fn short_declared_name_has_no_long_form() {
        let p = parser(vec![opt(&["f"], Literal::optional())]);
        assert_eq!(p.parse(&["-f", "1"]).unwrap().get("f"), Some(&str_value("1")));

        let result = p.parse(&["--f", "1"]).unwrap();
        assert!(result.values.is_empty());
        assert_eq!(result.trailing, ["--f", "1"]);
    }

    #[test]
    fn conflicting_switches_are_rejected() {
        let err = SwitchParser::from_specs(vec![
            opt(&["--foo", "-x"], true),
            opt(&["--bar", "-x"], true),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConstructionError::SwitchConflict {
                switch: "-x".to_string(),
                first: "--foo".to_string(),
                second: "--bar".to_string(),
            }
        );
    }

    #[test]
    fn equals_assignment_splits_once() {
        let p = parser(vec![opt(&["--foo"], Literal::required())]);
        assert_eq!(p.parse(&["-f=12"]).unwrap().get("foo"), Some(&str_value("12")));
        assert_eq!(p.parse(&["--foo=12"]).unwrap().get("foo"), Some(&str_value("12")));
        assert_eq!(
            p.parse(&["--foo=bar=baz"]).unwrap().get("foo"),
            Some(&str_value("bar=baz"))
        );
    }

    #[test]
    fn inline_boolean_values() {
        let p = parser(vec![opt(&["--force"], false)]);
        assert_eq!(p.parse(&["--force=false"]).unwrap().get("force"), Some(&Value::Bool(false)));
        assert_eq!(p.parse(&["--force=true"]).unwrap().get("force"), Some(&Value::Bool(true)));
        let err = p.parse(&["--force=maybe"]).unwrap_err();
        assert_eq!(err, ParseError::malformed("--force", "maybe", Malformation::NotBoolean));
    }

    #[test]
    fn conjoined_short_switch_takes_inline_remainder() {
        let p = parser(vec![opt(&["n"], ValueType::Numeric), opt(&["v"], true)]);
        let result = p.parse(&["-vn12"]).unwrap();
        assert_eq!(result.get("v"), Some(&Value::Bool(true)));
        assert_eq!(result.get("n"), Some(&Value::Int(12)));
    }

    #[test]
    fn conjoined_equals_value_goes_to_the_value_taking_switch() {
        let p = parser(vec![
            opt(&["n"], ValueType::Numeric),
            opt(&["s"], ValueType::String),
            opt(&["v"], true),
        ]);
        let result = p.parse(&["-vn=12"]).unwrap();
        assert_eq!(result.get("v"), Some(&Value::Bool(true)));
        assert_eq!(result.get("n"), Some(&Value::Int(12)));

        let result = p.parse(&["-vs=x"]).unwrap();
        assert_eq!(result.get("s"), Some(&str_value("x")));

        let result = p.parse(&["-vs=a=b"]).unwrap();
        assert_eq!(result.get("s"), Some(&str_value("a=b")));
        assert!(result.trailing.is_empty());
    }

    #[test]
    fn conjoined_flags_pass_equals_value_to_the_last_flag() {
        let p = parser(vec![opt(&["f"], false), opt(&["v"], true)]);
        let result = p.parse(&["-fv=false"]).unwrap();
        assert_eq!(result.get("f"), Some(&Value::Bool(true)));
        assert_eq!(result.get("v"), Some(&Value::Bool(false)));

        let err = p.parse(&["-fv=maybe"]).unwrap_err();
        assert_eq!(err, ParseError::malformed("-v", "maybe", Malformation::NotBoolean));
    }

    #[test]
    fn conjoined_with_unknown_char_goes_to_trailing_whole() {
        let p = parser(vec![opt(&["a"], true), opt(&["b"], true)]);
        let result = p.parse(&["-abz"]).unwrap();
        assert!(result.values.is_empty());
        assert_eq!(result.trailing, ["-abz"]);
    }

    #[test]
    fn negation_only_applies_to_booleans() {
        let p = parser(vec![opt(&["--foo"], false), opt(&["--name"], ValueType::String)]);
        assert_eq!(p.parse(&["--no-foo"]).unwrap().get("foo"), Some(&Value::Bool(false)));

        let result = p.parse(&["--no-name"]).unwrap();
        assert_eq!(result.get("name"), None);
        assert_eq!(result.trailing, ["--no-name"]);
    }

    #[test]
    fn double_dash_ends_switch_scanning() {
        let p = parser(vec![opt(&["--foo"], true)]);
        let result = p.parse(&["--foo", "--", "--foo", "x"]).unwrap();
        assert_eq!(result.get("foo"), Some(&Value::Bool(true)));
        assert_eq!(result.trailing, ["--foo", "x"]);
    }

    #[test]
    fn lone_dash_is_a_value() {
        let p = parser(vec![opt(&["--input"], ValueType::String)]);
        assert_eq!(p.parse(&["--input", "-"]).unwrap().get("input"), Some(&str_value("-")));
    }

    #[test]
    fn empty_collections_when_no_values_follow() {
        let p = parser(vec![opt(&["--attrs"], ValueType::Array), opt(&["--map"], ValueType::Hash)]);
        let result = p.parse(&["--attrs", "--map"]).unwrap();
        assert_eq!(result.get("attrs"), Some(&Value::Array(Vec::new())));
        assert_eq!(result.get("map"), Some(&Value::Hash(OrderedMap::new())));
    }

    #[test]
    fn argument_switch_ignored_once_filled() {
        let p = parser(vec![
            ValueSpec::argument("interval", ValueType::Numeric, None).unwrap(),
        ]);
        let result = p.parse(&["1.0", "--interval", "3.0"]).unwrap();
        assert_eq!(result.arguments, [Value::Float(1.0)]);
        assert_eq!(result.trailing, ["--interval", "3.0"]);
    }

    #[test]
    fn optional_argument_takes_its_default() {
        let p = parser(vec![
            ValueSpec::argument("name", ValueType::String, None).unwrap(),
            ValueSpec::argument("count", ValueType::Numeric, Some(Value::Int(1))).unwrap(),
        ]);
        let result = p.parse(&["app"]).unwrap();
        assert_eq!(result.arguments, [str_value("app"), Value::Int(1)]);
    }

    #[test]
    fn arguments_keep_declaration_positions() {
        let p = parser(vec![
            ValueSpec::argument("first", ValueType::String, Some(str_value("a"))).unwrap(),
            ValueSpec::argument("second", ValueType::String, None).unwrap(),
        ]);
        let result = p.parse(&["--second", "x"]).unwrap();
        assert_eq!(result.arguments, [str_value("a"), str_value("x")]);
    }

    #[test]
    fn required_arguments_reported_before_switches() {
        let p = parser(vec![
            ValueSpec::argument("interval", ValueType::Numeric, None).unwrap(),
            opt(&["--foo"], Literal::required()),
        ]);
        let err = p.parse::<&str>(&[]).unwrap_err();
        assert_eq!(err.missing_names(), ["interval"]);
    }

    #[test]
    fn formatted_usage_orders_by_priority() {
        let p = parser(vec![
            opt(&["--unit"], "days"),
            opt(&["--force"], Literal::required()),
            ValueSpec::argument("interval", ValueType::Numeric, None).unwrap(),
        ]);
        assert_eq!(p.formatted_usage(), "N --force=FORCE [--unit=days]");
    }

    #[test]
    fn lookup_resolves_aliases() {
        let p = parser(vec![opt(&["--verbose", "-V"], true)]);
        assert_eq!(p.lookup("-V").map(ValueSpec::name), Some("--verbose"));
        assert_eq!(p.lookup("--verbose").map(ValueSpec::name), Some("--verbose"));
        assert!(p.lookup("-v").is_none());
    }
}
