use crate::ordered_map::OrderedMap;
use crate::spec::switch_form;
use crate::value::Value;

/// Render a value map back into a switch string.
///
/// `true` becomes a bare switch and `false` is dropped; strings, including
/// those inside arrays, are quoted. Everything else uses its display form
/// (`--count 1 2 3`, `--env a:b`).
pub fn to_switches(values: &OrderedMap<String, Value>) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (name, value) in values {
        let switch = switch_form(name);
        match value {
            Value::Bool(true) => parts.push(switch),
            Value::Bool(false) => {}
            Value::Str(s) => parts.push(format!("{switch} {s:?}")),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(render_item).collect();
                parts.push(format!("{switch} {}", items.join(" ")));
            }
            other => parts.push(format!("{switch} {other}")),
        }
    }
    parts.join(" ")
}

fn render_item(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("{s:?}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(name: &str, value: Value) -> OrderedMap<String, Value> {
        [(name.to_string(), value)].into_iter().collect()
    }

    #[test]
    fn true_is_a_bare_flag_and_false_is_dropped() {
        assert_eq!(to_switches(&one("color", Value::Bool(true))), "--color");
        assert_eq!(to_switches(&one("color", Value::Bool(false))), "");
    }

    #[test]
    fn strings_are_quoted() {
        assert_eq!(
            to_switches(&one("format", Value::from("specdoc"))),
            "--format \"specdoc\""
        );
    }

    #[test]
    fn collections_use_their_display_form() {
        assert_eq!(to_switches(&one("count", Value::from(vec![1, 2, 3]))), "--count 1 2 3");

        assert_eq!(
            to_switches(&one("files", Value::from(vec!["a b", "c"]))),
            "--files \"a b\" \"c\""
        );

        let hash: OrderedMap<String, Value> = [("a".to_string(), Value::from("b"))].into_iter().collect();
        assert_eq!(to_switches(&one("count", Value::Hash(hash))), "--count a:b");
    }

    #[test]
    fn joins_entries_in_map_order() {
        let mut values = OrderedMap::new();
        values.set("color".to_string(), Value::Bool(true));
        values.set("foo".to_string(), Value::from("bar"));
        values.set("n".to_string(), Value::Int(5));
        assert_eq!(to_switches(&values), "--color --foo \"bar\" -n 5");
    }
}
