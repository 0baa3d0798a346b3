use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fs;
use std::path::{Path, PathBuf};
use switchyard::{Literal, OrderedMap, SpecDef, SpecKind, SwitchParser, Value, ValueSpec, ValueType};

pub const DEFAULT_MANIFEST_NAME: &str = "switchyard.json";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    /// Leading positional arguments, in the order they are read.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentEntry {
    pub name: String,

    /// Defaults to `string`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Defaults to "no default given".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Json>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A switch declaration.
///
/// Either explicit (`type`, `required`, `default`) or a single `literal` from
/// which type and default are inferred. A JSON string starting with `:` is a
/// symbol (`":required"`, `":numeric"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Primary name followed by aliases.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<Json>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Json>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Manifest {
    pub fn build_parser(&self) -> Result<SwitchParser> {
        if let Some(version) = self.schema_version
            && version != SCHEMA_VERSION
        {
            bail!("unsupported schemaVersion {version} (expected {SCHEMA_VERSION})");
        }

        let mut specs = Vec::with_capacity(self.arguments.len() + self.options.len());
        for (i, entry) in self.arguments.iter().enumerate() {
            let spec = entry
                .to_spec()
                .with_context(|| format!("invalid argument #{}", i + 1))?;
            specs.push(spec);
        }
        for (i, entry) in self.options.iter().enumerate() {
            let spec = entry
                .to_spec()
                .with_context(|| format!("invalid option #{}", i + 1))?;
            specs.push(spec);
        }

        tracing::debug!(specs = specs.len(), "building switch parser");
        Ok(SwitchParser::from_specs(specs)?)
    }
}

impl ArgumentEntry {
    fn to_spec(&self) -> Result<ValueSpec> {
        let default = self.default.as_ref().map(json_value).transpose()?;
        let spec = SpecDef {
            kind: SpecKind::Argument,
            name: self.name.clone(),
            description: self.description.clone(),
            required: self.required.unwrap_or(default.is_none()),
            value_type: self
                .value_type
                .clone()
                .unwrap_or_else(|| ValueType::String.as_str().to_string()),
            default,
            aliases: Vec::new(),
        }
        .build()?;
        Ok(spec)
    }
}

impl OptionEntry {
    fn all_names(&self) -> Result<Vec<String>> {
        match &self.name {
            Some(_) if !self.names.is_empty() => bail!("use either `name` or `names`, not both"),
            Some(name) => Ok(vec![name.clone()]),
            None => Ok(self.names.clone()),
        }
    }

    fn to_spec(&self) -> Result<ValueSpec> {
        let names = self.all_names()?;

        let spec = match &self.literal {
            Some(literal) => {
                if self.value_type.is_some() || self.required.is_some() || self.default.is_some() {
                    bail!("`literal` cannot be combined with `type`, `required` or `default`");
                }
                ValueSpec::parse(names, json_literal(literal)?)?
            }
            None => {
                let mut names = names.into_iter();
                let name = names.next().unwrap_or_default();
                let default = self.default.as_ref().map(json_value).transpose()?;
                let value_type = match (&self.value_type, &default) {
                    (Some(t), _) => t.clone(),
                    (None, Some(d)) => inferred_type(d).as_str().to_string(),
                    (None, None) => ValueType::Default.as_str().to_string(),
                };
                SpecDef {
                    kind: SpecKind::Option,
                    name,
                    description: None,
                    required: self.required.unwrap_or(false),
                    value_type,
                    default,
                    aliases: names.collect(),
                }
                .build()?
            }
        };

        Ok(match &self.description {
            Some(description) => spec.with_description(description.clone()),
            None => spec,
        })
    }
}

fn inferred_type(value: &Value) -> ValueType {
    match value {
        Value::Bool(_) => ValueType::Boolean,
        Value::Int(_) | Value::Float(_) => ValueType::Numeric,
        Value::Str(_) => ValueType::String,
        Value::Array(_) => ValueType::Array,
        Value::Hash(_) => ValueType::Hash,
    }
}

pub fn json_value(json: &Json) -> Result<Value> {
    Ok(match json {
        Json::Null => bail!("null is not a valid value"),
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().context("number is out of range")?),
        },
        Json::String(s) => Value::Str(s.clone()),
        Json::Array(items) => Value::Array(items.iter().map(json_value).collect::<Result<_>>()?),
        Json::Object(_) => Value::Hash(json_object(json)?),
    })
}

/// Convert a JSON object to a value map, skipping `null` entries.
pub fn json_object(json: &Json) -> Result<OrderedMap<String, Value>> {
    let Json::Object(map) = json else {
        bail!("expected a JSON object");
    };
    map.iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| -> Result<(String, Value)> { Ok((k.clone(), json_value(v)?)) })
        .collect()
}

fn json_literal(json: &Json) -> Result<Literal> {
    Ok(match json {
        Json::String(s) => match s.strip_prefix(':') {
            Some(symbol) => Literal::symbol(symbol),
            None => Literal::Str(s.clone()),
        },
        other => match json_value(other)? {
            Value::Bool(b) => Literal::Bool(b),
            Value::Int(n) => Literal::Int(n),
            Value::Float(n) => Literal::Float(n),
            Value::Str(s) => Literal::Str(s),
            Value::Array(items) => Literal::Sequence(items),
            Value::Hash(map) => Literal::Map(map),
        },
    })
}

#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub path: PathBuf,
    pub manifest: Manifest,
}

pub fn load_manifest(manifest_path: Option<&Path>) -> Result<LoadedManifest> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;

    let path = match manifest_path {
        Some(p) => resolve_against(&cwd, p),
        None => cwd.join(DEFAULT_MANIFEST_NAME),
    };

    if !path.exists() {
        if manifest_path.is_some() {
            bail!("manifest not found: {}", path.display());
        }
        bail!(
            "no {DEFAULT_MANIFEST_NAME} in {} (run `switchyard init` or pass --manifest)",
            cwd.display()
        );
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse manifest JSON: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded manifest");
    Ok(LoadedManifest { path, manifest })
}

pub fn write_default_manifest(project_dir: &Path, overwrite: bool) -> Result<PathBuf> {
    let dest = project_dir.join(DEFAULT_MANIFEST_NAME);
    if dest.exists() && !overwrite {
        bail!("{} already exists (use --force to overwrite)", dest.display());
    }

    let bytes =
        serde_json::to_vec_pretty(&starter_manifest()).context("failed to serialize manifest")?;
    let mut out = String::from_utf8(bytes).context("manifest is not valid UTF-8")?;
    out.push('\n');

    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    if overwrite && dest.exists() {
        fs::remove_file(&dest).with_context(|| format!("failed to remove {}", dest.display()))?;
    }
    fs::rename(&tmp, &dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest)
}

fn starter_manifest() -> Manifest {
    Manifest {
        schema_version: Some(SCHEMA_VERSION),
        arguments: vec![ArgumentEntry {
            name: "interval".to_string(),
            value_type: Some(ValueType::Numeric.as_str().to_string()),
            description: Some("How many units to wait".to_string()),
            ..Default::default()
        }],
        options: vec![
            OptionEntry {
                name: Some("unit".to_string()),
                literal: Some(Json::from("days")),
                description: Some("Unit of the interval".to_string()),
                ..Default::default()
            },
            OptionEntry {
                name: Some("force".to_string()),
                value_type: Some(ValueType::Boolean.as_str().to_string()),
                description: Some("Skip confirmation".to_string()),
                ..Default::default()
            },
            OptionEntry {
                names: vec!["tags".to_string(), "-T".to_string()],
                literal: Some(Json::from(":array")),
                description: Some("Labels to attach".to_string()),
                ..Default::default()
            },
        ],
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_temp_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let pid = std::process::id();
        let dir = std::env::temp_dir().join(format!("switchyard-{prefix}-{pid}-{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn manifest(json: &str) -> Manifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn manifest_deserializes_camel_case() {
        let m = manifest(
            r#"{
  "schemaVersion": 1,
  "arguments": [
    { "name": "interval", "type": "numeric", "description": "How long" }
  ],
  "options": [
    { "names": ["verbose", "-V"], "type": "boolean" },
    { "name": "unit", "literal": "days" }
  ]
}"#,
        );
        assert_eq!(m.schema_version, Some(1));
        assert_eq!(m.arguments.len(), 1);
        assert_eq!(m.arguments[0].name, "interval");
        assert_eq!(m.arguments[0].value_type.as_deref(), Some("numeric"));
        assert_eq!(m.options[0].names, ["verbose", "-V"]);
        assert_eq!(m.options[1].literal, Some(Json::from("days")));
    }

    #[test]
    fn literal_entries_follow_declaration_inference() {
        let m = manifest(
            r#"{
  "options": [
    { "name": "foo", "literal": ":required" },
    { "name": "n", "literal": ":numeric" },
    { "name": "color", "literal": false },
    { "name": "attrs", "literal": {} },
    { "name": "unit", "literal": "days" }
  ]
}"#,
        );
        let parser = m.build_parser().unwrap();
        let foo = parser.lookup("--foo").unwrap();
        assert!(foo.is_required());
        assert_eq!(foo.value_type(), ValueType::String);
        assert_eq!(parser.lookup("-n").unwrap().value_type(), ValueType::Numeric);
        assert_eq!(parser.lookup("--color").unwrap().value_type(), ValueType::Boolean);
        assert_eq!(parser.lookup("--attrs").unwrap().value_type(), ValueType::Hash);
        assert_eq!(
            parser.lookup("--unit").unwrap().default_value(),
            Some(&Value::from("days"))
        );
    }

    #[test]
    fn explicit_entries_infer_type_from_default() {
        let m = manifest(
            r#"{
  "arguments": [
    { "name": "name" },
    { "name": "count", "type": "numeric", "default": 1 }
  ],
  "options": [
    { "name": "level", "default": 3, "description": "Verbosity" }
  ]
}"#,
        );
        let parser = m.build_parser().unwrap();
        let args = parser.arguments();
        assert_eq!(args[0].value_type(), ValueType::String);
        assert!(args[0].is_required());
        assert!(!args[1].is_required());
        assert_eq!(args[1].default_value(), Some(&Value::Int(1)));

        let level = parser.lookup("--level").unwrap();
        assert_eq!(level.value_type(), ValueType::Numeric);
        assert_eq!(level.description(), Some("Verbosity"));

        let result = parser.parse(&["app", "--level", "5"]).unwrap();
        assert_eq!(result.arguments, [Value::from("app"), Value::Int(1)]);
        assert_eq!(result.get("level"), Some(&Value::Int(5)));
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let err = manifest(r#"{ "schemaVersion": 2 }"#).build_parser().unwrap_err();
        assert!(err.to_string().contains("schemaVersion 2"), "{err}");

        let err = manifest(r#"{ "options": [{ "name": "x", "type": "unknown" }] }"#)
            .build_parser()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid option #1");
        assert_eq!(
            err.root_cause().to_string(),
            "type 'unknown' is not valid for options"
        );

        let err = manifest(r#"{ "options": [{ "name": "x", "required": true, "default": "y" }] }"#)
            .build_parser()
            .unwrap_err();
        assert!(format!("{err:#}").contains("cannot be required"), "{err:#}");

        let err = manifest(r#"{ "arguments": [{ "name": "first", "required": false }] }"#)
            .build_parser()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid argument #1");
        assert_eq!(
            err.root_cause().to_string(),
            "argument 'first' is optional and needs a default value"
        );

        let err = manifest(r#"{ "options": [{ "name": "x", "literal": true, "type": "string" }] }"#)
            .build_parser()
            .unwrap_err();
        assert!(format!("{err:#}").contains("`literal` cannot be combined"), "{err:#}");

        let err = manifest(r#"{ "options": [{ "names": ["a", "-x"] }, { "names": ["b", "-x"] }] }"#)
            .build_parser()
            .unwrap_err();
        assert!(err.to_string().contains("switch definition conflict"), "{err}");
    }

    #[test]
    fn json_object_keeps_order_and_skips_nulls() {
        let json: Json = serde_json::from_str(r#"{"foo": "bar", "gone": null, "n": 5, "color": true}"#)
            .unwrap();
        let values = json_object(&json).unwrap();
        assert_eq!(
            values.keys().map(String::as_str).collect::<Vec<_>>(),
            ["foo", "n", "color"]
        );
        assert_eq!(switchyard::to_switches(&values), "--foo \"bar\" -n 5 --color");

        assert!(json_object(&Json::from(3)).is_err());
    }

    #[test]
    fn write_default_manifest_refuses_to_overwrite() {
        let dir = make_temp_dir("manifest-defaults");
        let dest = write_default_manifest(&dir, false).unwrap();
        let contents = fs::read_to_string(&dest).unwrap();
        let m: Manifest = serde_json::from_str(&contents).unwrap();
        assert_eq!(m.schema_version, Some(SCHEMA_VERSION));
        assert_eq!(m.arguments[0].name, "interval");
        assert!(m.build_parser().is_ok());

        assert!(write_default_manifest(&dir, false).is_err());
        assert!(write_default_manifest(&dir, true).is_ok());

        let _ = fs::remove_dir_all(&dir);
    }
}
