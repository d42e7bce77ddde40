//! Configuration instances and the loader that populates them.

use std::borrow::Cow;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use tracing::{debug, instrument, warn};

use crate::coerce::coerce;
use crate::errors::ConfigError;
use crate::schema::{
    ConfigSchema, FieldSpec, CREATE_FOLDERS_IF_MISSING, FILE_PREFIX, FILE_SUFFIX,
    NO_EXPORT_FOLDER, STL_FOLDER, YAML_TREE,
};
use crate::source::{ConfigSource, Overrides};
use crate::tree::{parse_document, read_document, read_if_path, resolve_node};
use crate::value::{EnumValue, FieldValue};

/// A populated configuration: one value per field of its schema.
///
/// Instances are built through [`ConfigInstance::new`] or
/// [`ConfigInstance::from_source`] and may be reloaded in place with
/// [`ConfigInstance::load`]. Loading needs `&mut self`; an instance is never
/// loaded from two places at once.
#[derive(Debug, Clone)]
pub struct ConfigInstance {
    schema: Arc<ConfigSchema>,
    values: Vec<FieldValue>,
}

impl PartialEq for ConfigInstance {
    fn eq(&self, other: &Self) -> bool {
        self.schema.is_same(&other.schema) && self.values == other.values
    }
}

impl ConfigInstance {
    /// An instance holding every field's default.
    pub fn new(schema: ConfigSchema) -> Result<Self, ConfigError> {
        Self::from_source(schema, ConfigSource::None, Overrides::new())
    }

    /// Resolve defaults, then load `source` and `overrides` on top.
    ///
    /// Fails with [`ConfigError::SchemaDefinition`] if a field without a
    /// default is left unset by both the source and the overrides.
    #[instrument(skip_all, fields(schema = schema.name()))]
    pub fn from_source(
        schema: ConfigSchema,
        source: impl Into<ConfigSource>,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let mut draft = Draft::with_defaults(Arc::new(schema))?;
        draft.load(source.into(), &overrides)?;
        draft.finish()
    }

    /// Load `source` and `overrides` into this instance.
    ///
    /// - an instance of the same schema is copied field by field and the
    ///   overrides are ignored;
    /// - text is read from a file if it is a single line naming one, parsed
    ///   as YAML and descended along `yaml_tree`;
    /// - a pre-parsed document is used as the node directly.
    ///
    /// Fields the node does not mention keep their current value. Overrides
    /// apply last; keys naming no field are ignored. On error the instance is
    /// left unchanged.
    #[instrument(skip_all, fields(schema = self.schema.name()))]
    pub fn load(
        &mut self,
        source: impl Into<ConfigSource>,
        overrides: Overrides,
    ) -> Result<(), ConfigError> {
        let mut draft = Draft {
            schema: Arc::clone(&self.schema),
            values: self.values.iter().cloned().map(Some).collect(),
        };
        draft.load(source.into(), &overrides)?;
        *self = draft.finish()?;
        Ok(())
    }

    pub fn schema(&self) -> &ConfigSchema {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.schema.index_of(name).map(|i| &self.values[i])
    }

    /// Reassign one field, coercing `value` to its declared type.
    ///
    /// Returns `Ok(false)` without changing anything when no field is named
    /// `name`.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<bool, ConfigError> {
        let Some(i) = self.schema.index_of(name) else {
            return Ok(false);
        };
        self.values[i] = coerce(&self.schema.fields()[i], value.into())?;
        Ok(true)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.schema
            .fields()
            .iter()
            .map(FieldSpec::name)
            .zip(self.values.iter())
    }

    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_i64)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    pub fn enum_value(&self, name: &str) -> Option<EnumValue> {
        self.get(name).and_then(FieldValue::as_enum)
    }

    pub fn nested(&self, name: &str) -> Option<&ConfigInstance> {
        self.get(name).and_then(FieldValue::as_config)
    }

    // ── Base fields ─────────────────────────────────────────────────────

    pub fn yaml_tree(&self) -> &str {
        self.str(YAML_TREE).unwrap_or_else(|| self.schema.yaml_tree())
    }

    /// A field rendered as text: strings as-is, other values through
    /// their `Display` form.
    pub fn text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|value| match value {
            FieldValue::Str(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        })
    }

    /// Output folder. A scalar such as `2024` is read as the folder `"2024"`.
    pub fn stl_folder(&self) -> Cow<'_, str> {
        self.text(STL_FOLDER).unwrap_or(Cow::Borrowed(NO_EXPORT_FOLDER))
    }

    pub fn file_prefix(&self) -> Cow<'_, str> {
        self.text(FILE_PREFIX).unwrap_or_default()
    }

    pub fn file_suffix(&self) -> Cow<'_, str> {
        self.text(FILE_SUFFIX).unwrap_or_default()
    }

    /// Accepts a boolean or one of the YAML 1.1 boolean words
    /// (`yes`/`no`, `on`/`off`, `y`/`n`, `true`/`false`, any case).
    pub fn create_folders_if_missing(&self) -> Result<bool, ConfigError> {
        let invalid = |value: String| ConfigError::InvalidValue {
            field: CREATE_FOLDERS_IF_MISSING.to_string(),
            expected: "a boolean".to_string(),
            value,
        };
        match self.get(CREATE_FOLDERS_IF_MISSING) {
            Some(FieldValue::Bool(b)) => Ok(*b),
            Some(FieldValue::Str(s)) => match s.to_ascii_lowercase().as_str() {
                "y" | "yes" | "on" | "true" => Ok(true),
                "n" | "no" | "off" | "false" => Ok(false),
                _ => Err(invalid(format!("{s:?}"))),
            },
            Some(other) => Err(invalid(other.to_string())),
            None => Ok(true),
        }
    }

    /// Whether the output folder is the `"NONE"` sentinel.
    pub fn export_disabled(&self) -> bool {
        matches!(self.get(STL_FOLDER), Some(FieldValue::Str(s)) if s == NO_EXPORT_FOLDER)
    }

    // ── Serialization ───────────────────────────────────────────────────

    /// The instance as a YAML mapping, nested configurations included.
    pub fn to_document(&self) -> Value {
        let mut mapping = Mapping::new();
        for (name, value) in self.iter() {
            mapping.insert(Value::String(name.to_string()), Value::from(value));
        }
        Value::Mapping(mapping)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Serialize for ConfigInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Values being assembled by one load. `None` marks a field with no value yet.
struct Draft {
    schema: Arc<ConfigSchema>,
    values: Vec<Option<FieldValue>>,
}

impl Draft {
    fn with_defaults(schema: Arc<ConfigSchema>) -> Result<Self, ConfigError> {
        let values = schema
            .fields()
            .iter()
            .map(FieldSpec::resolve_default)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { schema, values })
    }

    fn load(&mut self, source: ConfigSource, overrides: &Overrides) -> Result<(), ConfigError> {
        if let Some(tree) = overrides.get(YAML_TREE) {
            self.assign(YAML_TREE, tree.clone())?;
        }

        match source {
            ConfigSource::None => {}
            ConfigSource::Instance(other) if other.schema.is_same(&self.schema) => {
                debug!("copying fields from existing instance");
                self.values = other.values.into_iter().map(Some).collect();
                return Ok(());
            }
            ConfigSource::Instance(other) => {
                debug!(from = other.schema.name(), "loading fields from foreign instance");
                self.apply_node(&other.to_document())?;
            }
            ConfigSource::Text(text) => {
                let text = read_if_path(text)?;
                self.apply_text(&text)?;
            }
            ConfigSource::Path(path) => {
                let text = read_document(&path)?;
                self.apply_text(&text)?;
            }
            ConfigSource::Document(document) => self.apply_node(&document)?,
        }

        for (key, value) in overrides.iter() {
            if !self.assign(key, value.clone())? {
                debug!(key, "ignoring override for undeclared field");
            }
        }
        Ok(())
    }

    fn apply_text(&mut self, text: &str) -> Result<(), ConfigError> {
        let document = parse_document(text)?;
        let tree = self.yaml_tree();
        let node = resolve_node(&document, &tree)?;
        self.apply_node(node)
    }

    fn apply_node(&mut self, node: &Value) -> Result<(), ConfigError> {
        let Some(mapping) = node.as_mapping() else {
            warn!(schema = self.schema.name(), "configuration node is not a mapping");
            return Ok(());
        };
        let schema = Arc::clone(&self.schema);
        for (slot, field) in self.values.iter_mut().zip(schema.fields()) {
            if let Some(raw) = mapping.get(field.name()) {
                debug!(field = field.name(), "assigning field from document");
                *slot = Some(coerce(field, FieldValue::from(raw.clone()))?);
            }
        }
        Ok(())
    }

    /// Coerce and store `raw` under `name`. `Ok(false)` if no such field.
    fn assign(&mut self, name: &str, raw: FieldValue) -> Result<bool, ConfigError> {
        let Some(i) = self.schema.index_of(name) else {
            return Ok(false);
        };
        self.values[i] = Some(coerce(&self.schema.fields()[i], raw)?);
        Ok(true)
    }

    fn yaml_tree(&self) -> String {
        self.schema
            .index_of(YAML_TREE)
            .and_then(|i| self.values[i].as_ref())
            .and_then(FieldValue::as_str)
            .unwrap_or_else(|| self.schema.yaml_tree())
            .to_string()
    }

    fn finish(self) -> Result<ConfigInstance, ConfigError> {
        let values = self
            .values
            .into_iter()
            .zip(self.schema.fields())
            .map(|(value, field)| {
                value.ok_or_else(|| ConfigError::SchemaDefinition {
                    schema: self.schema.name().to_string(),
                    field: field.name().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ConfigInstance {
            schema: self.schema,
            values,
        })
    }
}
