//! Inputs to a load: where document values come from, and keyword overrides.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::instance::ConfigInstance;
use crate::value::FieldValue;

/// Where a load takes its document values from.
#[derive(Debug, Clone, Default)]
pub enum ConfigSource {
    /// No document; only defaults and overrides apply.
    #[default]
    None,
    /// Copy from an existing instance.
    Instance(ConfigInstance),
    /// YAML text, or a single-line string naming a file that holds it.
    Text(String),
    /// A file containing YAML text.
    Path(PathBuf),
    /// An already-parsed node. Node-path resolution is skipped.
    Document(Value),
}

impl From<&str> for ConfigSource {
    fn from(text: &str) -> Self {
        ConfigSource::Text(text.to_string())
    }
}

impl From<String> for ConfigSource {
    fn from(text: String) -> Self {
        ConfigSource::Text(text)
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        ConfigSource::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        ConfigSource::Path(path)
    }
}

impl From<ConfigInstance> for ConfigSource {
    fn from(instance: ConfigInstance) -> Self {
        ConfigSource::Instance(instance)
    }
}

impl From<&ConfigInstance> for ConfigSource {
    fn from(instance: &ConfigInstance) -> Self {
        ConfigSource::Instance(instance.clone())
    }
}

impl From<Value> for ConfigSource {
    fn from(document: Value) -> Self {
        ConfigSource::Document(document)
    }
}

impl From<Mapping> for ConfigSource {
    fn from(mapping: Mapping) -> Self {
        ConfigSource::Document(Value::Mapping(mapping))
    }
}

impl<T: Into<ConfigSource>> From<Option<T>> for ConfigSource {
    fn from(source: Option<T>) -> Self {
        source.map_or(ConfigSource::None, Into::into)
    }
}

/// Ordered keyword overrides applied after document values.
///
/// Keys that do not name a declared field are ignored by the loader, so
/// infrastructure keys such as `yaml_tree` can travel alongside real field
/// overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    entries: Vec<(String, FieldValue)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Overrides::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an override, keeping first-insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Overrides from a YAML mapping. Non-string keys are skipped.
    pub fn from_mapping(mapping: &Mapping) -> Self {
        mapping
            .iter()
            .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), FieldValue::from(v.clone()))))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Overrides::new();
        for (k, v) in iter {
            overrides.insert(k, v);
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_key() {
        let overrides = Overrides::new().with("radius", 1.0).with("depth", 2_i64).with("radius", 3.0);
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("radius"), Some(&FieldValue::Float(3.0)));
        let keys: Vec<_> = overrides.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["radius", "depth"]);
    }

    #[test]
    fn from_mapping_converts_values() {
        let mapping: Mapping = serde_yaml::from_str("{radius: 4, name: hub, 7: skipped}").unwrap();
        let overrides = Overrides::from_mapping(&mapping);
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("radius"), Some(&FieldValue::Int(4)));
        assert_eq!(overrides.get("name"), Some(&FieldValue::Str("hub".into())));
    }

    #[test]
    fn option_source_maps_none() {
        assert!(matches!(ConfigSource::from(None::<&str>), ConfigSource::None));
        assert!(matches!(ConfigSource::from(Some("a: 1")), ConfigSource::Text(_)));
    }
}
