//! Schema descriptors: the declared field set of a configuration type.

use std::fmt;
use std::sync::Arc;

use crate::errors::ConfigError;
use crate::instance::ConfigInstance;
use crate::source::{ConfigSource, Overrides};
use crate::value::{EnumDescriptor, EnumValue, FieldValue};

/// Field holding the `/`-delimited node path used to locate the
/// configuration inside a document.
pub const YAML_TREE: &str = "yaml_tree";
/// Output folder for exported parts.
pub const STL_FOLDER: &str = "stl_folder";
pub const FILE_PREFIX: &str = "file_prefix";
pub const FILE_SUFFIX: &str = "file_suffix";
pub const CREATE_FOLDERS_IF_MISSING: &str = "create_folders_if_missing";

/// Node path used when a schema does not declare one.
pub const DEFAULT_TREE: &str = "Part";
/// Output folder value that disables export entirely.
pub const NO_EXPORT_FOLDER: &str = "NONE";

/// Builds a schema. Used for nested-schema field types.
pub type SchemaFn = fn() -> ConfigSchema;

/// Produces a fresh default value each time it is called.
pub type DefaultFactory = Arc<dyn Fn() -> Result<FieldValue, ConfigError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Str,
    Float,
    Int,
    Bool,
}

/// Declared type of a field. Drives coercion of loaded values.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    Primitive(PrimitiveKind),
    Enumeration(&'static EnumDescriptor),
    Nested(SchemaFn),
    Other,
}

impl FieldType {
    /// Whether two declared types accept the same values. Enumerations
    /// compare by name and members, nested schemas by schema name.
    pub fn same_as(&self, other: &FieldType) -> bool {
        match (self, other) {
            (FieldType::Primitive(a), FieldType::Primitive(b)) => a == b,
            (FieldType::Enumeration(a), FieldType::Enumeration(b)) => {
                a.name() == b.name() && a.members() == b.members()
            }
            (FieldType::Nested(a), FieldType::Nested(b)) => a().name() == b().name(),
            (FieldType::Other, FieldType::Other) => true,
            _ => false,
        }
    }
}

/// How a field obtains its value when nothing else supplies one.
#[derive(Clone)]
pub enum FieldDefault {
    Value(FieldValue),
    Factory(DefaultFactory),
    /// No default. Constructing an instance fails unless a document or
    /// override supplies the field.
    Missing,
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Value(v) => f.debug_tuple("Value").field(v).finish(),
            FieldDefault::Factory(_) => f.write_str("Factory(..)"),
            FieldDefault::Missing => f.write_str("Missing"),
        }
    }
}

/// One declared field of a schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    ty: FieldType,
    default: FieldDefault,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: FieldType, default: FieldDefault) -> Self {
        Self {
            name: name.into(),
            ty,
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.ty
    }

    pub fn default(&self) -> &FieldDefault {
        &self.default
    }

    /// Resolve the default: explicit value first, then the factory.
    ///
    /// Returns `Ok(None)` for a field declared without any default.
    pub fn resolve_default(&self) -> Result<Option<FieldValue>, ConfigError> {
        match &self.default {
            FieldDefault::Value(v) => Ok(Some(v.clone())),
            FieldDefault::Factory(f) => f().map(Some),
            FieldDefault::Missing => Ok(None),
        }
    }
}

/// The ordered field set of one configuration type.
///
/// Every schema starts from the base fields (`yaml_tree`, `stl_folder`,
/// `file_prefix`, `file_suffix`, `create_folders_if_missing`); descendant
/// schemas append their own fields and may redeclare base ones.
#[derive(Debug, Clone)]
pub struct ConfigSchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl ConfigSchema {
    /// Start a new schema on top of the base fields.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: base_fields(),
        }
    }

    /// Start a descendant schema that inherits every field of `self`.
    pub fn extend(&self, name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: self.fields.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Same name and the same fields, by name and declared type, in the
    /// same order.
    pub fn is_same(&self, other: &ConfigSchema) -> bool {
        self.name == other.name
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name == b.name && a.ty.same_as(&b.ty))
    }

    /// The node path declared as this schema's `yaml_tree` default.
    pub fn yaml_tree(&self) -> &str {
        match self.field(YAML_TREE).map(FieldSpec::default) {
            Some(FieldDefault::Value(FieldValue::Str(tree))) => tree,
            _ => "",
        }
    }
}

fn base_fields() -> Vec<FieldSpec> {
    let string = |name: &str, value: &str| {
        FieldSpec::new(
            name,
            FieldType::Primitive(PrimitiveKind::Str),
            FieldDefault::Value(FieldValue::Str(value.to_string())),
        )
    };
    vec![
        string(YAML_TREE, DEFAULT_TREE),
        string(STL_FOLDER, NO_EXPORT_FOLDER),
        string(FILE_PREFIX, ""),
        string(FILE_SUFFIX, ""),
        FieldSpec::new(
            CREATE_FOLDERS_IF_MISSING,
            FieldType::Primitive(PrimitiveKind::Bool),
            FieldDefault::Value(FieldValue::Bool(true)),
        ),
    ]
}

/// Fluent builder for [`ConfigSchema`].
///
/// Declaring a name that already exists replaces that field's type and
/// default while keeping its position.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: &str, ty: FieldType, default: FieldDefault) -> Self {
        let spec = FieldSpec::new(name, ty, default);
        match self.fields.iter().position(|f| f.name == name) {
            Some(i) => self.fields[i] = spec,
            None => self.fields.push(spec),
        }
        self
    }

    /// Set the default node path for this schema.
    pub fn yaml_tree(self, tree: &str) -> Self {
        self.string(YAML_TREE, tree)
    }

    pub fn string(self, name: &str, default: impl Into<String>) -> Self {
        self.field(
            name,
            FieldType::Primitive(PrimitiveKind::Str),
            FieldDefault::Value(FieldValue::Str(default.into())),
        )
    }

    pub fn float(self, name: &str, default: f64) -> Self {
        self.field(
            name,
            FieldType::Primitive(PrimitiveKind::Float),
            FieldDefault::Value(FieldValue::Float(default)),
        )
    }

    pub fn int(self, name: &str, default: i64) -> Self {
        self.field(
            name,
            FieldType::Primitive(PrimitiveKind::Int),
            FieldDefault::Value(FieldValue::Int(default)),
        )
    }

    pub fn boolean(self, name: &str, default: bool) -> Self {
        self.field(
            name,
            FieldType::Primitive(PrimitiveKind::Bool),
            FieldDefault::Value(FieldValue::Bool(default)),
        )
    }

    /// Enumeration field; the type is taken from the default member.
    pub fn enumeration(self, name: &str, default: EnumValue) -> Self {
        self.field(
            name,
            FieldType::Enumeration(default.descriptor()),
            FieldDefault::Value(FieldValue::Enum(default)),
        )
    }

    /// Nested configuration field defaulting to a fresh all-default
    /// instance of `schema`.
    pub fn nested(self, name: &str, schema: SchemaFn) -> Self {
        let factory: DefaultFactory =
            Arc::new(move || ConfigInstance::new(schema()).map(FieldValue::from));
        self.field(name, FieldType::Nested(schema), FieldDefault::Factory(factory))
    }

    pub fn factory<F>(self, name: &str, ty: FieldType, factory: F) -> Self
    where
        F: Fn() -> Result<FieldValue, ConfigError> + Send + Sync + 'static,
    {
        self.field(name, ty, FieldDefault::Factory(Arc::new(factory)))
    }

    /// Field with no default at all.
    pub fn required(self, name: &str, ty: FieldType) -> Self {
        self.field(name, ty, FieldDefault::Missing)
    }

    pub fn build(self) -> ConfigSchema {
        ConfigSchema {
            name: self.name,
            fields: self.fields,
        }
    }
}

/// Implemented by configuration types to describe their schema.
///
/// The provided methods give every implementor default construction and
/// loading without redeclaring them.
pub trait DescribeConfig {
    fn describe() -> ConfigSchema;

    /// An instance holding every field's default.
    fn defaults() -> Result<ConfigInstance, ConfigError> {
        ConfigInstance::new(Self::describe())
    }

    fn from_source(
        source: impl Into<ConfigSource>,
        overrides: Overrides,
    ) -> Result<ConfigInstance, ConfigError> {
        ConfigInstance::from_source(Self::describe(), source, overrides)
    }
}

/// A configuration carrying only the base fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseConfig;

impl DescribeConfig for BaseConfig {
    fn describe() -> ConfigSchema {
        ConfigSchema::builder("BaseConfig").build()
    }
}
