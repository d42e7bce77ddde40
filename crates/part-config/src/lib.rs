//! Hierarchical configuration for automated part generation.
//!
//! A configuration type is described by a [`ConfigSchema`]: an ordered list of
//! typed fields with defaults, built on top of a fixed set of base fields that
//! control export (`stl_folder`, `file_prefix`, `file_suffix`,
//! `create_folders_if_missing`) and document lookup (`yaml_tree`).
//!
//! # Key Components
//!
//! - [`ConfigInstance`]: populated configuration and its loader
//! - [`ConfigSchema`] / [`SchemaBuilder`]: field descriptors and defaults
//! - [`ConfigSource`] / [`Overrides`]: load inputs
//! - [`coerce`]: conversion of raw document values into declared types
//! - [`tree`]: YAML parsing and `/`-delimited node-path resolution

pub mod coerce;
pub mod errors;
pub mod instance;
pub mod schema;
pub mod source;
pub mod tree;
pub mod value;

pub use errors::ConfigError;
pub use instance::ConfigInstance;
pub use schema::{
    BaseConfig, ConfigSchema, DescribeConfig, FieldDefault, FieldSpec, FieldType, PrimitiveKind,
    SchemaBuilder, SchemaFn,
};
pub use source::{ConfigSource, Overrides};
pub use value::{EnumDescriptor, EnumValue, FieldValue};
