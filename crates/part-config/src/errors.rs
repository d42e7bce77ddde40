use std::path::PathBuf;

/// Errors raised while building or loading a configuration instance.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration document: {0}")]
    DocumentParse(String),

    #[error("node {segment} not found in configuration (tree: {tree})")]
    MissingConfigNode { segment: String, tree: String },

    #[error("unknown member {value:?} of {enumeration} for field {field}")]
    UnknownEnumMember {
        field: String,
        enumeration: String,
        value: String,
    },

    #[error("field {field} of {schema} has no default value")]
    SchemaDefinition { schema: String, field: String },

    #[error("field {field} expects {expected}, got {value}")]
    InvalidValue {
        field: String,
        expected: String,
        value: String,
    },

    #[error("failed to read configuration file {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::DocumentParse(e.to_string())
    }
}
