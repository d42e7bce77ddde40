//! Coercion of raw loaded values into a field's declared type.

use serde_yaml::Value;

use crate::errors::ConfigError;
use crate::instance::ConfigInstance;
use crate::schema::{FieldSpec, FieldType};
use crate::source::{ConfigSource, Overrides};
use crate::value::FieldValue;

/// Convert `raw` into the declared type of `field`.
///
/// - Enumerations accept a member of the same enumeration or a string whose
///   upper-cased form names a member.
/// - Nested schemas build a child instance from a mapping; any other value,
///   including a ready-made instance, passes through untouched.
/// - Everything else passes through without validation.
pub fn coerce(field: &FieldSpec, raw: FieldValue) -> Result<FieldValue, ConfigError> {
    match field.field_type() {
        FieldType::Enumeration(descriptor) => match raw {
            FieldValue::Enum(member) if member.is_member_of(descriptor) => Ok(FieldValue::Enum(member)),
            FieldValue::Str(ref name) => {
                descriptor
                    .parse(name)
                    .map(FieldValue::Enum)
                    .ok_or_else(|| ConfigError::UnknownEnumMember {
                        field: field.name().to_string(),
                        enumeration: descriptor.name().to_string(),
                        value: name.clone(),
                    })
            }
            other => Err(ConfigError::UnknownEnumMember {
                field: field.name().to_string(),
                enumeration: descriptor.name().to_string(),
                value: other.to_string(),
            }),
        },
        FieldType::Nested(schema) => match raw {
            FieldValue::Document(Value::Mapping(mapping)) => {
                let child = ConfigInstance::from_source(
                    schema(),
                    ConfigSource::None,
                    Overrides::from_mapping(&mapping),
                )?;
                Ok(FieldValue::from(child))
            }
            other => Ok(other),
        },
        FieldType::Primitive(_) | FieldType::Other => Ok(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConfigSchema, FieldDefault, PrimitiveKind};
    use crate::value::EnumDescriptor;

    static SIZE: EnumDescriptor = EnumDescriptor::new("Size", &["SMALL", "LARGE"]);
    static OTHER: EnumDescriptor = EnumDescriptor::new("Other", &["SMALL"]);

    fn size_field() -> FieldSpec {
        FieldSpec::new(
            "size",
            FieldType::Enumeration(&SIZE),
            FieldDefault::Value(FieldValue::Enum(SIZE.member("SMALL").unwrap())),
        )
    }

    fn hub_schema() -> ConfigSchema {
        ConfigSchema::builder("Hub").float("radius", 1.0).int("bolts", 4).build()
    }

    fn hub_field() -> FieldSpec {
        FieldSpec::new("hub", FieldType::Nested(hub_schema), FieldDefault::Missing)
    }

    #[test]
    fn enum_from_string() {
        let v = coerce(&size_field(), FieldValue::Str("large".into())).unwrap();
        assert_eq!(v.as_enum(), SIZE.member("LARGE"));
    }

    #[test]
    fn enum_unknown_member() {
        let err = coerce(&size_field(), FieldValue::Str("medium".into())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownEnumMember {
                field: "size".into(),
                enumeration: "Size".into(),
                value: "medium".into(),
            }
        );
    }

    #[test]
    fn enum_rejects_non_string() {
        let err = coerce(&size_field(), FieldValue::Int(1)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnumMember { value, .. } if value == "1"));
    }

    #[test]
    fn enum_member_of_other_enum_rejected() {
        let foreign = FieldValue::Enum(OTHER.member("SMALL").unwrap());
        assert!(coerce(&size_field(), foreign).is_err());
    }

    #[test]
    fn enum_member_passes_through() {
        let large = FieldValue::Enum(SIZE.member("LARGE").unwrap());
        assert_eq!(coerce(&size_field(), large.clone()).unwrap(), large);
    }

    #[test]
    fn nested_from_mapping_uses_child_defaults() {
        let mapping: serde_yaml::Mapping = serde_yaml::from_str("{radius: 2.5}").unwrap();
        let v = coerce(&hub_field(), FieldValue::from(mapping)).unwrap();
        let hub = v.as_config().unwrap();
        assert_eq!(hub.schema().name(), "Hub");
        assert_eq!(hub.f64("radius"), Some(2.5));
        assert_eq!(hub.int("bolts"), Some(4));
    }

    #[test]
    fn nested_passthrough_for_other_values() {
        assert_eq!(
            coerce(&hub_field(), FieldValue::Str("prebuilt".into())).unwrap(),
            FieldValue::Str("prebuilt".into())
        );
        let instance = ConfigInstance::new(hub_schema()).unwrap();
        let v = coerce(&hub_field(), FieldValue::from(instance.clone())).unwrap();
        assert_eq!(v.as_config(), Some(&instance));
    }

    #[test]
    fn primitive_passthrough() {
        let field = FieldSpec::new(
            "depth",
            FieldType::Primitive(PrimitiveKind::Float),
            FieldDefault::Value(FieldValue::Float(1.0)),
        );
        assert_eq!(
            coerce(&field, FieldValue::Str("deep".into())).unwrap(),
            FieldValue::Str("deep".into())
        );
    }
}
