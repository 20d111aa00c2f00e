//! Metadata normalizer
//!
//! Turns raw configuration overrides into validated [`MetadataOverride`]s and
//! merges them over catalogue defaults. The merge is a pure function: the
//! defaults are never mutated and the result is always fully populated.

use crate::error::{ConfigError, Result};
use omnik_sens_types::{
    FieldKind, FieldMetadata, MetadataOverride, NumericMetadata, TextMetadata, NUMERIC_ATTRIBUTES,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Attribute name used when the override itself is malformed
const OVERRIDE_ROOT: &str = "<override>";

/// Parse a raw override object for a field of the given kind
///
/// `null` is treated as an empty override. Unknown attributes, wrongly typed
/// values and numeric-only attributes on text fields are rejected.
pub fn parse_override(key: &str, kind: FieldKind, value: &Value) -> Result<MetadataOverride> {
    let map = match value {
        Value::Null => return Ok(MetadataOverride::default()),
        Value::Object(map) => map,
        _ => {
            return Err(ConfigError::invalid_override(
                key,
                OVERRIDE_ROOT,
                "expected an object of attributes",
            ))
        }
    };

    let mut overrides = MetadataOverride::default();
    for (attribute, value) in map {
        let canonical = match attribute.as_str() {
            "unit" => "unit_of_measurement",
            other => other,
        };
        if attribute != canonical && map.contains_key(canonical) {
            return Err(ConfigError::invalid_override(
                key,
                attribute,
                format!("duplicate of {}", canonical),
            ));
        }
        if kind == FieldKind::Text && NUMERIC_ATTRIBUTES.contains(&canonical) {
            return Err(ConfigError::invalid_override(
                key,
                attribute,
                "not valid for a text field",
            ));
        }

        match canonical {
            "name" => overrides.name = Some(string_value(key, attribute, value)?),
            "entity_category" => overrides.entity_category = Some(decode(key, attribute, value)?),
            "internal" => {
                let internal = value.as_bool().ok_or_else(|| {
                    ConfigError::invalid_override(key, attribute, "expected a boolean")
                })?;
                overrides.internal = Some(internal);
            }
            "unit_of_measurement" => overrides.unit = Some(string_value(key, attribute, value)?),
            "device_class" => overrides.device_class = Some(decode(key, attribute, value)?),
            "state_class" => overrides.state_class = Some(decode(key, attribute, value)?),
            "accuracy_decimals" => {
                overrides.accuracy_decimals = Some(accuracy_decimals(key, attribute, value)?)
            }
            _ => {
                return Err(ConfigError::invalid_override(
                    key,
                    attribute,
                    "unknown attribute",
                ))
            }
        }
    }

    Ok(overrides)
}

/// Merge an optional override over the catalogue defaults of a field
///
/// Present attributes replace the default, absent ones keep it. Strings are
/// taken verbatim, so an empty name stays empty.
pub fn normalize(
    key: &str,
    defaults: &FieldMetadata,
    overrides: Option<&MetadataOverride>,
) -> Result<FieldMetadata> {
    let Some(overrides) = overrides else {
        return Ok(defaults.clone());
    };

    match defaults {
        FieldMetadata::Text(defaults) => {
            if let Some(attribute) = overrides.numeric_attributes().first() {
                return Err(ConfigError::invalid_override(
                    key,
                    *attribute,
                    "not valid for a text field",
                ));
            }
            Ok(FieldMetadata::Text(TextMetadata {
                name: overrides
                    .name
                    .clone()
                    .unwrap_or_else(|| defaults.name.clone()),
                entity_category: overrides
                    .entity_category
                    .unwrap_or(defaults.entity_category),
                internal: overrides.internal.unwrap_or(defaults.internal),
            }))
        }
        FieldMetadata::Numeric(defaults) => Ok(FieldMetadata::Numeric(NumericMetadata {
            name: overrides
                .name
                .clone()
                .unwrap_or_else(|| defaults.name.clone()),
            entity_category: overrides
                .entity_category
                .unwrap_or(defaults.entity_category),
            internal: overrides.internal.unwrap_or(defaults.internal),
            unit: overrides
                .unit
                .clone()
                .unwrap_or_else(|| defaults.unit.clone()),
            device_class: overrides.device_class.unwrap_or(defaults.device_class),
            state_class: overrides.state_class.unwrap_or(defaults.state_class),
            accuracy_decimals: overrides
                .accuracy_decimals
                .unwrap_or(defaults.accuracy_decimals),
        })),
    }
}

fn string_value(key: &str, attribute: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::invalid_override(key, attribute, "expected a string"))
}

fn decode<T: DeserializeOwned>(key: &str, attribute: &str, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| ConfigError::invalid_override(key, attribute, e.to_string()))
}

fn accuracy_decimals(key: &str, attribute: &str, value: &Value) -> Result<u8> {
    let decimals = value
        .as_i64()
        .ok_or_else(|| ConfigError::invalid_override(key, attribute, "expected an integer"))?;
    if decimals < 0 {
        return Err(ConfigError::invalid_override(
            key,
            attribute,
            format!("must not be negative, got {}", decimals),
        ));
    }
    u8::try_from(decimals).map_err(|_| {
        ConfigError::invalid_override(key, attribute, format!("must be at most 255, got {}", decimals))
    })
}
