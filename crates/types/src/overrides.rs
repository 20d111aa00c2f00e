//! Partial metadata overrides supplied by configuration

use crate::field::{DeviceClass, EntityCategory, FieldMetadata, StateClass};
use serde::{Deserialize, Serialize};

/// Attributes valid for every field kind
pub const COMMON_ATTRIBUTES: &[&str] = &["name", "entity_category", "internal"];

/// Attributes valid only for numeric fields
pub const NUMERIC_ATTRIBUTES: &[&str] = &[
    "unit_of_measurement",
    "device_class",
    "state_class",
    "accuracy_decimals",
];

/// A partial set of metadata attributes; absent attributes keep their defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_category: Option<EntityCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<bool>,
    #[serde(
        default,
        rename = "unit_of_measurement",
        alias = "unit",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<DeviceClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_class: Option<StateClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_decimals: Option<u8>,
}

impl MetadataOverride {
    /// Override replacing only the display name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the numeric-only attributes present in this override
    pub fn numeric_attributes(&self) -> Vec<&'static str> {
        let present = [
            self.unit.is_some(),
            self.device_class.is_some(),
            self.state_class.is_some(),
            self.accuracy_decimals.is_some(),
        ];
        NUMERIC_ATTRIBUTES
            .iter()
            .zip(present)
            .filter_map(|(name, present)| present.then_some(*name))
            .collect()
    }
}

/// A fully populated override carrying every attribute of the metadata
impl From<&FieldMetadata> for MetadataOverride {
    fn from(metadata: &FieldMetadata) -> Self {
        match metadata {
            FieldMetadata::Numeric(m) => Self {
                name: Some(m.name.clone()),
                entity_category: Some(m.entity_category),
                internal: Some(m.internal),
                unit: Some(m.unit.clone()),
                device_class: Some(m.device_class),
                state_class: Some(m.state_class),
                accuracy_decimals: Some(m.accuracy_decimals),
            },
            FieldMetadata::Text(m) => Self {
                name: Some(m.name.clone()),
                entity_category: Some(m.entity_category),
                internal: Some(m.internal),
                ..Self::default()
            },
        }
    }
}
