//! Field kinds and descriptive metadata for telemetry fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability class of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Scalar measurement with unit, precision and aggregation policy
    Numeric,
    /// Opaque status or identifier string
    Text,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Numeric => f.write_str("numeric"),
            FieldKind::Text => f.write_str("text"),
        }
    }
}

/// Where the host UI shows a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    #[default]
    None,
    Diagnostic,
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityCategory::None => f.write_str("None"),
            EntityCategory::Diagnostic => f.write_str("Diagnostic"),
        }
    }
}

/// Physical quantity a numeric sensor measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    #[default]
    #[serde(alias = "")]
    Empty,
    Conductivity,
    Current,
    Energy,
    Frequency,
    Power,
    Temperature,
    Voltage,
}

impl DeviceClass {
    /// Name as used in configuration documents; empty for `Empty`
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Empty => "",
            DeviceClass::Conductivity => "conductivity",
            DeviceClass::Current => "current",
            DeviceClass::Energy => "energy",
            DeviceClass::Frequency => "frequency",
            DeviceClass::Power => "power",
            DeviceClass::Temperature => "temperature",
            DeviceClass::Voltage => "voltage",
        }
    }
}

/// Aggregation policy of a numeric sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    /// Instantaneous reading
    #[default]
    Measurement,
    /// Running total that may also decrease or reset
    Total,
    /// Monotonically increasing total (resets are treated as a new cycle)
    TotalIncreasing,
}

impl StateClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateClass::Measurement => "measurement",
            StateClass::Total => "total",
            StateClass::TotalIncreasing => "total_increasing",
        }
    }
}

/// Metadata of a numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericMetadata {
    /// Human-readable name
    pub name: String,
    pub entity_category: EntityCategory,
    /// Hidden from the host UI but still updated
    pub internal: bool,
    /// Unit of measurement (may be empty)
    pub unit: String,
    pub device_class: DeviceClass,
    pub state_class: StateClass,
    /// Number of decimal places
    pub accuracy_decimals: u8,
}

/// Metadata of a text field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMetadata {
    /// Human-readable name
    pub name: String,
    pub entity_category: EntityCategory,
    /// Hidden from the host UI but still updated
    pub internal: bool,
}

/// Kind-dependent metadata of a field
///
/// The variant fixes the kind; text fields cannot carry numeric attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldMetadata {
    Numeric(NumericMetadata),
    Text(TextMetadata),
}

impl FieldMetadata {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldMetadata::Numeric(_) => FieldKind::Numeric,
            FieldMetadata::Text(_) => FieldKind::Text,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FieldMetadata::Numeric(m) => &m.name,
            FieldMetadata::Text(m) => &m.name,
        }
    }

    pub fn entity_category(&self) -> EntityCategory {
        match self {
            FieldMetadata::Numeric(m) => m.entity_category,
            FieldMetadata::Text(m) => m.entity_category,
        }
    }

    pub fn is_internal(&self) -> bool {
        match self {
            FieldMetadata::Numeric(m) => m.internal,
            FieldMetadata::Text(m) => m.internal,
        }
    }
}

/// Protocol message (control code, function code) whose payload feeds a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId {
    pub control_code: u8,
    pub function_code: u8,
}

impl MessageId {
    pub const fn new(control_code: u8, function_code: u8) -> Self {
        Self {
            control_code,
            function_code,
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}/0x{:02X}", self.control_code, self.function_code)
    }
}

/// Declaration of a single field in a catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique key within the catalogue
    pub key: String,
    /// Message feeding this field
    pub message: MessageId,
    /// Default metadata; its variant determines the field kind
    pub defaults: FieldMetadata,
}

impl FieldDescriptor {
    /// Declare a text field
    pub fn text(
        key: impl Into<String>,
        message: MessageId,
        name: impl Into<String>,
        entity_category: EntityCategory,
    ) -> Self {
        Self {
            key: key.into(),
            message,
            defaults: FieldMetadata::Text(TextMetadata {
                name: name.into(),
                entity_category,
                internal: false,
            }),
        }
    }

    /// Declare a numeric field
    pub fn numeric(
        key: impl Into<String>,
        message: MessageId,
        name: impl Into<String>,
        unit: impl Into<String>,
        device_class: DeviceClass,
        state_class: StateClass,
        accuracy_decimals: u8,
    ) -> Self {
        Self {
            key: key.into(),
            message,
            defaults: FieldMetadata::Numeric(NumericMetadata {
                name: name.into(),
                entity_category: EntityCategory::None,
                internal: false,
                unit: unit.into(),
                device_class,
                state_class,
                accuracy_decimals,
            }),
        }
    }

    /// Mark the field hidden by default
    pub fn internal(mut self) -> Self {
        match &mut self.defaults {
            FieldMetadata::Numeric(m) => m.internal = true,
            FieldMetadata::Text(m) => m.internal = true,
        }
        self
    }

    /// Override the default entity category
    pub fn category(mut self, entity_category: EntityCategory) -> Self {
        match &mut self.defaults {
            FieldMetadata::Numeric(m) => m.entity_category = entity_category,
            FieldMetadata::Text(m) => m.entity_category = entity_category,
        }
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.defaults.kind()
    }
}
