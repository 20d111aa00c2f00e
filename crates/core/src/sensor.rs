//! Sensor objects handed to drivers and the observation registry

use omnik_sens_types::{FieldKind, FieldMetadata, NumericMetadata, TextMetadata};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Registry identity of a sensor (its object id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorId(String);

impl SensorId {
    /// Derive an object id from a display name
    ///
    /// Lowercases the name and collapses every run of characters that are not
    /// ASCII alphanumerics into a single `_`. Leading and trailing separators
    /// are dropped.
    pub fn from_name(name: &str) -> Self {
        let mut id = String::with_capacity(name.len());
        let mut pending_separator = false;
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_separator && !id.is_empty() {
                    id.push('_');
                }
                pending_separator = false;
                id.push(c.to_ascii_lowercase());
            } else {
                pending_separator = true;
            }
        }
        Self(id)
    }

    /// Object id of a field sensor; nameless sensors fall back to owner and key
    pub fn for_field(owner: &str, key: &str, name: &str) -> Self {
        let id = Self::from_name(name);
        if id.0.is_empty() {
            Self::from_name(&format!("{} {}", owner, key))
        } else {
            id
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A numeric observation object
#[derive(Debug)]
pub struct NumericSensor {
    id: SensorId,
    key: String,
    metadata: NumericMetadata,
    state: RwLock<Option<f32>>,
}

impl NumericSensor {
    pub fn new(id: SensorId, key: impl Into<String>, metadata: NumericMetadata) -> Self {
        Self {
            id,
            key: key.into(),
            metadata,
            state: RwLock::new(None),
        }
    }

    pub fn id(&self) -> &SensorId {
        &self.id
    }

    /// Catalogue key of the field this sensor observes
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn metadata(&self) -> &NumericMetadata {
        &self.metadata
    }

    pub fn publish_state(&self, value: f32) {
        match self.state.write() {
            Ok(mut state) => *state = Some(value),
            Err(_) => log::warn!("{}: state lock poisoned, dropping {}", self.id, value),
        }
    }

    pub fn state(&self) -> Option<f32> {
        self.state.read().ok().and_then(|state| *state)
    }

    /// Latest state rendered with the configured accuracy decimals
    pub fn formatted_state(&self) -> Option<String> {
        let decimals = usize::from(self.metadata.accuracy_decimals);
        self.state().map(|value| {
            if self.metadata.unit.is_empty() {
                format!("{:.*}", decimals, value)
            } else {
                format!("{:.*} {}", decimals, value, self.metadata.unit)
            }
        })
    }
}

/// A text observation object
#[derive(Debug)]
pub struct TextSensor {
    id: SensorId,
    key: String,
    metadata: TextMetadata,
    state: RwLock<Option<String>>,
}

impl TextSensor {
    pub fn new(id: SensorId, key: impl Into<String>, metadata: TextMetadata) -> Self {
        Self {
            id,
            key: key.into(),
            metadata,
            state: RwLock::new(None),
        }
    }

    pub fn id(&self) -> &SensorId {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn metadata(&self) -> &TextMetadata {
        &self.metadata
    }

    pub fn publish_state(&self, value: impl Into<String>) {
        match self.state.write() {
            Ok(mut state) => *state = Some(value.into()),
            Err(_) => log::warn!("{}: state lock poisoned, dropping update", self.id),
        }
    }

    pub fn state(&self) -> Option<String> {
        self.state.read().ok().and_then(|state| state.clone())
    }
}

/// A constructed sensor of either kind, shared between registry and driver
#[derive(Debug, Clone)]
pub enum SensorInstance {
    Numeric(Arc<NumericSensor>),
    Text(Arc<TextSensor>),
}

impl SensorInstance {
    pub fn id(&self) -> &SensorId {
        match self {
            SensorInstance::Numeric(sensor) => sensor.id(),
            SensorInstance::Text(sensor) => sensor.id(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            SensorInstance::Numeric(sensor) => sensor.key(),
            SensorInstance::Text(sensor) => sensor.key(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            SensorInstance::Numeric(_) => FieldKind::Numeric,
            SensorInstance::Text(_) => FieldKind::Text,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SensorInstance::Numeric(sensor) => &sensor.metadata().name,
            SensorInstance::Text(sensor) => &sensor.metadata().name,
        }
    }

    pub fn is_internal(&self) -> bool {
        match self {
            SensorInstance::Numeric(sensor) => sensor.metadata().internal,
            SensorInstance::Text(sensor) => sensor.metadata().internal,
        }
    }

    /// Metadata the sensor was built with
    pub fn metadata(&self) -> FieldMetadata {
        match self {
            SensorInstance::Numeric(sensor) => FieldMetadata::Numeric(sensor.metadata().clone()),
            SensorInstance::Text(sensor) => FieldMetadata::Text(sensor.metadata().clone()),
        }
    }

    /// True when both handles point at the same sensor object
    pub fn same_object(&self, other: &SensorInstance) -> bool {
        match (self, other) {
            (SensorInstance::Numeric(a), SensorInstance::Numeric(b)) => Arc::ptr_eq(a, b),
            (SensorInstance::Text(a), SensorInstance::Text(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnik_sens_types::{DeviceClass, EntityCategory, StateClass};

    #[test]
    fn test_object_id_from_name() {
        assert_eq!(SensorId::from_name("Inverter Energy today").as_str(), "inverter_energy_today");
        assert_eq!(
            SensorId::from_name("Inverter Status 0x10/0x81").as_str(),
            "inverter_status_0x10_0x81"
        );
        assert_eq!(
            SensorId::from_name("  Firmware version (main) ").as_str(),
            "firmware_version_main"
        );
        assert_eq!(SensorId::from_name("").as_str(), "");
    }

    #[test]
    fn test_object_id_fallback() {
        assert_eq!(
            SensorId::for_field("roof", "run_state", "").as_str(),
            "roof_run_state"
        );
        assert_eq!(
            SensorId::for_field("roof", "run_state", "Run").as_str(),
            "run"
        );
    }

    #[test]
    fn test_numeric_state_formatting() {
        let sensor = NumericSensor::new(
            SensorId::from_name("Energy"),
            "energy_today",
            NumericMetadata {
                name: "Energy".to_string(),
                entity_category: EntityCategory::None,
                internal: false,
                unit: "kWh".to_string(),
                device_class: DeviceClass::Energy,
                state_class: StateClass::TotalIncreasing,
                accuracy_decimals: 2,
            },
        );
        assert_eq!(sensor.formatted_state(), None);
        sensor.publish_state(12.345_6);
        assert_eq!(sensor.formatted_state().as_deref(), Some("12.35 kWh"));
    }

    #[test]
    fn test_text_state() {
        let sensor = TextSensor::new(
            SensorId::from_name("Run state"),
            "run_state",
            TextMetadata {
                name: "Run state".to_string(),
                entity_category: EntityCategory::Diagnostic,
                internal: false,
            },
        );
        sensor.publish_state("Normal");
        assert_eq!(sensor.state().as_deref(), Some("Normal"));

        let instance = SensorInstance::Text(Arc::new(sensor));
        assert_eq!(instance.kind(), FieldKind::Text);
        assert!(instance.same_object(&instance.clone()));
    }

    #[test]
    fn test_publish_after_poisoned_lock() {
        let sensor = Arc::new(TextSensor::new(
            SensorId::from_name("Run state"),
            "run_state",
            TextMetadata {
                name: "Run state".to_string(),
                entity_category: EntityCategory::Diagnostic,
                internal: false,
            },
        ));
        let writer = Arc::clone(&sensor);
        let joined = std::thread::spawn(move || {
            let _guard = writer.state.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(joined.is_err());

        // Dropped with a warning instead of panicking
        sensor.publish_state("Normal");
        assert_eq!(sensor.state(), None);
    }
}
