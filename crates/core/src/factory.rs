//! Sensor factory

use crate::error::{ConfigError, Result};
use crate::registry::{RegistryError, SensorRegistry};
use crate::sensor::{NumericSensor, SensorId, SensorInstance, TextSensor};
use omnik_sens_types::FieldMetadata;
use std::sync::Arc;

/// Builds sensors from normalized metadata and registers them with the host
pub struct SensorFactory<'r> {
    registry: &'r mut dyn SensorRegistry,
    created: Vec<SensorId>,
}

impl<'r> SensorFactory<'r> {
    pub fn new(registry: &'r mut dyn SensorRegistry) -> Self {
        Self {
            registry,
            created: Vec::new(),
        }
    }

    /// Construct the sensor matching the metadata kind and register it
    ///
    /// `owner` is the id of the driver the sensor will be bound to; it only
    /// matters for sensors without a name.
    pub fn create(
        &mut self,
        owner: &str,
        key: &str,
        metadata: FieldMetadata,
    ) -> Result<SensorInstance> {
        let id = SensorId::for_field(owner, key, metadata.name());
        let sensor = match metadata {
            FieldMetadata::Numeric(metadata) => {
                SensorInstance::Numeric(Arc::new(NumericSensor::new(id, key, metadata)))
            }
            FieldMetadata::Text(metadata) => {
                SensorInstance::Text(Arc::new(TextSensor::new(id, key, metadata)))
            }
        };

        let id = self
            .registry
            .register(sensor.clone())
            .map_err(|e| match e {
                RegistryError::DuplicateIdentity(_) => ConfigError::RegistrationConflict {
                    key: key.to_string(),
                    reason: e.to_string(),
                },
            })?;
        self.created.push(id);
        Ok(sensor)
    }

    /// Ids registered through this factory so far
    pub fn created(&self) -> &[SensorId] {
        &self.created
    }

    /// Unregister everything this factory registered
    pub fn roll_back(&mut self) {
        for id in self.created.drain(..).rev() {
            if self.registry.unregister(&id).is_none() {
                log::warn!("Sensor '{}' was already gone during rollback", id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use omnik_sens_types::{
        DeviceClass, EntityCategory, FieldKind, NumericMetadata, StateClass, TextMetadata,
    };

    fn energy_today() -> FieldMetadata {
        FieldMetadata::Numeric(NumericMetadata {
            name: "Inverter Energy today".to_string(),
            entity_category: EntityCategory::None,
            internal: false,
            unit: "kWh".to_string(),
            device_class: DeviceClass::Energy,
            state_class: StateClass::TotalIncreasing,
            accuracy_decimals: 2,
        })
    }

    #[test]
    fn test_create_numeric_sensor() {
        let mut registry = Registry::new();
        let sensor = SensorFactory::new(&mut registry)
            .create("inverter", "energy_today", energy_today())
            .unwrap();

        match &sensor {
            SensorInstance::Numeric(numeric) => {
                assert_eq!(numeric.metadata().unit, "kWh");
                assert_eq!(numeric.metadata().state_class, StateClass::TotalIncreasing);
                assert_eq!(numeric.metadata().accuracy_decimals, 2);
                assert_eq!(numeric.id().as_str(), "inverter_energy_today");
            }
            other => panic!("expected numeric sensor, got {:?}", other),
        }

        let registered = registry.get(sensor.id()).unwrap();
        assert!(registered.same_object(&sensor));
    }

    #[test]
    fn test_create_text_sensor() {
        let mut registry = Registry::new();
        let metadata = FieldMetadata::Text(TextMetadata {
            name: "Logger IP address".to_string(),
            entity_category: EntityCategory::Diagnostic,
            internal: false,
        });
        let sensor = SensorFactory::new(&mut registry)
            .create("logger", "ip_address", metadata.clone())
            .unwrap();
        assert_eq!(sensor.kind(), FieldKind::Text);
        assert_eq!(sensor.metadata(), metadata);
    }

    #[test]
    fn test_registration_conflict_and_rollback() {
        let mut registry = Registry::new();
        let mut factory = SensorFactory::new(&mut registry);
        factory.create("a", "energy_today", energy_today()).unwrap();

        let err = factory
            .create("b", "energy_today", energy_today())
            .unwrap_err();
        assert!(matches!(err, ConfigError::RegistrationConflict { ref key, .. } if key == "energy_today"));
        assert_eq!(factory.created().len(), 1);

        factory.roll_back();
        assert!(factory.created().is_empty());
        assert!(registry.is_empty());
    }
}
