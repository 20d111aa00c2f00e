//! Per-driver configuration pipeline
//!
//! declare -> normalize -> construct -> bind, for every catalogue field of a
//! driver. Either every field ends up bound or the driver is discarded and
//! the registry is left as it was.

use crate::dispatch::bind;
use crate::driver::{verify_contract, Driver, DriverSettings};
use crate::error::{ConfigError, Result};
use crate::factory::SensorFactory;
use crate::normalize::{normalize, parse_override};
use crate::registry::SensorRegistry;
use omnik_sens_types::{FieldMetadata, MetadataOverride};
use serde_json::Value;
use std::collections::HashMap;

/// Configure a driver from raw per-field override objects
pub fn configure<D: Driver>(
    settings: DriverSettings,
    overrides: &HashMap<String, Value>,
    registry: &mut dyn SensorRegistry,
) -> Result<D> {
    verify_contract::<D>()?;
    let catalogue = D::catalogue();
    reject_unknown_keys::<D, _>(overrides)?;

    // Catalogue order, so the first malformed field reported is stable
    let mut parsed = HashMap::with_capacity(overrides.len());
    for field in catalogue.iter() {
        if let Some(value) = overrides.get(&field.key) {
            parsed.insert(
                field.key.clone(),
                parse_override(&field.key, field.kind(), value)?,
            );
        }
    }

    configure_typed(settings, &parsed, registry)
}

/// Configure a driver from already parsed overrides
pub fn configure_typed<D: Driver>(
    settings: DriverSettings,
    overrides: &HashMap<String, MetadataOverride>,
    registry: &mut dyn SensorRegistry,
) -> Result<D> {
    verify_contract::<D>()?;
    let catalogue = D::catalogue();
    reject_unknown_keys::<D, _>(overrides)?;

    // Normalize everything before the first side effect
    let normalized: Vec<(&str, FieldMetadata)> = catalogue
        .iter()
        .map(|field| {
            normalize(&field.key, &field.defaults, overrides.get(&field.key))
                .map(|metadata| (field.key.as_str(), metadata))
        })
        .collect::<Result<_>>()?;

    let mut driver = D::new(settings);
    let owner = driver.settings().id.clone();
    let mut factory = SensorFactory::new(registry);

    for (key, metadata) in normalized {
        let outcome = factory
            .create(&owner, key, metadata)
            .and_then(|sensor| bind(&mut driver, key, sensor));
        if let Err(e) = outcome {
            log::warn!(
                "{}: configuration failed at field '{}', rolling back {} sensor(s)",
                owner,
                key,
                factory.created().len()
            );
            factory.roll_back();
            return Err(e);
        }
    }

    log::info!(
        "{}: bound {} {} sensor(s)",
        owner,
        factory.created().len(),
        D::family()
    );
    Ok(driver)
}

fn reject_unknown_keys<D: Driver, T>(overrides: &HashMap<String, T>) -> Result<()> {
    let catalogue = D::catalogue();
    let mut unknown: Vec<&String> = overrides
        .keys()
        .filter(|key| !catalogue.contains(key))
        .collect();
    unknown.sort();
    match unknown.first() {
        Some(key) => Err(ConfigError::mismatch(
            D::family(),
            key.as_str(),
            format!("not a field of the {} catalogue", D::family()),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::sensor::{SensorId, SensorInstance, TextSensor};
    use crate::testing::{DriftedDriver, TestDriver};
    use omnik_sens_types::{DriverFamily, EntityCategory, TextMetadata};
    use serde_json::json;
    use std::sync::Arc;

    fn settings() -> DriverSettings {
        DriverSettings::new("roof", "uart_bus")
    }

    #[test]
    fn test_every_slot_bound_exactly_once() {
        let mut registry = Registry::new();
        let driver: TestDriver = configure(settings(), &HashMap::new(), &mut registry).unwrap();

        assert_eq!(
            driver.calls,
            vec![
                "set_power_sensor",
                "set_status_text_sensor",
                "set_phase_voltage_sensor"
            ]
        );
        assert!(driver.bound_sensors().iter().all(|(_, sensor)| sensor.is_some()));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.list_visible().len(), 2);
    }

    #[test]
    fn test_bound_sensor_is_registered_object() {
        let mut registry = Registry::new();
        let driver: TestDriver = configure(settings(), &HashMap::new(), &mut registry).unwrap();

        let bound = SensorInstance::Numeric(driver.power.clone().unwrap());
        let registered = registry.get(bound.id()).unwrap();
        assert!(registered.same_object(&bound));
    }

    #[test]
    fn test_override_applied() {
        let mut registry = Registry::new();
        let overrides = HashMap::from([(
            "status".to_string(),
            json!({"name": "Custom Status", "internal": true}),
        )]);
        let driver: TestDriver = configure(settings(), &overrides, &mut registry).unwrap();

        let status = driver.status.unwrap();
        assert_eq!(status.metadata().name, "Custom Status");
        assert!(status.metadata().internal);
        assert_eq!(status.metadata().entity_category, EntityCategory::Diagnostic);
        assert!(registry.find("custom_status").is_some());
    }

    #[test]
    fn test_invalid_override_has_no_side_effects() {
        let mut registry = Registry::new();
        let overrides = HashMap::from([("status".to_string(), json!({"unit": "V"}))]);
        let result: Result<TestDriver> = configure(settings(), &overrides, &mut registry);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride { ref key, ref attribute, .. })
                if key == "status" && attribute == "unit"
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_first_invalid_field_in_catalogue_order() {
        let overrides = HashMap::from([
            ("phase_voltage".to_string(), json!({"accuracy_decimals": -2})),
            ("power".to_string(), json!({"device_class": "speed"})),
            ("status".to_string(), json!({"state_class": "total"})),
        ]);
        for _ in 0..8 {
            let mut registry = Registry::new();
            let result: Result<TestDriver> = configure(settings(), &overrides, &mut registry);
            assert!(matches!(
                result,
                Err(ConfigError::InvalidOverride { ref key, .. }) if key == "power"
            ));
            assert!(registry.is_empty());
        }
    }

    #[test]
    fn test_unknown_override_key() {
        let mut registry = Registry::new();
        let overrides = HashMap::from([("ip_address".to_string(), json!({}))]);
        let result: Result<TestDriver> = configure(settings(), &overrides, &mut registry);

        match result {
            Err(ConfigError::CatalogueMismatch { family, key, .. }) => {
                assert_eq!(family, DriverFamily::Inverter);
                assert_eq!(key, "ip_address");
            }
            Err(other) => panic!("expected CatalogueMismatch, got {:?}", other),
            Ok(_) => panic!("expected CatalogueMismatch"),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registration_conflict_rolls_back() {
        let mut registry = Registry::new();
        let squatter = SensorInstance::Text(Arc::new(TextSensor::new(
            SensorId::from_name("Test Status"),
            "other",
            TextMetadata {
                name: "Test Status".to_string(),
                entity_category: EntityCategory::None,
                internal: false,
            },
        )));
        registry.register(squatter).unwrap();

        let result: Result<TestDriver> = configure(settings(), &HashMap::new(), &mut registry);
        assert!(matches!(
            result,
            Err(ConfigError::RegistrationConflict { ref key, .. }) if key == "status"
        ));
        // Only the pre-existing sensor survives
        assert_eq!(registry.len(), 1);
        assert!(registry.find("test_power").is_none());
    }

    #[test]
    fn test_drifted_driver_is_rejected() {
        let mut registry = Registry::new();
        let result: Result<DriftedDriver> = configure(settings(), &HashMap::new(), &mut registry);
        assert!(matches!(result, Err(ConfigError::CatalogueMismatch { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_typed_overrides() {
        let mut registry = Registry::new();
        let overrides = HashMap::from([(
            "power".to_string(),
            MetadataOverride {
                accuracy_decimals: Some(1),
                ..MetadataOverride::with_name("Grid power")
            },
        )]);
        let driver: TestDriver = configure_typed(settings(), &overrides, &mut registry).unwrap();

        let power = driver.power.unwrap();
        assert_eq!(power.metadata().name, "Grid power");
        assert_eq!(power.metadata().accuracy_decimals, 1);
        assert_eq!(power.metadata().unit, "kW");
    }
}
