//! Observation registry for constructed sensors

use crate::sensor::{SensorId, SensorInstance};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("a sensor with id '{0}' is already registered")]
    DuplicateIdentity(SensorId),
}

/// Host-wide registry through which external systems discover sensors
///
/// Passed explicitly into the sensor factory so the binding core can run
/// against an in-memory registry in tests.
pub trait SensorRegistry {
    /// Register a sensor, returning the identity it is known by
    fn register(&mut self, sensor: SensorInstance) -> Result<SensorId, RegistryError>;

    /// Remove a previously registered sensor
    fn unregister(&mut self, id: &SensorId) -> Option<SensorInstance>;
}

/// In-memory sensor registry
///
/// Keeps registration order so listings are stable.
pub struct Registry {
    sensors: HashMap<SensorId, SensorInstance>,
    order: Vec<SensorId>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            sensors: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Look up a sensor by id
    pub fn get(&self, id: &SensorId) -> Option<&SensorInstance> {
        self.sensors.get(id)
    }

    /// Look up a sensor by object id string
    pub fn find(&self, object_id: &str) -> Option<&SensorInstance> {
        self.sensors
            .iter()
            .find(|(id, _)| id.as_str() == object_id)
            .map(|(_, sensor)| sensor)
    }

    /// All registered sensors in registration order
    pub fn list_sensors(&self) -> Vec<&SensorInstance> {
        self.order
            .iter()
            .filter_map(|id| self.sensors.get(id))
            .collect()
    }

    /// Sensors shown in the host UI (internal ones are excluded)
    pub fn list_visible(&self) -> Vec<&SensorInstance> {
        self.list_sensors()
            .into_iter()
            .filter(|sensor| !sensor.is_internal())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorRegistry for Registry {
    fn register(&mut self, sensor: SensorInstance) -> Result<SensorId, RegistryError> {
        let id = sensor.id().clone();
        if self.sensors.contains_key(&id) {
            return Err(RegistryError::DuplicateIdentity(id));
        }
        log::trace!("Registered sensor '{}' for field '{}'", id, sensor.key());
        self.sensors.insert(id.clone(), sensor);
        self.order.push(id.clone());
        Ok(id)
    }

    fn unregister(&mut self, id: &SensorId) -> Option<SensorInstance> {
        let sensor = self.sensors.remove(id)?;
        self.order.retain(|registered| registered != id);
        Some(sensor)
    }
}
