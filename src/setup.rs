//! Configure every driver unit of an application config

use crate::config::AppConfig;
use omnik_sens_drivers::{ConfigError, ConfiguredDriver, Registry, SensorRegistry};

/// Counts reported after a successful setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub drivers: usize,
    pub registered: usize,
    pub visible: usize,
}

impl Summary {
    pub fn of(drivers: &[ConfiguredDriver], registry: &Registry) -> Self {
        Self {
            drivers: drivers.len(),
            registered: registry.len(),
            visible: registry.list_visible().len(),
        }
    }
}

/// Configure all units against one registry
///
/// Fails on the first unit that fails. Sensors registered for earlier
/// units are unregistered again, so the registry is left as it was.
pub fn configure_all(
    config: &AppConfig,
    registry: &mut dyn SensorRegistry,
) -> Result<Vec<ConfiguredDriver>, ConfigError> {
    let mut drivers = Vec::with_capacity(config.drivers.len());

    for unit in &config.drivers {
        let settings = unit.settings();
        log::debug!("Configuring {} '{}'", unit.family, settings.id);

        match ConfiguredDriver::build(unit.family, settings, &unit.sensors, registry) {
            Ok(driver) => drivers.push(driver),
            Err(e) => {
                roll_back(&drivers, registry);
                return Err(e);
            }
        }
    }

    Ok(drivers)
}

fn roll_back(drivers: &[ConfiguredDriver], registry: &mut dyn SensorRegistry) {
    for driver in drivers.iter().rev() {
        for sensor in driver.sensors().iter().rev() {
            if registry.unregister(sensor.id()).is_none() {
                log::warn!("Sensor '{}' was already unregistered", sensor.id());
            }
        }
        log::warn!(
            "Discarded {} '{}' after a later unit failed",
            driver.family(),
            driver.settings().id
        );
    }
}
