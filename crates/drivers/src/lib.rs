//! omnik-sens-drivers: The Omnik inverter and logger driver families.

#[macro_use]
mod macros;

mod inverter;
mod logger;

pub use inverter::{OmnikInverter, INVERTER_CATALOGUE};
pub use logger::{OmnikLogger, LOGGER_CATALOGUE};

pub use omnik_sens_core::{
    configure, describe, dump_config, find_slot, normalize, setter_name, verify_contract,
    ConfigError, Driver, DriverSettings, NumericSensor, Registry, SensorInstance, SensorRegistry,
    SetterSlot, Slot, TextSensor,
};
pub use omnik_sens_types::{DriverFamily, FieldCatalogue};

use serde_json::Value;
use std::collections::HashMap;

/// Catalogue of a driver family
pub fn catalogue_for(family: DriverFamily) -> &'static FieldCatalogue {
    match family {
        DriverFamily::Inverter => &INVERTER_CATALOGUE,
        DriverFamily::Logger => &LOGGER_CATALOGUE,
    }
}

/// A fully wired driver of either family
pub enum ConfiguredDriver {
    Inverter(OmnikInverter),
    Logger(OmnikLogger),
}

impl ConfiguredDriver {
    /// Run the configuration pipeline for the given family
    pub fn build(
        family: DriverFamily,
        settings: DriverSettings,
        overrides: &HashMap<String, Value>,
        registry: &mut dyn SensorRegistry,
    ) -> omnik_sens_core::Result<Self> {
        Ok(match family {
            DriverFamily::Inverter => Self::Inverter(configure(settings, overrides, registry)?),
            DriverFamily::Logger => Self::Logger(configure(settings, overrides, registry)?),
        })
    }

    pub fn family(&self) -> DriverFamily {
        match self {
            Self::Inverter(_) => OmnikInverter::family(),
            Self::Logger(_) => OmnikLogger::family(),
        }
    }

    pub fn settings(&self) -> &DriverSettings {
        match self {
            Self::Inverter(driver) => driver.settings(),
            Self::Logger(driver) => driver.settings(),
        }
    }

    /// Sensors bound to this driver, in slot order
    pub fn sensors(&self) -> Vec<SensorInstance> {
        let bound = match self {
            Self::Inverter(driver) => driver.bound_sensors(),
            Self::Logger(driver) => driver.bound_sensors(),
        };
        bound.into_iter().filter_map(|(_, sensor)| sensor).collect()
    }

    pub fn describe(&self) -> Vec<String> {
        match self {
            Self::Inverter(driver) => describe(driver),
            Self::Logger(driver) => describe(driver),
        }
    }

    pub fn dump_config(&self) {
        match self {
            Self::Inverter(driver) => dump_config(driver),
            Self::Logger(driver) => dump_config(driver),
        }
    }
}
