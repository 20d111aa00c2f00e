//! Binding dispatcher

use crate::driver::{find_slot, Driver, SetterSlot};
use crate::error::{ConfigError, Result};
use crate::sensor::SensorInstance;

/// Attach a sensor to the slot serving `key` on the driver
///
/// The slot is looked up in the driver's static slot table; a missing slot or
/// a slot of the other kind means catalogue and driver have drifted apart.
pub fn bind<D: Driver>(driver: &mut D, key: &str, sensor: SensorInstance) -> Result<()> {
    let slot = find_slot::<D>(key).ok_or_else(|| {
        ConfigError::mismatch(D::family(), key, "driver has no slot for this field")
    })?;

    match (&slot.setter, sensor) {
        (SetterSlot::Numeric(set), SensorInstance::Numeric(sensor)) => set(&mut *driver, sensor),
        (SetterSlot::Text(set), SensorInstance::Text(sensor)) => set(&mut *driver, sensor),
        (setter, sensor) => {
            return Err(ConfigError::mismatch(
                D::family(),
                key,
                format!(
                    "slot {} takes a {} sensor, got a {} sensor",
                    slot.setter_name,
                    setter.kind(),
                    sensor.kind()
                ),
            ))
        }
    }

    log::debug!(
        "{}: bound '{}' via {}",
        driver.settings().id,
        key,
        slot.setter_name
    );
    Ok(())
}
