//! Human-readable configuration dump of a wired driver

use crate::driver::Driver;
use crate::sensor::SensorInstance;

/// Describe a driver and every slot, one line per attribute
///
/// Empty attributes (such as a unit-less sensor's unit) are left out.
pub fn describe<D: Driver>(driver: &D) -> Vec<String> {
    let settings = driver.settings();
    let mut lines = vec![
        format!("Omnik {}:", D::family()),
        format!("  Id: {}", settings.id),
        format!("  UART bus: {}", settings.uart_id),
    ];

    for (key, sensor) in driver.bound_sensors() {
        lines.push(format!("  {}:", key));
        match sensor {
            Some(sensor) => describe_sensor(&mut lines, "    ", &sensor),
            None => lines.push("    <not bound>".to_string()),
        }
    }
    lines
}

/// Log the configuration of a driver
pub fn dump_config<D: Driver>(driver: &D) {
    for line in describe(driver) {
        log::info!("{}", line);
    }
}

fn push_attribute(lines: &mut Vec<String>, prefix: &str, name: &str, value: &str) {
    if !value.is_empty() {
        lines.push(format!("{}{}: {}", prefix, name, value));
    }
}

fn describe_sensor(lines: &mut Vec<String>, prefix: &str, sensor: &SensorInstance) {
    push_attribute(lines, prefix, "Name", sensor.name());
    push_attribute(lines, prefix, "Object Id", sensor.id().as_str());
    match sensor {
        SensorInstance::Numeric(numeric) => {
            let metadata = numeric.metadata();
            push_attribute(lines, prefix, "Entity Category", &metadata.entity_category.to_string());
            push_attribute(lines, prefix, "Device Class", metadata.device_class.as_str());
            push_attribute(lines, prefix, "State Class", metadata.state_class.as_str());
            push_attribute(lines, prefix, "Unit of Measurement", &metadata.unit);
            push_attribute(
                lines,
                prefix,
                "Accuracy Decimals",
                &metadata.accuracy_decimals.to_string(),
            );
        }
        SensorInstance::Text(text) => {
            let metadata = text.metadata();
            push_attribute(lines, prefix, "Entity Category", &metadata.entity_category.to_string());
        }
    }
    if sensor.is_internal() {
        push_attribute(lines, prefix, "Internal", "true");
    }
}
