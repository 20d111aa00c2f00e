//! Minimal drivers and sensors shared by the unit tests of this crate

use crate::driver::{Driver, DriverSettings, SetterSlot, Slot};
use crate::sensor::{NumericSensor, SensorId, SensorInstance, TextSensor};
use omnik_sens_types::{
    DeviceClass, DriverFamily, EntityCategory, FieldCatalogue, FieldDescriptor, MessageId,
    NumericMetadata, StateClass, TextMetadata,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

const MESSAGE: MessageId = MessageId::new(0x11, 0x90);

static TEST_CATALOGUE: Lazy<FieldCatalogue> = Lazy::new(|| {
    FieldCatalogue::new(
        DriverFamily::Inverter,
        vec![
            FieldDescriptor::numeric(
                "power",
                MESSAGE,
                "Test Power",
                "kW",
                DeviceClass::Power,
                StateClass::Measurement,
                3,
            ),
            FieldDescriptor::text("status", MESSAGE, "Test Status", EntityCategory::Diagnostic),
            FieldDescriptor::numeric(
                "phase_voltage",
                MESSAGE,
                "Test Phase voltage",
                "V",
                DeviceClass::Voltage,
                StateClass::Measurement,
                1,
            )
            .internal(),
        ],
    )
});

/// Driver whose slot table matches its catalogue
pub(crate) struct TestDriver {
    settings: DriverSettings,
    pub power: Option<Arc<NumericSensor>>,
    pub status: Option<Arc<TextSensor>>,
    pub phase_voltage: Option<Arc<NumericSensor>>,
    pub calls: Vec<&'static str>,
}

impl TestDriver {
    const SLOTS: &'static [Slot<Self>] = &[
        Slot {
            key: "power",
            setter_name: "set_power_sensor",
            setter: SetterSlot::Numeric(Self::set_power_sensor),
        },
        Slot {
            key: "status",
            setter_name: "set_status_text_sensor",
            setter: SetterSlot::Text(Self::set_status_text_sensor),
        },
        Slot {
            key: "phase_voltage",
            setter_name: "set_phase_voltage_sensor",
            setter: SetterSlot::Numeric(Self::set_phase_voltage_sensor),
        },
    ];

    fn set_power_sensor(&mut self, sensor: Arc<NumericSensor>) {
        self.calls.push("set_power_sensor");
        self.power = Some(sensor);
    }

    fn set_status_text_sensor(&mut self, sensor: Arc<TextSensor>) {
        self.calls.push("set_status_text_sensor");
        self.status = Some(sensor);
    }

    fn set_phase_voltage_sensor(&mut self, sensor: Arc<NumericSensor>) {
        self.calls.push("set_phase_voltage_sensor");
        self.phase_voltage = Some(sensor);
    }
}

impl Default for TestDriver {
    fn default() -> Self {
        Self::new(DriverSettings::new("test", "uart_bus"))
    }
}

impl Driver for TestDriver {
    fn family() -> DriverFamily {
        DriverFamily::Inverter
    }

    fn catalogue() -> &'static FieldCatalogue {
        &TEST_CATALOGUE
    }

    fn slots() -> &'static [Slot<Self>] {
        Self::SLOTS
    }

    fn new(settings: DriverSettings) -> Self {
        Self {
            settings,
            power: None,
            status: None,
            phase_voltage: None,
            calls: Vec::new(),
        }
    }

    fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    fn bound_sensors(&self) -> Vec<(&'static str, Option<SensorInstance>)> {
        vec![
            ("power", self.power.clone().map(SensorInstance::Numeric)),
            ("status", self.status.clone().map(SensorInstance::Text)),
            (
                "phase_voltage",
                self.phase_voltage.clone().map(SensorInstance::Numeric),
            ),
        ]
    }
}

/// Driver that lost its `status` slot and gained one the catalogue lacks
pub(crate) struct DriftedDriver {
    settings: DriverSettings,
}

impl DriftedDriver {
    const SLOTS: &'static [Slot<Self>] = &[
        Slot {
            key: "power",
            setter_name: "set_power_sensor",
            setter: SetterSlot::Numeric(Self::ignore_numeric),
        },
        Slot {
            key: "phase_voltage",
            setter_name: "set_phase_voltage_sensor",
            setter: SetterSlot::Numeric(Self::ignore_numeric),
        },
        Slot {
            key: "ip_address",
            setter_name: "set_ip_address_text_sensor",
            setter: SetterSlot::Text(Self::ignore_text),
        },
    ];

    fn ignore_numeric(&mut self, _sensor: Arc<NumericSensor>) {}

    fn ignore_text(&mut self, _sensor: Arc<TextSensor>) {}
}

impl Driver for DriftedDriver {
    fn family() -> DriverFamily {
        DriverFamily::Inverter
    }

    fn catalogue() -> &'static FieldCatalogue {
        &TEST_CATALOGUE
    }

    fn slots() -> &'static [Slot<Self>] {
        Self::SLOTS
    }

    fn new(settings: DriverSettings) -> Self {
        Self { settings }
    }

    fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    fn bound_sensors(&self) -> Vec<(&'static str, Option<SensorInstance>)> {
        Vec::new()
    }
}

pub(crate) fn numeric_sensor(key: &str, name: &str) -> SensorInstance {
    SensorInstance::Numeric(Arc::new(NumericSensor::new(
        SensorId::from_name(name),
        key,
        NumericMetadata {
            name: name.to_string(),
            entity_category: EntityCategory::None,
            internal: false,
            unit: "kW".to_string(),
            device_class: DeviceClass::Power,
            state_class: StateClass::Measurement,
            accuracy_decimals: 3,
        },
    )))
}

pub(crate) fn text_sensor(key: &str, name: &str) -> SensorInstance {
    SensorInstance::Text(Arc::new(TextSensor::new(
        SensorId::from_name(name),
        key,
        TextMetadata {
            name: name.to_string(),
            entity_category: EntityCategory::Diagnostic,
            internal: false,
        },
    )))
}
