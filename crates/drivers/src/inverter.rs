//! Omnik inverter driver family
//!
//! Fields decoded from the inverter's own messages: identification strings,
//! per-string PV readings, per-phase grid readings, energy counters and
//! fault values. Secondary PV strings and phases S/T are hidden by default
//! since most installations are single-string, single-phase.

use omnik_sens_types::units::{
    UNIT_AMPERE, UNIT_CELSIUS, UNIT_DEGREES, UNIT_EMPTY, UNIT_HERTZ, UNIT_HOUR, UNIT_KILOWATT,
    UNIT_KILOWATT_HOURS, UNIT_VOLT,
};
use omnik_sens_types::{
    DeviceClass, DriverFamily, EntityCategory, FieldCatalogue, FieldDescriptor, MessageId,
    StateClass,
};
use once_cell::sync::Lazy;

pub const MESSAGE_10_80: MessageId = MessageId::new(0x10, 0x80);
pub const MESSAGE_10_81: MessageId = MessageId::new(0x10, 0x81);
pub const MESSAGE_10_84: MessageId = MessageId::new(0x10, 0x84);
pub const MESSAGE_11_83: MessageId = MessageId::new(0x11, 0x83);
pub const MESSAGE_11_90: MessageId = MessageId::new(0x11, 0x90);
pub const MESSAGE_11_C3: MessageId = MessageId::new(0x11, 0xC3);
pub const MESSAGE_12_C0: MessageId = MessageId::new(0x12, 0xC0);
pub const MESSAGE_12_C1: MessageId = MessageId::new(0x12, 0xC1);

fn diagnostic(key: &str, message: MessageId, name: &str) -> FieldDescriptor {
    FieldDescriptor::text(key, message, name, EntityCategory::Diagnostic)
}

fn measurement(
    key: &str,
    name: &str,
    unit: &str,
    device_class: DeviceClass,
    accuracy_decimals: u8,
) -> FieldDescriptor {
    FieldDescriptor::numeric(
        key,
        MESSAGE_11_90,
        name,
        unit,
        device_class,
        StateClass::Measurement,
        accuracy_decimals,
    )
}

/// Fields of the inverter family, in message order
pub static INVERTER_CATALOGUE: Lazy<FieldCatalogue> = Lazy::new(|| {
    use DeviceClass::{Current, Empty, Energy, Frequency, Power, Temperature, Voltage};

    FieldCatalogue::new(
        DriverFamily::Inverter,
        vec![
            diagnostic("serial_device_number", MESSAGE_10_80, "Inverter Serial device number"),
            diagnostic("status_10_81", MESSAGE_10_81, "Inverter Status 0x10/0x81"),
            diagnostic("status_10_84", MESSAGE_10_84, "Inverter Status 0x10/0x84"),
            diagnostic("nr_of_phases", MESSAGE_11_83, "Inverter Number of phases"),
            diagnostic("rated_power", MESSAGE_11_83, "Inverter Rated power"),
            diagnostic("country", MESSAGE_11_83, "Inverter Country"),
            diagnostic("firmware_version_main", MESSAGE_11_83, "Inverter Firmware version (main)"),
            diagnostic(
                "firmware_version_slave",
                MESSAGE_11_83,
                "Inverter Firmware version (slave)",
            ),
            diagnostic("inverter_model", MESSAGE_11_83, "Inverter Model"),
            diagnostic("brand", MESSAGE_11_83, "Inverter Brand"),
            diagnostic(
                "message_11_83_bytes_60_77",
                MESSAGE_11_83,
                "Inverter Message 0x11/0x83 bytes 60-77",
            ),
            measurement("temperature", "Inverter Temperature", UNIT_CELSIUS, Temperature, 1),
            measurement("pv1_voltage", "Inverter PV1 voltage", UNIT_VOLT, Voltage, 1),
            measurement("pv2_voltage", "Inverter PV2 voltage", UNIT_VOLT, Voltage, 1).internal(),
            measurement("pv3_voltage", "Inverter PV3 voltage", UNIT_VOLT, Voltage, 1).internal(),
            measurement("pv1_current", "Inverter PV1 current", UNIT_AMPERE, Current, 1),
            measurement("pv2_current", "Inverter PV2 current", UNIT_AMPERE, Current, 1).internal(),
            measurement("pv3_current", "Inverter PV3 current", UNIT_AMPERE, Current, 1).internal(),
            measurement("r_current", "Inverter R current", UNIT_AMPERE, Current, 1),
            measurement("s_current", "Inverter S current", UNIT_AMPERE, Current, 1).internal(),
            measurement("t_current", "Inverter T current", UNIT_AMPERE, Current, 1).internal(),
            measurement("r_voltage", "Inverter R voltage", UNIT_VOLT, Voltage, 1),
            measurement("s_voltage", "Inverter S voltage", UNIT_VOLT, Voltage, 1).internal(),
            measurement("t_voltage", "Inverter T voltage", UNIT_VOLT, Voltage, 1).internal(),
            measurement("r_frequency", "Inverter R frequency", UNIT_HERTZ, Frequency, 2),
            measurement("r_power", "Inverter R power", UNIT_KILOWATT, Power, 3),
            measurement("s_frequency", "Inverter S frequency", UNIT_HERTZ, Frequency, 2).internal(),
            measurement("s_power", "Inverter S power", UNIT_KILOWATT, Power, 3).internal(),
            measurement("t_frequency", "Inverter T frequency", UNIT_HERTZ, Frequency, 2).internal(),
            measurement("t_power", "Inverter T power", UNIT_KILOWATT, Power, 3).internal(),
            FieldDescriptor::numeric(
                "energy_today",
                MESSAGE_11_90,
                "Inverter Energy today",
                UNIT_KILOWATT_HOURS,
                Energy,
                StateClass::TotalIncreasing,
                2,
            ),
            FieldDescriptor::numeric(
                "energy_total",
                MESSAGE_11_90,
                "Inverter Energy total",
                UNIT_KILOWATT_HOURS,
                Energy,
                StateClass::Total,
                1,
            ),
            FieldDescriptor::numeric(
                "hours_total",
                MESSAGE_11_90,
                "Inverter Hours total",
                UNIT_HOUR,
                Empty,
                StateClass::Total,
                0,
            ),
            diagnostic("run_state", MESSAGE_11_90, "Inverter Run state"),
            measurement(
                "grid_voltage_fault_value",
                "Inverter Grid voltage fault",
                UNIT_VOLT,
                Voltage,
                1,
            ),
            // "frequence" is the name existing installations already use
            measurement(
                "grid_frequency_fault_value",
                "Inverter Grid frequence fault",
                UNIT_HERTZ,
                Frequency,
                2,
            ),
            measurement(
                "grid_impedance_fault_value",
                "Inverter Grid impedance fault",
                UNIT_DEGREES,
                Empty,
                3,
            ),
            measurement(
                "temperature_fault",
                "Inverter Temperature fault",
                UNIT_CELSIUS,
                Temperature,
                1,
            ),
            measurement("pv_voltage_fault", "Inverter PV voltage fault", UNIT_VOLT, Voltage, 1),
            measurement(
                "gfci_current_fault",
                "Inverter GFCI current fault",
                UNIT_AMPERE,
                Current,
                3,
            ),
            diagnostic("error_message_binary_index", MESSAGE_11_90, "Inverter Error index"),
            FieldDescriptor::numeric(
                "nr_of_alarms",
                MESSAGE_11_C3,
                "Inverter Number of alarms",
                UNIT_EMPTY,
                Empty,
                StateClass::Measurement,
                0,
            )
            .category(EntityCategory::Diagnostic),
            diagnostic("status_12_c0", MESSAGE_12_C0, "Inverter Status 0x12/0xC0"),
            diagnostic("status_12_c1", MESSAGE_12_C1, "Inverter Status 0x12/0xC1"),
        ],
    )
});

omnik_driver! {
    /// Binding target for an Omnik inverter on a UART bus
    pub struct OmnikInverter {
        family: DriverFamily::Inverter,
        catalogue: INVERTER_CATALOGUE,
        slots: {
            text serial_device_number => set_serial_device_number_text_sensor,
            text status_10_81 => set_status_10_81_text_sensor,
            text status_10_84 => set_status_10_84_text_sensor,
            text nr_of_phases => set_nr_of_phases_text_sensor,
            text rated_power => set_rated_power_text_sensor,
            text country => set_country_text_sensor,
            text firmware_version_main => set_firmware_version_main_text_sensor,
            text firmware_version_slave => set_firmware_version_slave_text_sensor,
            text inverter_model => set_inverter_model_text_sensor,
            text brand => set_brand_text_sensor,
            text message_11_83_bytes_60_77 => set_message_11_83_bytes_60_77_text_sensor,
            numeric temperature => set_temperature_sensor,
            numeric pv1_voltage => set_pv1_voltage_sensor,
            numeric pv2_voltage => set_pv2_voltage_sensor,
            numeric pv3_voltage => set_pv3_voltage_sensor,
            numeric pv1_current => set_pv1_current_sensor,
            numeric pv2_current => set_pv2_current_sensor,
            numeric pv3_current => set_pv3_current_sensor,
            numeric r_current => set_r_current_sensor,
            numeric s_current => set_s_current_sensor,
            numeric t_current => set_t_current_sensor,
            numeric r_voltage => set_r_voltage_sensor,
            numeric s_voltage => set_s_voltage_sensor,
            numeric t_voltage => set_t_voltage_sensor,
            numeric r_frequency => set_r_frequency_sensor,
            numeric r_power => set_r_power_sensor,
            numeric s_frequency => set_s_frequency_sensor,
            numeric s_power => set_s_power_sensor,
            numeric t_frequency => set_t_frequency_sensor,
            numeric t_power => set_t_power_sensor,
            numeric energy_today => set_energy_today_sensor,
            numeric energy_total => set_energy_total_sensor,
            numeric hours_total => set_hours_total_sensor,
            text run_state => set_run_state_text_sensor,
            numeric grid_voltage_fault_value => set_grid_voltage_fault_value_sensor,
            numeric grid_frequency_fault_value => set_grid_frequency_fault_value_sensor,
            numeric grid_impedance_fault_value => set_grid_impedance_fault_value_sensor,
            numeric temperature_fault => set_temperature_fault_sensor,
            numeric pv_voltage_fault => set_pv_voltage_fault_sensor,
            numeric gfci_current_fault => set_gfci_current_fault_sensor,
            text error_message_binary_index => set_error_message_binary_index_text_sensor,
            numeric nr_of_alarms => set_nr_of_alarms_sensor,
            text status_12_c0 => set_status_12_c0_text_sensor,
            text status_12_c1 => set_status_12_c1_text_sensor,
        }
    }
}
