//! Omnik Wi-Fi logger driver family

use omnik_sens_types::{DriverFamily, EntityCategory, FieldCatalogue, FieldDescriptor, MessageId};
use once_cell::sync::Lazy;

pub const MESSAGE_10_01: MessageId = MessageId::new(0x10, 0x01);
pub const MESSAGE_12_40: MessageId = MessageId::new(0x12, 0x40);
pub const MESSAGE_12_41: MessageId = MessageId::new(0x12, 0x41);

/// Fields of the logger family
pub static LOGGER_CATALOGUE: Lazy<FieldCatalogue> = Lazy::new(|| {
    FieldCatalogue::new(
        DriverFamily::Logger,
        vec![
            // The logger forwards the inverter's connection counter
            FieldDescriptor::text(
                "connection_number",
                MESSAGE_10_01,
                "Inverter Connection number",
                EntityCategory::Diagnostic,
            ),
            FieldDescriptor::text(
                "ip_address",
                MESSAGE_12_41,
                "Logger IP address",
                EntityCategory::Diagnostic,
            ),
            FieldDescriptor::text(
                "serial_device_number",
                MESSAGE_12_40,
                "Logger Serial device number",
                EntityCategory::Diagnostic,
            ),
        ],
    )
});

omnik_driver! {
    /// Binding target for an Omnik Wi-Fi logger on a UART bus
    pub struct OmnikLogger {
        family: DriverFamily::Logger,
        catalogue: LOGGER_CATALOGUE,
        slots: {
            text connection_number => set_connection_number_text_sensor,
            text ip_address => set_ip_address_text_sensor,
            text serial_device_number => set_serial_device_number_text_sensor,
        }
    }
}
