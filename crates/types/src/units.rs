//! Units of measurement used by the built-in catalogues

pub const UNIT_AMPERE: &str = "A";
pub const UNIT_CELSIUS: &str = "°C";
pub const UNIT_DEGREES: &str = "°";
pub const UNIT_EMPTY: &str = "";
pub const UNIT_HERTZ: &str = "Hz";
pub const UNIT_HOUR: &str = "h";
pub const UNIT_KILOWATT: &str = "kW";
pub const UNIT_KILOWATT_HOURS: &str = "kWh";
pub const UNIT_VOLT: &str = "V";
