//! omnik-sens-core: Field normalization, sensor factory and driver binding.
//!
//! This crate turns catalogue declarations plus configuration overrides into
//! registered sensors bound to a driver's setter slots. The host's
//! observation registry is injected through [`SensorRegistry`].

mod dispatch;
mod driver;
mod dump;
mod error;
mod factory;
mod normalize;
mod pipeline;
mod registry;
mod sensor;
#[cfg(test)]
mod testing;

pub use dispatch::bind;
pub use driver::{
    find_slot, setter_name, verify_contract, Driver, DriverSettings, SetterSlot, Slot,
};
pub use dump::{describe, dump_config};
pub use error::{ConfigError, Result};
pub use factory::SensorFactory;
pub use normalize::{normalize, parse_override};
pub use pipeline::{configure, configure_typed};
pub use registry::{Registry, RegistryError, SensorRegistry};
pub use sensor::{NumericSensor, SensorId, SensorInstance, TextSensor};

// Re-export types used in trait signatures for convenience
pub use omnik_sens_types::{
    DriverFamily, FieldCatalogue, FieldDescriptor, FieldKind, FieldMetadata, MetadataOverride,
};
