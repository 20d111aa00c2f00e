//! omnik-sens-types: Shared data types for omnik-sens.
//!
//! Pure data: field kinds, descriptive metadata, catalogues and partial
//! overrides. Nothing here knows about sensors, registries or drivers.

pub mod catalogue;
pub mod field;
pub mod overrides;
pub mod units;

pub use catalogue::{DriverFamily, FieldCatalogue};
pub use field::{
    DeviceClass, EntityCategory, FieldDescriptor, FieldKind, FieldMetadata, MessageId,
    NumericMetadata, StateClass, TextMetadata,
};
pub use overrides::{MetadataOverride, COMMON_ATTRIBUTES, NUMERIC_ATTRIBUTES};
