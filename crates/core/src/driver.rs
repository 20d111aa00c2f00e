//! Driver trait and the statically declared setter-slot table

use crate::error::{ConfigError, Result};
use crate::sensor::{NumericSensor, SensorInstance, TextSensor};
use omnik_sens_types::{DriverFamily, FieldCatalogue, FieldKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Settings every driver instance is created with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSettings {
    /// Unique id of the driver instance
    pub id: String,
    /// Id of the UART bus the driver reads frames from
    pub uart_id: String,
}

impl DriverSettings {
    pub fn new(id: impl Into<String>, uart_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uart_id: uart_id.into(),
        }
    }
}

/// Typed setter handle on a driver
pub enum SetterSlot<D> {
    Numeric(fn(&mut D, Arc<NumericSensor>)),
    Text(fn(&mut D, Arc<TextSensor>)),
}

impl<D> SetterSlot<D> {
    pub fn kind(&self) -> FieldKind {
        match self {
            SetterSlot::Numeric(_) => FieldKind::Numeric,
            SetterSlot::Text(_) => FieldKind::Text,
        }
    }
}

/// One entry of a driver's slot table
pub struct Slot<D> {
    /// Catalogue key served by this slot
    pub key: &'static str,
    /// Name of the setter method, e.g. `set_energy_today_sensor`
    pub setter_name: &'static str,
    pub setter: SetterSlot<D>,
}

impl<D> Slot<D> {
    pub fn kind(&self) -> FieldKind {
        self.setter.kind()
    }
}

/// Setter name a slot of the given key and kind is expected to carry
pub fn setter_name(key: &str, kind: FieldKind) -> String {
    match kind {
        FieldKind::Numeric => format!("set_{}_sensor", key),
        FieldKind::Text => format!("set_{}_text_sensor", key),
    }
}

/// A driver that sensors can be bound to
///
/// The driver itself (transport, frame decoding) lives outside this crate;
/// all the binding core needs is its catalogue and its slot table.
pub trait Driver: Sized + 'static {
    fn family() -> DriverFamily;

    /// Fields this driver family emits
    fn catalogue() -> &'static FieldCatalogue;

    /// One setter slot per catalogue field
    fn slots() -> &'static [Slot<Self>];

    /// Create an instance attached to its transport, with no sensors bound
    fn new(settings: DriverSettings) -> Self;

    fn settings(&self) -> &DriverSettings;

    /// Current content of every slot, in slot-table order
    fn bound_sensors(&self) -> Vec<(&'static str, Option<SensorInstance>)>;
}

/// Look up the slot serving a key
pub fn find_slot<D: Driver>(key: &str) -> Option<&'static Slot<D>> {
    D::slots().iter().find(|slot| slot.key == key)
}

/// Check that the catalogue and the slot table of `D` describe the same fields
///
/// Every catalogue key needs exactly one slot of the same kind and every slot
/// needs a catalogue key.
pub fn verify_contract<D: Driver>() -> Result<()> {
    let family = D::family();
    let catalogue = D::catalogue();

    if catalogue.family() != family {
        return Err(ConfigError::mismatch(
            family,
            "",
            format!("driver uses the {} catalogue", catalogue.family()),
        ));
    }
    if let Some(key) = catalogue.duplicate_keys().first() {
        return Err(ConfigError::mismatch(family, *key, "declared twice in the catalogue"));
    }

    let mut slot_keys = HashSet::with_capacity(D::slots().len());
    for slot in D::slots() {
        if !slot_keys.insert(slot.key) {
            return Err(ConfigError::mismatch(family, slot.key, "driver declares two slots"));
        }
        let Some(kind) = catalogue.kind_of(slot.key) else {
            return Err(ConfigError::mismatch(
                family,
                slot.key,
                format!("driver slot {} has no catalogue entry", slot.setter_name),
            ));
        };
        if kind != slot.kind() {
            return Err(ConfigError::mismatch(
                family,
                slot.key,
                format!(
                    "catalogue declares a {} field but slot {} takes a {} sensor",
                    kind,
                    slot.setter_name,
                    slot.kind()
                ),
            ));
        }
    }

    if let Some(key) = catalogue.keys().find(|key| !slot_keys.contains(key)) {
        return Err(ConfigError::mismatch(
            family,
            key,
            "catalogue field has no driver slot",
        ));
    }

    Ok(())
}
