//! Ordered, read-only field catalogues, one per driver family

use crate::field::{FieldDescriptor, FieldKind, MessageId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Group of drivers sharing a catalogue and setter slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverFamily {
    Inverter,
    Logger,
}

impl DriverFamily {
    pub const ALL: [DriverFamily; 2] = [DriverFamily::Inverter, DriverFamily::Logger];

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverFamily::Inverter => "inverter",
            DriverFamily::Logger => "logger",
        }
    }
}

impl fmt::Display for DriverFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inverter" => Ok(DriverFamily::Inverter),
            "logger" => Ok(DriverFamily::Logger),
            other => Err(format!(
                "Unknown driver family: {} (expected inverter or logger)",
                other
            )),
        }
    }
}

/// Ordered set of field declarations for one driver family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldCatalogue {
    family: DriverFamily,
    fields: Vec<FieldDescriptor>,
}

impl FieldCatalogue {
    pub fn new(family: DriverFamily, fields: Vec<FieldDescriptor>) -> Self {
        Self { family, fields }
    }

    pub fn family(&self) -> DriverFamily {
        self.family
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn kind_of(&self, key: &str) -> Option<FieldKind> {
        self.get(key).map(FieldDescriptor::kind)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields fed by the given message, in catalogue order
    pub fn fields_for_message(&self, message: MessageId) -> Vec<&FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| field.message == message)
            .collect()
    }

    /// Keys declared more than once (a malformed catalogue)
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        self.fields
            .iter()
            .map(|field| field.key.as_str())
            .filter(|key| !seen.insert(*key))
            .collect()
    }
}
