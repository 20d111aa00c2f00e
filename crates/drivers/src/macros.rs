//! Declarative driver definitions
//!
//! `omnik_driver!` generates a driver struct with one sensor slot per field,
//! a `set_<key>_sensor` / `set_<key>_text_sensor` setter and getter for each
//! slot, the static slot table, and the `Driver` implementation. Setter names
//! are spelled out at the call site so the table can be checked against the
//! catalogue instead of being derived by string formatting.

macro_rules! omnik_driver {
    (@sensor numeric) => { $crate::NumericSensor };
    (@sensor text) => { $crate::TextSensor };
    (@setter numeric, $setter:expr) => { $crate::SetterSlot::Numeric($setter) };
    (@setter text, $setter:expr) => { $crate::SetterSlot::Text($setter) };
    (@instance numeric) => { $crate::SensorInstance::Numeric };
    (@instance text) => { $crate::SensorInstance::Text };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            family: $family:expr,
            catalogue: $catalogue:expr,
            slots: {
                $( $kind:ident $key:ident => $setter:ident ),* $(,)?
            }
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            settings: $crate::DriverSettings,
            $( $key: Option<std::sync::Arc<omnik_driver!(@sensor $kind)>>, )*
        }

        impl $name {
            const SLOTS: &'static [$crate::Slot<Self>] = &[
                $(
                    $crate::Slot {
                        key: stringify!($key),
                        setter_name: stringify!($setter),
                        setter: omnik_driver!(@setter $kind, Self::$setter),
                    },
                )*
            ];

            $(
                pub fn $setter(&mut self, sensor: std::sync::Arc<omnik_driver!(@sensor $kind)>) {
                    self.$key = Some(sensor);
                }

                pub fn $key(&self) -> Option<&std::sync::Arc<omnik_driver!(@sensor $kind)>> {
                    self.$key.as_ref()
                }
            )*
        }

        impl $crate::Driver for $name {
            fn family() -> $crate::DriverFamily {
                $family
            }

            fn catalogue() -> &'static $crate::FieldCatalogue {
                &$catalogue
            }

            fn slots() -> &'static [$crate::Slot<Self>] {
                Self::SLOTS
            }

            fn new(settings: $crate::DriverSettings) -> Self {
                Self {
                    settings,
                    $( $key: None, )*
                }
            }

            fn settings(&self) -> &$crate::DriverSettings {
                &self.settings
            }

            fn bound_sensors(&self) -> Vec<(&'static str, Option<$crate::SensorInstance>)> {
                vec![
                    $( (stringify!($key), self.$key.clone().map(omnik_driver!(@instance $kind))), )*
                ]
            }
        }
    };
}
