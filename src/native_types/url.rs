/*!
 Representation of [`NSURL`](https://developer.apple.com/documentation/foundation/nsurl).
*/

use crate::{
    error::archive::ArchiveError,
    hydrators::object::{ArchivedObject, SelfHydrating},
    models::{Hydrated, Properties},
    native_types::flat::{optional_string, unserialize_flat, FieldAssignment, FlatProperties},
};

/// A URL, optionally relative to a base URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NSURL {
    pub base: Option<String>,
    pub relative: Option<String>,
}

impl NSURL {
    pub const NATIVE_CLASS: &'static str = "NSURL";
}

impl FlatProperties for NSURL {
    const NATIVE_CLASS: &'static str = NSURL::NATIVE_CLASS;

    fn assign_flat(&mut self, field: &str, value: Hydrated) -> FieldAssignment {
        let slot = match field {
            "base" => &mut self.base,
            "relative" => &mut self.relative,
            _ => return FieldAssignment::Missing,
        };
        match optional_string(value) {
            Ok(text) => {
                *slot = text;
                FieldAssignment::Assigned
            }
            Err(expected) => FieldAssignment::Mismatch(expected),
        }
    }
}

impl SelfHydrating for NSURL {
    fn hydrate_from(&mut self, properties: Properties) -> Result<(), ArchiveError> {
        unserialize_flat(self, properties)
    }
}

impl ArchivedObject for NSURL {
    fn as_self_hydrating(&mut self) -> Option<&mut dyn SelfHydrating> {
        Some(self)
    }
}
