/*!
 Representation of [`NSUUID`](https://developer.apple.com/documentation/foundation/nsuuid).
*/

use uuid::Uuid;

use crate::{
    error::archive::{join_keys, ArchiveError},
    hydrators::object::{ArchivedObject, SelfHydrating},
    models::{Hydrated, Properties},
    native_types::flat::{unserialize_flat, FieldAssignment, FlatProperties, FLAT_PREFIX},
};

/// The raw bytes of a universally unique identifier
///
/// The archive does not guarantee 16 bytes; [`NSUUID::as_uuid`] only succeeds when the length is right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NSUUID {
    pub uuid_bytes: Vec<u8>,
}

impl NSUUID {
    pub const NATIVE_CLASS: &'static str = "NSUUID";

    /// Interpret the stored bytes as a [`Uuid`]
    pub fn as_uuid(&self) -> Option<Uuid> {
        Uuid::from_slice(&self.uuid_bytes).ok()
    }
}

impl FlatProperties for NSUUID {
    const NATIVE_CLASS: &'static str = NSUUID::NATIVE_CLASS;

    fn assign_flat(&mut self, field: &str, value: Hydrated) -> FieldAssignment {
        if field != "uuidbytes" {
            return FieldAssignment::Missing;
        }
        match value {
            Hydrated::Data(bytes) => self.uuid_bytes = bytes,
            Hydrated::String(text) => self.uuid_bytes = text.into_bytes(),
            _ => return FieldAssignment::Mismatch("data"),
        }
        FieldAssignment::Assigned
    }
}

impl SelfHydrating for NSUUID {
    fn hydrate_from(&mut self, properties: Properties) -> Result<(), ArchiveError> {
        let key = format!("{FLAT_PREFIX}uuidbytes");
        if !properties.contains_key(&key) {
            return Err(ArchiveError::KeyNotFound(format!(
                "{} requires {key}, found keys: {}",
                Self::NATIVE_CLASS,
                join_keys(properties.keys())
            )));
        }
        unserialize_flat(self, properties)
    }
}

impl ArchivedObject for NSUUID {
    fn as_self_hydrating(&mut self) -> Option<&mut dyn SelfHydrating> {
        Some(self)
    }
}
