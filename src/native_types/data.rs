/*!
 Representation of [`NSData`](https://developer.apple.com/documentation/foundation/nsdata) and `NSMutableData`.
*/

use std::fmt::{Display, Formatter, Result};

use crate::{
    error::archive::ArchiveError,
    hydrators::object::{ArchivedObject, HydrationAware, SelfHydrating},
    models::{Hydrated, Properties},
    native_types::flat::{unserialize_flat, FieldAssignment, FlatProperties},
};

/// A byte buffer that may be absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NSData {
    /// The native class this buffer was archived as
    native_class: String,
    data: Option<Vec<u8>>,
}

impl NSData {
    pub const NATIVE_CLASS: &'static str = "NSData";
    pub const MUTABLE_NATIVE_CLASS: &'static str = "NSMutableData";

    pub fn new(data: Option<Vec<u8>>) -> Self {
        Self {
            native_class: Self::NATIVE_CLASS.to_string(),
            data,
        }
    }

    /// The native class this buffer was archived as
    pub fn native_class(&self) -> &str {
        &self.native_class
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// The stored bytes, or an empty slice if there are none
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_deref().unwrap_or_default()
    }
}

impl Default for NSData {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Display for NSData {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        write!(fmt, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl FlatProperties for NSData {
    const NATIVE_CLASS: &'static str = NSData::NATIVE_CLASS;

    fn assign_flat(&mut self, field: &str, value: Hydrated) -> FieldAssignment {
        if field != "data" {
            return FieldAssignment::Missing;
        }
        self.data = match value {
            Hydrated::Data(bytes) => Some(bytes),
            Hydrated::String(text) => Some(text.into_bytes()),
            Hydrated::Null => None,
            _ => return FieldAssignment::Mismatch("data or null"),
        };
        FieldAssignment::Assigned
    }
}

impl HydrationAware for NSData {
    fn create_for_hydration(native_class: &str, _: Option<&[String]>) -> Self {
        Self {
            native_class: native_class.to_string(),
            data: None,
        }
    }
}

impl SelfHydrating for NSData {
    fn hydrate_from(&mut self, properties: Properties) -> std::result::Result<(), ArchiveError> {
        unserialize_flat(self, properties)
    }
}

impl ArchivedObject for NSData {
    fn as_self_hydrating(&mut self) -> Option<&mut dyn SelfHydrating> {
        Some(self)
    }
}
