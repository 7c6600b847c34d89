/*!
 The flat property layout shared by simple Foundation types.

 Types such as `NSData`, `NSURL` and `NSUUID` store each field under a single key made of the
 [`FLAT_PREFIX`] followed by the field name, i.e. `NS.relative`.
*/

use crate::{
    error::archive::ArchiveError,
    models::{Hydrated, Properties},
};

/// Prefix every flat property key carries
pub const FLAT_PREFIX: &str = "NS.";

/// Outcome of assigning a single flat field
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FieldAssignment {
    Assigned,
    /// The type has no field with this name
    Missing,
    /// The value does not fit the field; holds the expected type
    Mismatch(&'static str),
}

/// Types hydrated from the flat property layout
pub(crate) trait FlatProperties {
    /// The native class name used in error messages
    const NATIVE_CLASS: &'static str;

    fn assign_flat(&mut self, field: &str, value: Hydrated) -> FieldAssignment;
}

/// Assign every `NS.<field>` entry of `properties` to the matching field of `target`
pub(crate) fn unserialize_flat<T: FlatProperties>(
    target: &mut T,
    properties: Properties,
) -> Result<(), ArchiveError> {
    let found_keys: Vec<String> = properties.keys().cloned().collect();

    for (key, value) in properties {
        let field = key
            .strip_prefix(FLAT_PREFIX)
            .filter(|field| !field.is_empty())
            .ok_or_else(|| {
                ArchiveError::Malformed(format!(
                    "Expected key starting with \"{FLAT_PREFIX}\" followed by a field name, got {key}"
                ))
            })?;

        let found = value.kind();
        match target.assign_flat(field, value) {
            FieldAssignment::Assigned => {}
            FieldAssignment::Missing => {
                return Err(ArchiveError::unexpected_key(
                    T::NATIVE_CLASS,
                    &key,
                    found_keys.iter(),
                ))
            }
            FieldAssignment::Mismatch(expected) => {
                return Err(ArchiveError::Malformed(format!(
                    "Data hydrated from {key} property is of invalid type - expected {expected} but got {found}"
                )))
            }
        }
    }

    Ok(())
}

/// Read an optional string field
pub(crate) fn optional_string(value: Hydrated) -> Result<Option<String>, &'static str> {
    match value {
        Hydrated::String(text) => Ok(Some(text)),
        Hydrated::Null => Ok(None),
        _ => Err("string or null"),
    }
}
