/*!
 Errors that can happen when unarchiving `NSKeyedArchiver` data.
*/

use std::{
    error,
    fmt::{Display, Formatter, Result},
};

use crate::models::Hydrated;

/// Errors that can happen when unarchiving `NSKeyedArchiver` data
#[derive(Debug)]
pub enum ArchiveError {
    /// A required structural key is absent
    KeyNotFound(String),
    /// Data is present but has the wrong shape, type or value
    Malformed(String),
    /// Malformed data, detected because a lower level operation failed
    MalformedCause(String, Box<ArchiveError>),
    /// The `$class` metadata of an archived object is invalid
    Hydration(String),
    /// A reference points outside of the object table
    DanglingReference(u64),
    /// An object references itself before it finished decoding
    CircularReference(usize),
    /// The archive is nested deeper than the configured limit
    DepthExceeded(usize),
    /// The API was used in a way the target does not allow
    InvalidArgument(String),
    /// A value was registered twice
    Overflow(String),
    /// A hydrator cannot map a property onto its target
    Domain(String),
    /// The unarchiver is misconfigured
    Logic(String),
    /// A target type cannot be resolved
    Runtime(String),
    /// The archive file could not be read
    CannotRead(std::io::Error),
    /// The property list itself could not be parsed
    PlistParseError(plist::Error),
}

impl ArchiveError {
    /// Builds a [`ArchiveError::Hydration`] for broken object metadata
    pub(crate) fn malformed_reference(reason: impl Display) -> Self {
        ArchiveError::Hydration(format!("Object reference is invalid: {reason}"))
    }

    /// Builds a [`ArchiveError::KeyNotFound`] for a payload that must carry exactly one key
    pub(crate) fn single_key<'a>(expected: &str, found: impl Iterator<Item = &'a String>) -> Self {
        ArchiveError::KeyNotFound(format!(
            "Expected serialized data to contain only {expected}, found keys: {}",
            join_keys(found)
        ))
    }

    /// Builds a [`ArchiveError::KeyNotFound`] for a key the target object does not declare
    pub(crate) fn unexpected_key<'a>(
        native_class: &str,
        key: &str,
        found: impl Iterator<Item = &'a String>,
    ) -> Self {
        ArchiveError::KeyNotFound(format!(
            "Serialized data for {native_class} was not expected to contain key {key}, found keys: {}",
            join_keys(found)
        ))
    }

    /// Builds a [`ArchiveError::Malformed`] for a value that does not fit the field it targets
    pub fn field_mismatch(field: &str, expected: &str, found: &Hydrated) -> Self {
        ArchiveError::Malformed(format!(
            "Data hydrated from {field} property is of invalid type - expected {expected} but got {}",
            found.kind()
        ))
    }

    /// Whether this error means the archive itself is broken, as opposed to a misuse of the API
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ArchiveError::KeyNotFound(_)
                | ArchiveError::Malformed(_)
                | ArchiveError::MalformedCause(_, _)
                | ArchiveError::Hydration(_)
                | ArchiveError::CircularReference(_)
        )
    }
}

/// Render a list of keys for an error message
pub(crate) fn join_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    keys.map(String::as_str).collect::<Vec<&str>>().join(", ")
}

impl Display for ArchiveError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            ArchiveError::KeyNotFound(why) => write!(fmt, "{why}"),
            ArchiveError::Malformed(why) => write!(fmt, "Malformed archive: {why}"),
            ArchiveError::MalformedCause(why, cause) => {
                write!(fmt, "Malformed archive: {why} ({cause})")
            }
            ArchiveError::Hydration(why) => write!(fmt, "{why}"),
            ArchiveError::DanglingReference(idx) => {
                write!(fmt, "References pointing to object at index {idx} is invalid")
            }
            ArchiveError::CircularReference(idx) => write!(
                fmt,
                "Object at index {idx} references itself before it was fully decoded"
            ),
            ArchiveError::DepthExceeded(limit) => {
                write!(fmt, "Archive is nested deeper than the limit of {limit}")
            }
            ArchiveError::InvalidArgument(why) => write!(fmt, "{why}"),
            ArchiveError::Overflow(why) => write!(fmt, "{why}"),
            ArchiveError::Domain(why) => write!(fmt, "{why}"),
            ArchiveError::Logic(why) => write!(fmt, "{why}"),
            ArchiveError::Runtime(why) => write!(fmt, "{why}"),
            ArchiveError::CannotRead(why) => write!(fmt, "Failed to read archive: {why}"),
            ArchiveError::PlistParseError(why) => {
                write!(fmt, "Failed to parse property list: {why}")
            }
        }
    }
}

impl error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ArchiveError::MalformedCause(_, cause) => Some(cause.as_ref()),
            ArchiveError::CannotRead(why) => Some(why),
            ArchiveError::PlistParseError(why) => Some(why),
            _ => None,
        }
    }
}
