/*!
 Helpers to read raw property lists and pull typed values out of [`plist::Dictionary`] data.
*/

use std::io::Cursor;

use plist::{Dictionary, Value};

use crate::error::archive::{join_keys, ArchiveError};

/// Magic bytes at the start of every binary property list
const BINARY_MAGIC: &[u8] = b"bplist";

/// Encodings a property list can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlistFormat {
    /// Detect the encoding from the data
    #[default]
    Auto,
    /// Binary `bplist00` data
    Binary,
    /// XML data
    Xml,
}

/// Parse raw bytes into a [`Value`] tree
pub fn parse_plist(bytes: &[u8], format: PlistFormat) -> Result<Value, ArchiveError> {
    match format {
        PlistFormat::Auto => {
            Value::from_reader(Cursor::new(bytes)).map_err(ArchiveError::PlistParseError)
        }
        PlistFormat::Binary => {
            if !bytes.starts_with(BINARY_MAGIC) {
                return Err(ArchiveError::Malformed(
                    "expected a binary property list, but the bplist header is missing"
                        .to_string(),
                ));
            }
            Value::from_reader(Cursor::new(bytes)).map_err(ArchiveError::PlistParseError)
        }
        PlistFormat::Xml => Value::from_reader_xml(bytes).map_err(ArchiveError::PlistParseError),
    }
}

/// A short name for the type of a property list node, used in error messages
pub fn plist_type_name(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "array",
        Value::Dictionary(_) => "dictionary",
        Value::Boolean(_) => "boolean",
        Value::Data(_) => "data",
        Value::Date(_) => "date",
        Value::Real(_) => "real",
        Value::Integer(_) => "integer",
        Value::String(_) => "string",
        Value::Uid(_) => "uid",
        _ => "unknown",
    }
}

/// Get the value stored at `key`, listing the available keys if it is missing
pub fn extract_key<'a>(
    dictionary: &'a Dictionary,
    key: &str,
    container: &str,
) -> Result<&'a Value, ArchiveError> {
    dictionary.get(key).ok_or_else(|| {
        ArchiveError::KeyNotFound(format!(
            "{container} does not have a key named {key} (found: {})",
            join_keys(dictionary.keys())
        ))
    })
}

fn wrong_type(container: &str, key: &str, expected: &str, found: &Value) -> ArchiveError {
    ArchiveError::Malformed(format!(
        "{container}->{key} is expected to be {expected}, found {} instead",
        plist_type_name(found)
    ))
}

/// Extract a dictionary stored at `key`
pub fn extract_dictionary<'a>(
    dictionary: &'a Dictionary,
    key: &str,
    container: &str,
) -> Result<&'a Dictionary, ArchiveError> {
    let value = extract_key(dictionary, key, container)?;
    value
        .as_dictionary()
        .ok_or_else(|| wrong_type(container, key, "dictionary", value))
}

/// Extract an array stored at `key`
pub fn extract_array_key<'a>(
    dictionary: &'a Dictionary,
    key: &str,
    container: &str,
) -> Result<&'a Vec<Value>, ArchiveError> {
    let value = extract_key(dictionary, key, container)?;
    value
        .as_array()
        .ok_or_else(|| wrong_type(container, key, "array", value))
}

/// Extract a signed integer stored at `key`
pub fn extract_int_key(
    dictionary: &Dictionary,
    key: &str,
    container: &str,
) -> Result<i64, ArchiveError> {
    let value = extract_key(dictionary, key, container)?;
    value
        .as_signed_integer()
        .ok_or_else(|| wrong_type(container, key, "integer", value))
}

/// Extract a string stored at `key`
pub fn extract_string_key<'a>(
    dictionary: &'a Dictionary,
    key: &str,
    container: &str,
) -> Result<&'a str, ArchiveError> {
    let value = extract_key(dictionary, key, container)?;
    value
        .as_string()
        .ok_or_else(|| wrong_type(container, key, "string", value))
}
