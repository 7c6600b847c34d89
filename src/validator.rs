/*!
 Structural checks for the container that wraps every keyed archive.
*/

use plist::{Dictionary, Value};

use crate::{
    error::archive::ArchiveError,
    util::plist::{
        extract_array_key, extract_dictionary, extract_int_key, extract_string_key, plist_type_name,
    },
};

/// Archive format version written by `NSKeyedArchiver`
pub const ARCHIVE_VERSION: i64 = 100_000;
/// Name of the only supported archiver
pub const ARCHIVER: &str = "NSKeyedArchiver";

/// Name used for the root dictionary in error messages
const ROOT: &str = "Root dictionary";

/// Checks that a property list is a keyed archive before it is decoded
pub trait ArchiveValidator {
    fn validate_container(&self, plist: &Value) -> Result<(), ArchiveError>;
}

/// Accepts only archives written by `NSKeyedArchiver` in the current version
///
/// The root must be a dictionary with:
///   - `$version`: the integer `100000`
///   - `$archiver`: the string `NSKeyedArchiver`
///   - `$top`: a dictionary
///   - `$objects`: an array
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveFormatValidator;

impl ArchiveFormatValidator {
    fn validate_root_keys(root: &Dictionary) -> Result<(), ArchiveError> {
        let version = extract_int_key(root, "$version", ROOT)?;
        if version != ARCHIVE_VERSION {
            return Err(ArchiveError::Malformed(format!(
                "{ROOT}->$version is expected to contain integer{{{ARCHIVE_VERSION}}}, found integer{{{version}}} instead"
            )));
        }

        let archiver = extract_string_key(root, "$archiver", ROOT)?;
        if archiver != ARCHIVER {
            return Err(ArchiveError::Malformed(format!(
                "{ROOT}->$archiver is expected to contain string{{{ARCHIVER}}}, found string{{{archiver}}} instead"
            )));
        }

        extract_dictionary(root, "$top", ROOT)?;
        extract_array_key(root, "$objects", ROOT)?;
        Ok(())
    }
}

impl ArchiveValidator for ArchiveFormatValidator {
    fn validate_container(&self, plist: &Value) -> Result<(), ArchiveError> {
        match plist {
            Value::Dictionary(root) => Self::validate_root_keys(root),
            other => Err(ArchiveError::Malformed(format!(
                "Expected dictionary root element - got {}",
                plist_type_name(other)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use plist::{Dictionary, Value};

    use crate::{
        error::archive::ArchiveError,
        validator::{ArchiveFormatValidator, ArchiveValidator},
    };

    fn container() -> Dictionary {
        let mut root = Dictionary::new();
        root.insert("$version".to_string(), Value::from(100000));
        root.insert("$archiver".to_string(), Value::from("NSKeyedArchiver"));
        root.insert("$top".to_string(), Value::Dictionary(Dictionary::new()));
        root.insert("$objects".to_string(), Value::Array(vec![]));
        root
    }

    fn validate(root: Dictionary) -> Result<(), ArchiveError> {
        ArchiveFormatValidator.validate_container(&Value::Dictionary(root))
    }

    #[test]
    fn can_validate_container() {
        assert!(validate(container()).is_ok());
    }

    #[test]
    fn cant_validate_non_dictionary_root() {
        let error = ArchiveFormatValidator
            .validate_container(&Value::Array(vec![]))
            .unwrap_err();
        assert!(matches!(error, ArchiveError::Malformed(_)));
        assert!(error.to_string().contains("got array"));
    }

    #[test]
    fn cant_validate_missing_keys() {
        for key in ["$version", "$archiver", "$top", "$objects"] {
            let mut root = container();
            root.remove(key);
            let error = validate(root).unwrap_err();
            assert!(matches!(error, ArchiveError::KeyNotFound(_)), "{key}");
            assert!(error.to_string().contains(key));
        }
    }

    #[test]
    fn cant_validate_wrong_version() {
        let mut root = container();
        root.insert("$version".to_string(), Value::from(99999));
        let error = validate(root).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Malformed archive: Root dictionary->$version is expected to contain integer{100000}, found integer{99999} instead"
        );
    }

    #[test]
    fn cant_validate_text_version() {
        let mut root = container();
        root.insert("$version".to_string(), Value::from("100000"));
        let error = validate(root).unwrap_err();
        assert!(matches!(error, ArchiveError::Malformed(_)));
    }

    #[test]
    fn cant_validate_wrong_archiver() {
        let mut root = container();
        root.insert("$archiver".to_string(), Value::from("NSArchiver"));
        let error = validate(root).unwrap_err();
        assert!(matches!(error, ArchiveError::Malformed(_)));
        assert!(error.to_string().contains("NSArchiver"));
    }

    #[test]
    fn cant_validate_wrong_types() {
        let mut root = container();
        root.insert("$top".to_string(), Value::Array(vec![]));
        assert!(matches!(validate(root), Err(ArchiveError::Malformed(_))));

        let mut root = container();
        root.insert("$objects".to_string(), Value::Dictionary(Dictionary::new()));
        assert!(matches!(validate(root), Err(ArchiveError::Malformed(_))));
    }
}
