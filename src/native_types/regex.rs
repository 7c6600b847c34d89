/*!
 Representation of [`NSRegularExpression`](https://developer.apple.com/documentation/foundation/nsregularexpression).
*/

use crate::{
    error::archive::{join_keys, ArchiveError},
    hydrators::object::{ArchivedObject, SelfHydrating},
    models::{Hydrated, Properties},
};

const PATTERN_KEY: &str = "NSPattern";
const OPTIONS_KEY: &str = "NSOptions";

/// A regular expression pattern and its option flags
///
/// The pattern is kept as text; compiling it is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NSRegularExpression {
    pub pattern: Option<String>,
    /// Bit flags from [`NSRegularExpression.Options`](https://developer.apple.com/documentation/foundation/nsregularexpression/options)
    pub options: i64,
}

impl NSRegularExpression {
    pub const NATIVE_CLASS: &'static str = "NSRegularExpression";
}

impl SelfHydrating for NSRegularExpression {
    fn hydrate_from(&mut self, mut properties: Properties) -> Result<(), ArchiveError> {
        let found_keys = join_keys(properties.keys());
        let (pattern, options) = match (
            properties.len(),
            properties.remove(PATTERN_KEY),
            properties.remove(OPTIONS_KEY),
        ) {
            (2, Some(pattern), Some(options)) => (pattern, options),
            _ => {
                return Err(ArchiveError::Malformed(format!(
                    "Expected serialized data with {PATTERN_KEY} and {OPTIONS_KEY} keys only, got keys: {found_keys}"
                )))
            }
        };

        let pattern = match pattern {
            Hydrated::String(text) => Some(text),
            Hydrated::Null => None,
            other => {
                return Err(ArchiveError::Malformed(format!(
                    "Expected {PATTERN_KEY} to be a string or null, got {}",
                    other.kind()
                )))
            }
        };
        let options = options.as_i64().ok_or_else(|| {
            ArchiveError::Malformed(format!(
                "Expected {OPTIONS_KEY} to be an integer, got {}",
                options.kind()
            ))
        })?;

        self.pattern = pattern;
        self.options = options;
        Ok(())
    }
}

impl ArchivedObject for NSRegularExpression {
    fn as_self_hydrating(&mut self) -> Option<&mut dyn SelfHydrating> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::archive::ArchiveError,
        hydrators::object::SelfHydrating,
        models::{Hydrated, Properties},
        native_types::regex::NSRegularExpression,
    };

    fn payload(pattern: Hydrated, options: Hydrated) -> Properties {
        Properties::from([
            ("NSPattern".to_string(), pattern),
            ("NSOptions".to_string(), options),
        ])
    }

    #[test]
    fn can_hydrate_pattern() {
        let mut regex = NSRegularExpression::default();
        regex
            .hydrate_from(payload(Hydrated::from("^a+$"), Hydrated::from(1_i64)))
            .unwrap();
        assert_eq!(regex.pattern.as_deref(), Some("^a+$"));
        assert_eq!(regex.options, 1);
    }

    #[test]
    fn can_hydrate_null_pattern() {
        let mut regex = NSRegularExpression::default();
        regex
            .hydrate_from(payload(Hydrated::Null, Hydrated::from(0_i64)))
            .unwrap();
        assert!(regex.pattern.is_none());
    }

    #[test]
    fn cant_hydrate_missing_options() {
        let mut regex = NSRegularExpression::default();
        let error = regex
            .hydrate_from(Properties::from([(
                "NSPattern".to_string(),
                Hydrated::from("a"),
            )]))
            .unwrap_err();
        assert!(matches!(error, ArchiveError::Malformed(_)));
        assert!(error.to_string().contains("got keys: NSPattern"));
    }

    #[test]
    fn cant_hydrate_extra_keys() {
        let mut regex = NSRegularExpression::default();
        let mut properties = payload(Hydrated::from("a"), Hydrated::from(0_i64));
        properties.insert("NSFlags".to_string(), Hydrated::Null);
        let error = regex.hydrate_from(properties).unwrap_err();
        assert!(matches!(error, ArchiveError::Malformed(_)));
    }

    #[test]
    fn cant_hydrate_numeric_pattern() {
        let mut regex = NSRegularExpression::default();
        let error = regex
            .hydrate_from(payload(Hydrated::from(5_i64), Hydrated::from(0_i64)))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Malformed archive: Expected NSPattern to be a string or null, got integer"
        );
    }

    #[test]
    fn cant_hydrate_text_options() {
        let mut regex = NSRegularExpression::default();
        let error = regex
            .hydrate_from(payload(Hydrated::from("a"), Hydrated::from("1")))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Malformed archive: Expected NSOptions to be an integer, got string"
        );
        assert!(regex.pattern.is_none());
    }
}
