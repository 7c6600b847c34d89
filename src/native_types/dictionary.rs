/*!
 Representation of [`NSDictionary`](https://developer.apple.com/documentation/foundation/nsdictionary) and `NSMutableDictionary`.
*/

use std::collections::btree_map::Iter;

use crate::{
    error::archive::{join_keys, ArchiveError},
    hydrators::object::{ArchivedObject, HydrationAware, SelfHydrating},
    models::{Hydrated, Properties},
    native_types::take_array,
};

/// Key holding the archived dictionary keys
const KEYS_KEY: &str = "NS.keys";
/// Key holding the archived dictionary values, in the same order as the keys
const OBJECTS_KEY: &str = "NS.objects";

/// A string-keyed mapping
#[derive(Debug, Clone, PartialEq)]
pub struct NSDictionary {
    /// The native class this dictionary was archived as
    native_class: String,
    items: Properties,
}

impl NSDictionary {
    pub const NATIVE_CLASS: &'static str = "NSDictionary";
    pub const MUTABLE_NATIVE_CLASS: &'static str = "NSMutableDictionary";

    pub fn new() -> Self {
        Self::default()
    }

    /// The native class this dictionary was archived as
    pub fn native_class(&self) -> &str {
        &self.native_class
    }

    /// Whether the archived dictionary was an `NSMutableDictionary`
    pub fn is_mutable(&self) -> bool {
        self.native_class == Self::MUTABLE_NATIVE_CLASS
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Hydrated> {
        self.items.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn iter(&self) -> Iter<'_, String, Hydrated> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.items.keys()
    }

    pub fn into_properties(self) -> Properties {
        self.items
    }

    /// Store a value under a string key, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Hydrated) -> Option<Hydrated> {
        self.items.insert(key.into(), value)
    }

    /// Store a value under a decoded key, which must be a string
    pub fn set(&mut self, key: Hydrated, value: Hydrated) -> Result<(), ArchiveError> {
        match key {
            Hydrated::String(key) => {
                self.items.insert(key, value);
                Ok(())
            }
            other => Err(invalid_key_type(&other)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Hydrated> {
        self.items.remove(key)
    }
}

fn invalid_key_type(key: &Hydrated) -> ArchiveError {
    ArchiveError::InvalidArgument(format!(
        "Dictionaries allow only string keys - found {}",
        key.kind()
    ))
}

impl Default for NSDictionary {
    fn default() -> Self {
        Self {
            native_class: Self::NATIVE_CLASS.to_string(),
            items: Properties::new(),
        }
    }
}

impl<'a> IntoIterator for &'a NSDictionary {
    type Item = (&'a String, &'a Hydrated);
    type IntoIter = Iter<'a, String, Hydrated>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl HydrationAware for NSDictionary {
    fn create_for_hydration(native_class: &str, _: Option<&[String]>) -> Self {
        Self {
            native_class: native_class.to_string(),
            items: Properties::new(),
        }
    }
}

impl SelfHydrating for NSDictionary {
    fn hydrate_from(&mut self, mut properties: Properties) -> Result<(), ArchiveError> {
        let found_keys = join_keys(properties.keys());
        let (keys, objects) = match (
            properties.len(),
            properties.remove(KEYS_KEY),
            properties.remove(OBJECTS_KEY),
        ) {
            (2, Some(keys), Some(objects)) => (keys, objects),
            _ => {
                return Err(ArchiveError::KeyNotFound(format!(
                    "Dehydrated data is expected to contain only {KEYS_KEY} and {OBJECTS_KEY}, found keys: {found_keys}"
                )))
            }
        };

        let keys = take_array(keys, KEYS_KEY, &self.native_class)?;
        let objects = take_array(objects, OBJECTS_KEY, &self.native_class)?;

        if keys.len() != objects.len() {
            return Err(ArchiveError::Malformed(format!(
                "The number of {KEYS_KEY} and {OBJECTS_KEY} isn't equal ({} != {})",
                keys.len(),
                objects.len()
            )));
        }

        let mut items = Properties::new();
        for (key, value) in keys.into_iter().zip(objects) {
            match key {
                Hydrated::String(key) => {
                    items.insert(key, value);
                }
                other => return Err(invalid_key_type(&other)),
            }
        }
        self.items = items;

        Ok(())
    }
}

impl ArchivedObject for NSDictionary {
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
        native_types::dictionary::NSDictionary,
    };

    fn payload(keys: Vec<Hydrated>, objects: Vec<Hydrated>) -> Properties {
        Properties::from([
            ("NS.keys".to_string(), Hydrated::array(keys)),
            ("NS.objects".to_string(), Hydrated::array(objects)),
        ])
    }

    #[test]
    fn can_hydrate_pairs() {
        let mut dictionary = NSDictionary::new();
        dictionary
            .hydrate_from(payload(
                vec![Hydrated::from("one"), Hydrated::from("two")],
                vec![Hydrated::from(1_i64), Hydrated::from("2")],
            ))
            .unwrap();

        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.get("one"), Some(&Hydrated::from(1_i64)));
        assert_eq!(dictionary.get("two"), Some(&Hydrated::from("2")));
    }

    #[test]
    fn can_hydrate_empty() {
        let mut dictionary = NSDictionary::new();
        dictionary.hydrate_from(payload(vec![], vec![])).unwrap();
        assert!(dictionary.is_empty());
    }

    #[test]
    fn cant_hydrate_uneven_lengths() {
        let mut dictionary = NSDictionary::new();
        let error = dictionary
            .hydrate_from(payload(vec![Hydrated::from("one")], vec![]))
            .unwrap_err();
        assert!(matches!(error, ArchiveError::Malformed(_)));
        assert!(error.to_string().contains("(1 != 0)"));
    }

    #[test]
    fn cant_hydrate_non_string_keys() {
        let mut dictionary = NSDictionary::new();
        let error = dictionary
            .hydrate_from(payload(vec![Hydrated::from(1_i64)], vec![Hydrated::from("x")]))
            .unwrap_err();
        assert!(matches!(error, ArchiveError::InvalidArgument(_)));
    }

    #[test]
    fn cant_hydrate_missing_keys() {
        let mut dictionary = NSDictionary::new();
        let properties = Properties::from([("NS.objects".to_string(), Hydrated::array(vec![]))]);
        let error = dictionary.hydrate_from(properties).unwrap_err();
        assert!(matches!(error, ArchiveError::KeyNotFound(_)));
        assert!(error.to_string().ends_with("found keys: NS.objects"));
    }

    #[test]
    fn cant_hydrate_non_list_keys() {
        let mut dictionary = NSDictionary::new();
        let properties = Properties::from([
            ("NS.keys".to_string(), Hydrated::from("one")),
            ("NS.objects".to_string(), Hydrated::array(vec![])),
        ]);
        let error = dictionary.hydrate_from(properties).unwrap_err();
        assert!(matches!(error, ArchiveError::Malformed(_)));
    }

    #[test]
    fn can_set_string_keys_only() {
        let mut dictionary = NSDictionary::new();
        dictionary
            .set(Hydrated::from("key"), Hydrated::from("value"))
            .unwrap();
        assert_eq!(dictionary.get("key"), Some(&Hydrated::from("value")));

        let error = dictionary
            .set(Hydrated::from(3_i64), Hydrated::from("value"))
            .unwrap_err();
        assert!(matches!(error, ArchiveError::InvalidArgument(_)));
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn can_replace_values() {
        let mut dictionary = NSDictionary::new();
        dictionary.insert("key", Hydrated::from(1_i64));
        let previous = dictionary.insert("key", Hydrated::from(2_i64));
        assert_eq!(previous, Some(Hydrated::from(1_i64)));
        assert_eq!(dictionary.remove("key"), Some(Hydrated::from(2_i64)));
        assert!(dictionary.is_empty());
    }
}
