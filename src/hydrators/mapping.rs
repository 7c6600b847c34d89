/*!
 A hydrator that keeps archived objects as plain dictionaries.
*/

use crate::{
    error::archive::ArchiveError,
    hydrators::Hydrator,
    models::{Hydrated, Properties},
};

/// Hydrates every object into a [`Hydrated::Dictionary`] of its properties
///
/// The native class and class chain can optionally be kept under extra keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingHydrator {
    /// Key that receives the native class name
    pub class_name_key: Option<String>,
    /// Key that receives the class chain, as a list of names or null
    pub class_chain_key: Option<String>,
}

impl MappingHydrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class_name_key(mut self, key: impl Into<String>) -> Self {
        self.class_name_key = Some(key.into());
        self
    }

    pub fn with_class_chain_key(mut self, key: impl Into<String>) -> Self {
        self.class_chain_key = Some(key.into());
        self
    }
}

impl Hydrator for MappingHydrator {
    fn can_hydrate(&self, _: &str, _: Option<&[String]>, _: &Properties) -> bool {
        true
    }

    fn hydrate(
        &self,
        native_class: &str,
        class_chain: Option<&[String]>,
        mut properties: Properties,
    ) -> Result<Hydrated, ArchiveError> {
        if let Some(key) = &self.class_name_key {
            properties.insert(key.clone(), Hydrated::from(native_class));
        }
        if let Some(key) = &self.class_chain_key {
            let chain = match class_chain {
                Some(chain) => Hydrated::array(
                    chain
                        .iter()
                        .map(|name| Hydrated::from(name.as_str()))
                        .collect(),
                ),
                None => Hydrated::Null,
            };
            properties.insert(key.clone(), chain);
        }
        Ok(Hydrated::dictionary(properties))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        hydrators::{mapping::MappingHydrator, Hydrator},
        models::{Hydrated, Properties},
    };

    fn properties() -> Properties {
        Properties::from([("one".to_string(), Hydrated::from("foo"))])
    }

    #[test]
    fn can_hydrate_anything() {
        let hydrator = MappingHydrator::new();
        assert!(hydrator.can_hydrate("Whatever", None, &Properties::new()));
    }

    #[test]
    fn can_return_properties_unchanged() {
        let hydrated = MappingHydrator::new()
            .hydrate("TestDummy", None, properties())
            .unwrap();
        assert_eq!(hydrated.as_dictionary(), Some(&properties()));
    }

    #[test]
    fn can_add_class_metadata() {
        let chain = vec!["TestDummy".to_string(), "NSObject".to_string()];
        let hydrated = MappingHydrator::new()
            .with_class_name_key("$class")
            .with_class_chain_key("$chain")
            .hydrate("TestDummy", Some(&chain), properties())
            .unwrap();
        let dictionary = hydrated.as_dictionary().unwrap();

        assert_eq!(dictionary.get("$class"), Some(&Hydrated::from("TestDummy")));
        assert_eq!(
            dictionary.get("$chain"),
            Some(&Hydrated::array(vec![
                Hydrated::from("TestDummy"),
                Hydrated::from("NSObject")
            ]))
        );
        assert_eq!(dictionary.get("one"), Some(&Hydrated::from("foo")));
    }

    #[test]
    fn can_add_missing_class_chain() {
        let hydrated = MappingHydrator::new()
            .with_class_chain_key("$chain")
            .hydrate("TestDummy", None, properties())
            .unwrap();
        assert_eq!(
            hydrated.as_dictionary().unwrap().get("$chain"),
            Some(&Hydrated::Null)
        );
    }
}
