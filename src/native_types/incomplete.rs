/*!
 Fallback representation for archived classes nobody registered a type for.
*/

use std::collections::btree_map::Iter;

use crate::{
    error::archive::ArchiveError,
    hydrators::object::{AllowsDynamicFields, ArchivedObject, HydrationAware},
    models::{Hydrated, Properties},
};

/// Property names holding the object's class metadata; archived data may not use them
pub const RESERVED_PROPERTIES: [&str; 2] = ["__NSNativeClass", "__NSClassChain"];

/// An object of an unknown native class, kept as its class metadata and an open property bag
///
/// Every archived property arrives as a dynamic field, so a hydrator that disables dynamic
/// properties cannot build one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncompleteObject {
    native_class: String,
    class_chain: Option<Vec<String>>,
    properties: Properties,
}

impl IncompleteObject {
    pub fn new(native_class: impl Into<String>, class_chain: Option<Vec<String>>) -> Self {
        Self {
            native_class: native_class.into(),
            class_chain,
            properties: Properties::new(),
        }
    }

    /// The class name this object was archived as
    pub fn native_class(&self) -> &str {
        &self.native_class
    }

    /// The archived class hierarchy, most derived class first
    pub fn class_chain(&self) -> Option<&[String]> {
        self.class_chain.as_deref()
    }

    /// Properties decoded from the archive, without the class metadata
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn get(&self, name: &str) -> Option<&Hydrated> {
        self.properties.get(name)
    }

    pub fn iter(&self) -> Iter<'_, String, Hydrated> {
        self.properties.iter()
    }

    pub fn into_properties(self) -> Properties {
        self.properties
    }

    /// Add a property that is not yet present
    pub fn insert(&mut self, name: &str, value: Hydrated) -> Result<(), ArchiveError> {
        if RESERVED_PROPERTIES.contains(&name) || self.properties.contains_key(name) {
            return Err(ArchiveError::InvalidArgument(format!(
                "Unserialized data contains property \"{name}\" - this property already exists \
                 in IncompleteObject and cannot be overwritten"
            )));
        }
        self.properties.insert(name.to_string(), value);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a IncompleteObject {
    type Item = (&'a String, &'a Hydrated);
    type IntoIter = Iter<'a, String, Hydrated>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

impl HydrationAware for IncompleteObject {
    fn create_for_hydration(native_class: &str, class_chain: Option<&[String]>) -> Self {
        Self::new(native_class, class_chain.map(<[String]>::to_vec))
    }
}

impl AllowsDynamicFields for IncompleteObject {
    fn add_dynamic_field(&mut self, name: &str, value: Hydrated) -> Result<(), ArchiveError> {
        self.insert(name, value)
    }
}

impl ArchivedObject for IncompleteObject {
    fn as_dynamic_fields(&mut self) -> Option<&mut dyn AllowsDynamicFields> {
        Some(self)
    }
}
