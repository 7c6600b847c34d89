/*!
 Representation of [`NSSet`](https://developer.apple.com/documentation/foundation/nsset) and `NSMutableSet`.
*/

use std::slice::Iter;

use crate::{
    error::archive::ArchiveError,
    hydrators::object::{ArchivedObject, HydrationAware, SelfHydrating},
    models::{Hydrated, Properties},
    native_types::{take_array, take_single_key},
};

/// Key holding the archived set members
const OBJECTS_KEY: &str = "NS.objects";

/// A collection of unique values that remembers insertion order
///
/// Uniqueness uses strict equality: scalars compare by value and archived objects by identity,
/// so two distinct objects with the same content can both be members.
#[derive(Debug, Clone, PartialEq)]
pub struct NSSet {
    /// The native class this set was archived as
    native_class: String,
    items: Vec<Hydrated>,
}

impl NSSet {
    pub const NATIVE_CLASS: &'static str = "NSSet";
    pub const MUTABLE_NATIVE_CLASS: &'static str = "NSMutableSet";

    pub fn new() -> Self {
        Self::default()
    }

    /// The native class this set was archived as
    pub fn native_class(&self) -> &str {
        &self.native_class
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &Hydrated) -> bool {
        self.items.contains(item)
    }

    pub fn iter(&self) -> Iter<'_, Hydrated> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Hydrated> {
        self.items
    }

    /// Add a new member, failing if an equal one is already present
    pub fn add(&mut self, item: Hydrated) -> Result<(), ArchiveError> {
        if self.contains(&item) {
            return Err(ArchiveError::Overflow(format!(
                "Item {}{{{}}} already exists in the set",
                item.kind(),
                describe(&item)
            )));
        }
        self.items.push(item);
        Ok(())
    }
}

/// Render scalar members for error messages
fn describe(item: &Hydrated) -> String {
    match item {
        Hydrated::Boolean(value) => value.to_string(),
        Hydrated::SignedInteger(value) => value.to_string(),
        Hydrated::UnsignedInteger(value) => value.to_string(),
        Hydrated::Real(value) => value.to_string(),
        Hydrated::String(value) => value.clone(),
        _ => "<opaque>".to_string(),
    }
}

impl Default for NSSet {
    fn default() -> Self {
        Self {
            native_class: Self::NATIVE_CLASS.to_string(),
            items: vec![],
        }
    }
}

impl<'a> IntoIterator for &'a NSSet {
    type Item = &'a Hydrated;
    type IntoIter = Iter<'a, Hydrated>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl HydrationAware for NSSet {
    fn create_for_hydration(native_class: &str, _: Option<&[String]>) -> Self {
        Self {
            native_class: native_class.to_string(),
            items: vec![],
        }
    }
}

impl SelfHydrating for NSSet {
    fn hydrate_from(&mut self, properties: Properties) -> Result<(), ArchiveError> {
        let objects = take_single_key(properties, OBJECTS_KEY)?;
        for item in take_array(objects, OBJECTS_KEY, &self.native_class)? {
            self.add(item).map_err(|why| {
                ArchiveError::MalformedCause(
                    format!(
                        "Archive contains an {} which contains non-unique values",
                        self.native_class
                    ),
                    Box::new(why),
                )
            })?;
        }
        Ok(())
    }
}

impl ArchivedObject for NSSet {
    fn as_self_hydrating(&mut self) -> Option<&mut dyn SelfHydrating> {
        Some(self)
    }
}
