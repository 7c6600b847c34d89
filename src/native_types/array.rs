/*!
 Representation of [`NSArray`](https://developer.apple.com/documentation/foundation/nsarray) and `NSMutableArray`.
*/

use std::{ops::Index, slice::Iter};

use crate::{
    error::archive::ArchiveError,
    hydrators::object::{ArchivedObject, HydrationAware, SelfHydrating},
    models::{Hydrated, Properties},
    native_types::{take_array, take_single_key},
};

/// Key holding the archived list items
const OBJECTS_KEY: &str = "NS.objects";

/// An ordered list whose indexes are always `0..len`
#[derive(Debug, Clone, PartialEq)]
pub struct NSArray {
    /// The native class this list was archived as
    native_class: String,
    items: Vec<Hydrated>,
}

impl NSArray {
    pub const NATIVE_CLASS: &'static str = "NSArray";
    pub const MUTABLE_NATIVE_CLASS: &'static str = "NSMutableArray";

    pub fn new() -> Self {
        Self::default()
    }

    /// The native class this list was archived as
    pub fn native_class(&self) -> &str {
        &self.native_class
    }

    /// Whether the archived list was an `NSMutableArray`
    pub fn is_mutable(&self) -> bool {
        self.native_class == Self::MUTABLE_NATIVE_CLASS
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Hydrated> {
        self.items.get(index)
    }

    pub fn iter(&self) -> Iter<'_, Hydrated> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Hydrated] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Hydrated> {
        self.items
    }

    /// Store a value at the next available index
    pub fn push(&mut self, value: Hydrated) {
        self.items.push(value);
    }

    /// Overwrite an existing index, or append when `index` is the next available one
    pub fn set(&mut self, index: usize, value: Hydrated) -> Result<(), ArchiveError> {
        match self.items.len() {
            len if index < len => self.items[index] = value,
            len if index == len => self.items.push(value),
            len => {
                return Err(ArchiveError::InvalidArgument(format!(
                    "Cannot set value at offset {index} of {}. Lists require consecutive 0-n keys - \
                     you can override an existing offset or set the next available one ({len})",
                    self.native_class
                )))
            }
        }
        Ok(())
    }

    /// Remove the last item; removing an index that does not exist does nothing
    pub fn remove(&mut self, index: usize) -> Result<Option<Hydrated>, ArchiveError> {
        match self.items.len() {
            len if len.checked_sub(1) == Some(index) => Ok(self.items.pop()),
            len if index < len => Err(ArchiveError::InvalidArgument(format!(
                "Cannot remove value at offset {index} of {}. Lists require consecutive 0-n keys - \
                 you can only remove the last element ({})",
                self.native_class,
                len - 1
            ))),
            _ => Ok(None),
        }
    }
}

impl Default for NSArray {
    fn default() -> Self {
        Self {
            native_class: Self::NATIVE_CLASS.to_string(),
            items: vec![],
        }
    }
}

impl From<Vec<Hydrated>> for NSArray {
    fn from(items: Vec<Hydrated>) -> Self {
        Self {
            native_class: Self::NATIVE_CLASS.to_string(),
            items,
        }
    }
}

impl Index<usize> for NSArray {
    type Output = Hydrated;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a NSArray {
    type Item = &'a Hydrated;
    type IntoIter = Iter<'a, Hydrated>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl HydrationAware for NSArray {
    fn create_for_hydration(native_class: &str, _: Option<&[String]>) -> Self {
        Self {
            native_class: native_class.to_string(),
            items: vec![],
        }
    }
}

impl SelfHydrating for NSArray {
    fn hydrate_from(&mut self, properties: Properties) -> Result<(), ArchiveError> {
        let objects = take_single_key(properties, OBJECTS_KEY)?;
        self.items = take_array(objects, OBJECTS_KEY, &self.native_class)?;
        Ok(())
    }
}

impl ArchivedObject for NSArray {
    fn as_self_hydrating(&mut self) -> Option<&mut dyn SelfHydrating> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::archive::ArchiveError,
        hydrators::object::{HydrationAware, SelfHydrating},
        models::{Hydrated, Properties},
        native_types::array::NSArray,
    };

    fn abc() -> NSArray {
        let mut array = NSArray::new();
        array.push(Hydrated::from("a"));
        array.push(Hydrated::from("b"));
        array.push(Hydrated::from("c"));
        array
    }

    fn objects(items: Vec<Hydrated>) -> Properties {
        Properties::from([("NS.objects".to_string(), Hydrated::array(items))])
    }

    #[test]
    fn can_push_sequential_elements() {
        let array = abc();
        assert_eq!(array.len(), 3);
        assert_eq!(array[0], Hydrated::from("a"));
        assert_eq!(array[1], Hydrated::from("b"));
        assert_eq!(array[2], Hydrated::from("c"));
    }

    #[test]
    fn can_set_manually_sequenced_elements() {
        let mut array = NSArray::new();
        array.set(0, Hydrated::from("a")).unwrap();
        array.set(1, Hydrated::from("b")).unwrap();
        array.push(Hydrated::from("c"));
        assert_eq!(
            array.iter().filter_map(Hydrated::as_str).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn can_replace_elements() {
        let mut array = abc();
        array.set(1, Hydrated::from("d")).unwrap();
        assert_eq!(array[1], Hydrated::from("d"));
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn cant_set_non_consecutive_elements() {
        let mut array = NSArray::new();
        array.push(Hydrated::from("a"));
        let error = array.set(2, Hydrated::from("d")).unwrap_err();
        assert!(matches!(error, ArchiveError::InvalidArgument(_)));
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn can_remove_last_element() {
        let mut array = abc();
        let removed = array.remove(2).unwrap();
        assert_eq!(removed, Some(Hydrated::from("c")));
        assert_eq!(array.len(), 2);
        assert!(array.get(2).is_none());
    }

    #[test]
    fn cant_remove_middle_element() {
        let mut array = abc();
        let error = array.remove(1).unwrap_err();
        assert!(matches!(error, ArchiveError::InvalidArgument(_)));
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn can_remove_missing_element() {
        let mut array = abc();
        assert_eq!(array.remove(42).unwrap(), None);
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn can_hydrate_empty_list() {
        let mut array = NSArray::new();
        array.hydrate_from(objects(vec![])).unwrap();
        assert!(array.is_empty());
    }

    #[test]
    fn can_hydrate_in_order() {
        let mut array = NSArray::new();
        array
            .hydrate_from(objects(vec![
                Hydrated::from("a"),
                Hydrated::from("b"),
                Hydrated::from("c"),
            ]))
            .unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(
            array.into_vec(),
            vec![Hydrated::from("a"), Hydrated::from("b"), Hydrated::from("c")]
        );
    }

    #[test]
    fn cant_hydrate_without_objects() {
        let mut array = NSArray::new();
        let error = array.hydrate_from(Properties::new()).unwrap_err();
        assert!(matches!(error, ArchiveError::KeyNotFound(_)));
    }

    #[test]
    fn cant_hydrate_extra_keys() {
        let mut array = NSArray::new();
        let mut properties = objects(vec![]);
        properties.insert("NS.extra".to_string(), Hydrated::Null);
        let error = array.hydrate_from(properties).unwrap_err();
        assert!(error.to_string().contains("NS.extra"));
    }

    #[test]
    fn cant_hydrate_from_dictionary() {
        let mut array = NSArray::new();
        let properties = Properties::from([(
            "NS.objects".to_string(),
            Hydrated::dictionary(Properties::new()),
        )]);
        let error = array.hydrate_from(properties).unwrap_err();
        assert!(matches!(error, ArchiveError::Malformed(_)));
    }

    #[test]
    fn can_remember_mutable_class() {
        let array = NSArray::create_for_hydration("NSMutableArray", None);
        assert!(array.is_mutable());
        assert!(!NSArray::new().is_mutable());
        assert_eq!(NSArray::new().native_class(), "NSArray");
    }
}
