/*!
 Entry point for decoding `NSKeyedArchiver` data.

 ## Overview

 A keyed archive is a property list with four root keys:

 - `$version`: always `100000`
 - `$archiver`: always `NSKeyedArchiver`
 - `$top`: named entry points into the object graph, usually just `root`
 - `$objects`: a flat table of every archived value

 Values in the table refer to each other through [`plist::Uid`] indexes. An archived object is a
 dictionary whose `$class` key points to a declaration holding its `$classname` and `$classes`.

 ## Example

 ```no_run
 use nskeyed_unarchiver::{
     native_types::array::NSArray,
     unarchiver::NSKeyedUnarchiver,
     util::plist::PlistFormat,
 };

 let unarchiver = NSKeyedUnarchiver::with_native_types();
 let root = unarchiver
     .unarchive_root_from_file("archive.plist", PlistFormat::Auto)
     .unwrap();

 if let Some(array) = root.downcast_ref::<NSArray>() {
     println!("{} items", array.len());
 }
 ```
*/

use std::{fs, path::Path, rc::Rc};

use plist::Value;

use crate::{
    error::archive::{join_keys, ArchiveError},
    hydrators::{
        class_map::ClassMapHydrator, mapping::MappingHydrator, registry::HydratorRegistry,
        universal::UniversalObjectHydrator, Hydrator,
    },
    models::{Hydrated, Properties},
    unarchiver::walker::GraphWalker,
    util::plist::{parse_plist, PlistFormat},
    validator::{ArchiveFormatValidator, ArchiveValidator},
};

pub mod walker;

/// Key in `$top` that holds the archive's root object
pub const ROOT_OBJECT_KEY: &str = "root";

/// Decodes keyed archives, handing every archived object to a list of [`Hydrator`]s
pub struct NSKeyedUnarchiver {
    registry: HydratorRegistry,
    validator: Box<dyn ArchiveValidator>,
    /// Maximum nesting of containers and objects, unlimited if [`None`]
    max_depth: Option<usize>,
}

impl NSKeyedUnarchiver {
    /// Create an unarchiver that tries `hydrators` in order
    pub fn new(hydrators: Vec<Box<dyn Hydrator>>) -> Self {
        Self {
            registry: HydratorRegistry::new(hydrators),
            validator: Box::new(ArchiveFormatValidator),
            max_depth: None,
        }
    }

    /// Build native types as their [`native_types`](crate::native_types) representation
    /// and everything else as an [`IncompleteObject`](crate::native_types::incomplete::IncompleteObject)
    pub fn with_native_types() -> Self {
        Self::new(vec![
            Box::new(ClassMapHydrator::with_native_types()),
            Box::new(UniversalObjectHydrator::new()),
        ])
    }

    /// Build every archived object as a plain dictionary of its properties
    pub fn with_dictionary_casting() -> Self {
        Self::new(vec![Box::new(MappingHydrator::new())])
    }

    /// Replace the container validator
    pub fn with_validator(mut self, validator: Box<dyn ArchiveValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Fail with [`ArchiveError::DepthExceeded`] when containers nest deeper than `max_depth`
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn registry(&self) -> &HydratorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HydratorRegistry {
        &mut self.registry
    }

    /// Read an archive from disk and decode its root object
    pub fn unarchive_root_from_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: PlistFormat,
    ) -> Result<Hydrated, ArchiveError> {
        let bytes = fs::read(path).map_err(ArchiveError::CannotRead)?;
        self.unarchive_root_from_bytes(&bytes, format)
    }

    /// Decode the root object of an archive held in memory
    pub fn unarchive_root_from_bytes(
        &self,
        bytes: &[u8],
        format: PlistFormat,
    ) -> Result<Hydrated, ArchiveError> {
        self.unarchive_root(&parse_plist(bytes, format)?)
    }

    /// Decode the root object of a parsed archive
    pub fn unarchive_root(&self, plist: &Value) -> Result<Hydrated, ArchiveError> {
        let mut top = self.unarchive(plist)?;
        let found_keys = join_keys(top.keys());
        top.remove(ROOT_OBJECT_KEY).ok_or_else(|| {
            ArchiveError::Malformed(format!(
                "Archive root key \"{ROOT_OBJECT_KEY}\" is missing from the main container, found keys: {found_keys}"
            ))
        })
    }

    /// Decode every entry of the archive's `$top` dictionary
    pub fn unarchive(&self, plist: &Value) -> Result<Properties, ArchiveError> {
        self.validator.validate_container(plist)?;

        let root = plist.as_dictionary().ok_or_else(|| {
            ArchiveError::Malformed("Archive container is not a dictionary".to_string())
        })?;
        let (top, objects) = match (
            root.get("$top"),
            root.get("$objects").and_then(Value::as_array),
        ) {
            (Some(top), Some(objects)) => (top, objects),
            _ => {
                return Err(ArchiveError::Malformed(
                    "Archive container lacks $top or $objects".to_string(),
                ))
            }
        };

        let mut walker = GraphWalker::new(objects, &self.registry).with_max_depth(self.max_depth);
        match walker.walk(top)? {
            Hydrated::Dictionary(top) => {
                Ok(Rc::try_unwrap(top).unwrap_or_else(|shared| (*shared).clone()))
            }
            other => Err(ArchiveError::Malformed(format!(
                "Archive container was expected to be a dictionary, but found {}",
                other.kind()
            ))),
        }
    }
}

impl Default for NSKeyedUnarchiver {
    fn default() -> Self {
        Self::with_native_types()
    }
}
