/*!
 A hydrator that builds registered Rust types for specific native classes.
*/

use std::collections::HashMap;

use crate::{
    error::archive::ArchiveError,
    hydrators::{
        hydrate_object,
        populator::Populator,
        target::{TargetCatalog, TargetType},
        Hydrator,
    },
    models::{Hydrated, Properties},
    native_types::native_targets,
};

/// Hydrates native classes that were mapped to a [`TargetType`]
///
/// Properties the target does not declare are rejected unless dynamic properties are enabled.
#[derive(Debug, Clone, Default)]
pub struct ClassMapHydrator {
    /// Targets that can be mapped by name
    catalog: TargetCatalog,
    /// Native class name to the target it is built as
    class_map: HashMap<String, TargetType>,
    populator: Populator,
}

impl ClassMapHydrator {
    /// Create an empty hydrator that resolves target names in `catalog`
    pub fn new(catalog: TargetCatalog) -> Self {
        Self {
            catalog,
            class_map: HashMap::new(),
            populator: Populator::new(false),
        }
    }

    /// Create a hydrator with every native type mapped to its Rust representation
    pub fn with_native_types() -> Self {
        let mut hydrator = Self::new(TargetCatalog::with_native_types());
        hydrator.class_map = native_targets()
            .into_iter()
            .map(|(native_class, target)| (native_class.to_string(), target))
            .collect();
        hydrator
    }

    pub fn allow_dynamic_properties(mut self, allow: bool) -> Self {
        self.populator.allow_dynamic_properties = allow;
        self
    }

    /// Targets available to [`ClassMapHydrator::add_mapped_class`]
    pub fn catalog_mut(&mut self) -> &mut TargetCatalog {
        &mut self.catalog
    }

    /// The target a native class is mapped to
    pub fn target_for(&self, native_class: &str) -> Option<&TargetType> {
        self.class_map.get(native_class)
    }

    /// Map `native_class` to the target registered in the catalog as `target_name`
    pub fn add_mapped_class(
        &mut self,
        native_class: &str,
        target_name: &str,
    ) -> Result<(), ArchiveError> {
        let target = self.catalog.get(target_name).copied();
        if let Some(existing) = self.class_map.get(native_class) {
            if target.as_ref() != Some(existing) {
                return Err(ArchiveError::Overflow(format!(
                    "Cannot map {native_class} to {target_name} - {native_class} is already mapped to {}",
                    existing.type_name()
                )));
            }
        }
        let target = target.ok_or_else(|| {
            ArchiveError::Runtime(format!(
                "Cannot map native class {native_class} to {target_name} - target type is not registered"
            ))
        })?;
        self.class_map.insert(native_class.to_string(), target);
        Ok(())
    }

    /// Map `native_class` directly to `target`
    pub fn add_mapped_type(
        &mut self,
        native_class: &str,
        target: TargetType,
    ) -> Result<(), ArchiveError> {
        match self.class_map.get(native_class) {
            Some(existing) if *existing != target => Err(ArchiveError::Overflow(format!(
                "Cannot map {native_class} to {} - {native_class} is already mapped to {}",
                target.type_name(),
                existing.type_name()
            ))),
            _ => {
                self.class_map.insert(native_class.to_string(), target);
                Ok(())
            }
        }
    }

    /// Replace the whole class map with `(native class, target name)` pairs
    ///
    /// If any pair fails to register, the previous map is kept.
    pub fn set_class_map<'a>(
        &mut self,
        class_map: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), ArchiveError> {
        let previous = std::mem::take(&mut self.class_map);
        for (native_class, target_name) in class_map {
            if let Err(why) = self.add_mapped_class(native_class, target_name) {
                self.class_map = previous;
                return Err(why);
            }
        }
        Ok(())
    }
}

impl Hydrator for ClassMapHydrator {
    fn can_hydrate(&self, native_class: &str, _: Option<&[String]>, _: &Properties) -> bool {
        self.class_map.contains_key(native_class)
    }

    fn hydrate(
        &self,
        native_class: &str,
        class_chain: Option<&[String]>,
        properties: Properties,
    ) -> Result<Hydrated, ArchiveError> {
        let target = self.class_map.get(native_class).ok_or_else(|| {
            ArchiveError::InvalidArgument(format!("Class {native_class} is not mapped"))
        })?;
        hydrate_object(target, native_class, class_chain, properties, &self.populator)
    }
}
