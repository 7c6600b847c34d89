/*!
 Descriptors for the Rust types a hydrator can build.

 A [`TargetType`] stands in for a type at runtime: it knows how to construct an empty instance,
 either through [`Default`] or through [`HydrationAware::create_for_hydration`].
*/

use std::{
    any::{type_name, TypeId},
    collections::HashMap,
    fmt::{Debug, Formatter, Result},
};

use crate::{
    hydrators::object::{ArchivedObject, HydrationAware},
    native_types::{incomplete::IncompleteObject, native_targets},
};

/// Builds an empty target for a native class and its class chain
type Factory = fn(&str, Option<&[String]>) -> Box<dyn ArchivedObject>;

fn construct_plain<T: ArchivedObject + Default>(
    _: &str,
    _: Option<&[String]>,
) -> Box<dyn ArchivedObject> {
    Box::new(T::default())
}

fn construct_aware<T: ArchivedObject + HydrationAware>(
    native_class: &str,
    class_chain: Option<&[String]>,
) -> Box<dyn ArchivedObject> {
    Box::new(T::create_for_hydration(native_class, class_chain))
}

/// A constructible hydration target
#[derive(Clone, Copy)]
pub struct TargetType {
    type_id: TypeId,
    type_name: &'static str,
    factory: Factory,
}

impl TargetType {
    /// A target built with [`Default`]
    pub fn plain<T: ArchivedObject + Default>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            factory: construct_plain::<T>,
        }
    }

    /// A target that is told which native class it is being built for
    pub fn hydration_aware<T: ArchivedObject + HydrationAware>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            factory: construct_aware::<T>,
        }
    }

    /// The Rust type name of the target
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this target builds values of type `T`
    pub fn is<T: ArchivedObject>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub(crate) fn construct(
        &self,
        native_class: &str,
        class_chain: Option<&[String]>,
    ) -> Box<dyn ArchivedObject> {
        (self.factory)(native_class, class_chain)
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TargetType {}

impl Debug for TargetType {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        write!(fmt, "TargetType({})", self.type_name)
    }
}

/// Targets that can be looked up by name
///
/// Names are usually the native class a target represents, i.e. `NSArray`.
#[derive(Debug, Clone, Default)]
pub struct TargetCatalog {
    targets: HashMap<String, TargetType>,
}

/// Name [`IncompleteObject`] is registered under
pub const INCOMPLETE_OBJECT: &str = "IncompleteObject";

impl TargetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding every native type and [`IncompleteObject`]
    pub fn with_native_types() -> Self {
        let mut catalog = Self::new();
        native_targets()
            .into_iter()
            .for_each(|(name, target)| catalog.register(name, target));
        catalog.register(INCOMPLETE_OBJECT, TargetType::hydration_aware::<IncompleteObject>());
        catalog
    }

    /// Make `target` available under `name`, replacing any previous entry
    pub fn register(&mut self, name: impl Into<String>, target: TargetType) {
        self.targets.insert(name.into(), target);
    }

    pub fn get(&self, name: &str) -> Option<&TargetType> {
        self.targets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }
}
