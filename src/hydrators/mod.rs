/*!
 Strategies that turn archived objects into Rust values.

 The [`HydratorRegistry`](registry::HydratorRegistry) offers each archived object to its
 [`Hydrator`]s in order; the first one that accepts the object builds it.
*/

use std::rc::Rc;

use crate::{
    error::archive::ArchiveError,
    hydrators::{populator::Populator, target::TargetType},
    models::{Hydrated, Properties},
};

pub mod class_map;
pub mod mapping;
pub mod object;
pub mod populator;
pub mod registry;
pub mod target;
pub mod universal;

/// Builds a value out of an archived object's class metadata and decoded properties
pub trait Hydrator {
    /// Whether this hydrator wants to build the object
    fn can_hydrate(
        &self,
        native_class: &str,
        class_chain: Option<&[String]>,
        properties: &Properties,
    ) -> bool;

    /// Build the object
    fn hydrate(
        &self,
        native_class: &str,
        class_chain: Option<&[String]>,
        properties: Properties,
    ) -> Result<Hydrated, ArchiveError>;
}

/// Construct `target` and fill it with `properties`
///
/// Targets that hydrate themselves receive the raw property bag; everything else goes through `populator`.
pub(crate) fn hydrate_object(
    target: &TargetType,
    native_class: &str,
    class_chain: Option<&[String]>,
    properties: Properties,
    populator: &Populator,
) -> Result<Hydrated, ArchiveError> {
    let mut object = target.construct(native_class, class_chain);
    if let Some(hydrating) = object.as_self_hydrating() {
        hydrating.hydrate_from(properties)?;
    } else {
        populator.populate(&mut *object, native_class, properties)?;
    }
    Ok(Hydrated::Object(Rc::from(object)))
}
