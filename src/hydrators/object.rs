/*!
 Capabilities a hydration target can expose.

 Hydrators never inspect a target through reflection. Instead, [`ArchivedObject`] offers a fixed set
 of optional capability accessors, each returning `None` unless the type opts in. The
 [`Populator`](crate::hydrators::populator::Populator) probes them in a fixed order.
*/

use std::{any::Any, fmt::Debug};

use crate::{
    error::archive::ArchiveError,
    models::{Hydrated, Properties},
};

/// Upcast helper so hydrated objects can be downcast to their concrete types
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value a hydrator can build from an archived object
pub trait ArchivedObject: AsAny + Debug {
    /// The target consumes the whole raw property bag on its own
    fn as_self_hydrating(&mut self) -> Option<&mut dyn SelfHydrating> {
        None
    }

    /// The target has named fields that can be assigned directly
    fn as_named_fields(&mut self) -> Option<&mut dyn HasNamedField> {
        None
    }

    /// The target has `set<Property>` style setters
    fn as_setters(&mut self) -> Option<&mut dyn HasSetterConvention> {
        None
    }

    /// The target accepts any property through a single setter
    fn as_catch_all_setter(&mut self) -> Option<&mut dyn HasCatchAllSetter> {
        None
    }

    /// The target can grow new fields at runtime
    fn as_dynamic_fields(&mut self) -> Option<&mut dyn AllowsDynamicFields> {
        None
    }
}

/// Types that know which native class and class chain they are being built for
pub trait HydrationAware: Sized {
    fn create_for_hydration(native_class: &str, class_chain: Option<&[String]>) -> Self;
}

/// Types that populate themselves from the raw property bag
pub trait SelfHydrating {
    fn hydrate_from(&mut self, properties: Properties) -> Result<(), ArchiveError>;
}

/// Direct assignment to a named field
pub trait HasNamedField {
    /// Assign `value` to the field called `name`
    ///
    /// Returns the value back when no such field exists so the caller can try something else.
    fn set_field(&mut self, name: &str, value: Hydrated) -> Result<Option<Hydrated>, ArchiveError>;
}

/// Assignment through a setter named `set` followed by the capitalized property name
pub trait HasSetterConvention {
    /// Invoke `setter`, returning the value back when no such setter exists
    fn call_setter(
        &mut self,
        setter: &str,
        value: Hydrated,
    ) -> Result<Option<Hydrated>, ArchiveError>;
}

/// A single setter that accepts any property
pub trait HasCatchAllSetter {
    fn set_property(&mut self, name: &str, value: Hydrated) -> Result<(), ArchiveError>;
}

/// Creation of new fields that the type does not declare
pub trait AllowsDynamicFields {
    fn add_dynamic_field(&mut self, name: &str, value: Hydrated) -> Result<(), ArchiveError>;
}
