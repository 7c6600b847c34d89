/*!
 A catch-all hydrator that builds every archived object as the same Rust type.
*/

use crate::{
    error::archive::ArchiveError,
    hydrators::{
        hydrate_object,
        populator::Populator,
        target::{TargetCatalog, TargetType},
        Hydrator,
    },
    models::{Hydrated, Properties},
    native_types::incomplete::IncompleteObject,
};

/// Hydrates any native class into one target, [`IncompleteObject`] by default
///
/// This accepts every object, so it belongs at the end of a
/// [`HydratorRegistry`](crate::hydrators::registry::HydratorRegistry).
#[derive(Debug, Clone)]
pub struct UniversalObjectHydrator {
    target: TargetType,
    populator: Populator,
}

impl UniversalObjectHydrator {
    pub fn new() -> Self {
        Self::with_target(TargetType::hydration_aware::<IncompleteObject>())
    }

    /// Build every object as `target`
    pub fn with_target(target: TargetType) -> Self {
        Self {
            target,
            populator: Populator::new(true),
        }
    }

    pub fn allow_dynamic_properties(mut self, allow: bool) -> Self {
        self.populator.allow_dynamic_properties = allow;
        self
    }

    pub fn target(&self) -> &TargetType {
        &self.target
    }

    pub fn set_target(&mut self, target: TargetType) {
        self.target = target;
    }

    /// Replace the target with the one registered in `catalog` as `target_name`
    pub fn set_target_name(
        &mut self,
        catalog: &TargetCatalog,
        target_name: &str,
    ) -> Result<(), ArchiveError> {
        let target = catalog.get(target_name).ok_or_else(|| {
            ArchiveError::InvalidArgument(format!(
                "Cannot set target to {target_name} - target type is not registered"
            ))
        })?;
        self.target = *target;
        Ok(())
    }
}

impl Default for UniversalObjectHydrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Hydrator for UniversalObjectHydrator {
    fn can_hydrate(&self, _: &str, _: Option<&[String]>, _: &Properties) -> bool {
        true
    }

    fn hydrate(
        &self,
        native_class: &str,
        class_chain: Option<&[String]>,
        properties: Properties,
    ) -> Result<Hydrated, ArchiveError> {
        hydrate_object(&self.target, native_class, class_chain, properties, &self.populator)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::archive::ArchiveError,
        hydrators::{
            object::{AllowsDynamicFields, ArchivedObject},
            target::{TargetCatalog, TargetType},
            universal::UniversalObjectHydrator,
            Hydrator,
        },
        models::{Hydrated, Properties},
        native_types::{incomplete::IncompleteObject, null::NSNull},
    };

    #[derive(Debug, Default)]
    struct Loose {
        fields: Properties,
    }

    impl AllowsDynamicFields for Loose {
        fn add_dynamic_field(&mut self, name: &str, value: Hydrated) -> Result<(), ArchiveError> {
            self.fields.insert(name.to_string(), value);
            Ok(())
        }
    }

    impl ArchivedObject for Loose {
        fn as_dynamic_fields(&mut self) -> Option<&mut dyn AllowsDynamicFields> {
            Some(self)
        }
    }

    fn properties() -> Properties {
        Properties::from([("one".to_string(), Hydrated::from("foo"))])
    }

    #[test]
    fn can_hydrate_incomplete_object() {
        let chain = vec!["TestDummy".to_string(), "NSObject".to_string()];
        let hydrator = UniversalObjectHydrator::new();
        assert!(hydrator.can_hydrate("TestDummy", None, &Properties::new()));

        let hydrated = hydrator
            .hydrate("TestDummy", Some(&chain), properties())
            .unwrap();
        let object = hydrated.downcast_ref::<IncompleteObject>().unwrap();
        assert_eq!(object.native_class(), "TestDummy");
        assert_eq!(object.class_chain(), Some(&chain[..]));
        assert_eq!(object.get("one"), Some(&Hydrated::from("foo")));
    }

    #[test]
    fn cant_hydrate_incomplete_object_when_strict() {
        let hydrator = UniversalObjectHydrator::new().allow_dynamic_properties(false);
        let error = hydrator
            .hydrate("TestDummy", None, properties())
            .unwrap_err();
        assert!(matches!(error, ArchiveError::Domain(_)));

        let empty = hydrator
            .hydrate("TestDummy", None, Properties::new())
            .unwrap();
        assert!(empty.downcast_ref::<IncompleteObject>().is_some());
    }

    #[test]
    fn can_hydrate_dynamic_fields() {
        let hydrator = UniversalObjectHydrator::with_target(TargetType::plain::<Loose>());
        let hydrated = hydrator.hydrate("TestDummy", None, properties()).unwrap();
        assert_eq!(
            hydrated.downcast_ref::<Loose>().unwrap().fields,
            properties()
        );
    }

    #[test]
    fn cant_hydrate_dynamic_fields_when_disabled() {
        let hydrator = UniversalObjectHydrator::with_target(TargetType::plain::<Loose>())
            .allow_dynamic_properties(false);
        let error = hydrator
            .hydrate("TestDummy", None, properties())
            .unwrap_err();
        assert!(matches!(error, ArchiveError::Domain(_)));
    }

    #[test]
    fn can_change_target() {
        let mut hydrator = UniversalObjectHydrator::default();
        hydrator
            .set_target_name(&TargetCatalog::with_native_types(), "NSNull")
            .unwrap();
        assert!(hydrator.target().is::<NSNull>());

        let error = hydrator
            .set_target_name(&TargetCatalog::new(), "NSNull")
            .unwrap_err();
        assert!(matches!(error, ArchiveError::InvalidArgument(_)));
        assert!(hydrator.target().is::<NSNull>());

        hydrator.set_target(TargetType::plain::<Loose>());
        assert!(hydrator.target().is::<Loose>());
    }
}
