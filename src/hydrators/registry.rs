/*!
 Ordered dispatch of archived objects to hydrators.
*/

use crate::{
    error::archive::ArchiveError,
    hydrators::Hydrator,
    models::{Hydrated, Properties},
};

/// An ordered list of [`Hydrator`]s; the first one that accepts an object builds it
#[derive(Default)]
pub struct HydratorRegistry {
    hydrators: Vec<Box<dyn Hydrator>>,
}

impl HydratorRegistry {
    pub fn new(hydrators: Vec<Box<dyn Hydrator>>) -> Self {
        Self { hydrators }
    }

    /// Add a hydrator after the ones already registered
    pub fn push(&mut self, hydrator: Box<dyn Hydrator>) {
        self.hydrators.push(hydrator);
    }

    pub fn len(&self) -> usize {
        self.hydrators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hydrators.is_empty()
    }

    /// Hand an archived object to the first hydrator that accepts it
    pub fn dispatch(
        &self,
        native_class: &str,
        class_chain: Option<&[String]>,
        properties: Properties,
    ) -> Result<Hydrated, ArchiveError> {
        match self
            .hydrators
            .iter()
            .find(|hydrator| hydrator.can_hydrate(native_class, class_chain, &properties))
        {
            Some(hydrator) => hydrator.hydrate(native_class, class_chain, properties),
            None => Err(ArchiveError::Logic(format!(
                "No hydrator for {native_class} ({}) was found; register a catch-all hydrator",
                class_chain
                    .map(|chain| chain.join(" -> "))
                    .unwrap_or_else(|| "<unknown chain>".to_string())
            ))),
        }
    }
}
