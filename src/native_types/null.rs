/*!
 Representation of [`NSNull`](https://developer.apple.com/documentation/foundation/nsnull).
*/

use crate::{
    error::archive::{join_keys, ArchiveError},
    hydrators::object::{ArchivedObject, SelfHydrating},
    models::Properties,
};

/// The archived null singleton
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NSNull;

impl NSNull {
    pub const NATIVE_CLASS: &'static str = "NSNull";
}

impl SelfHydrating for NSNull {
    fn hydrate_from(&mut self, properties: Properties) -> Result<(), ArchiveError> {
        if properties.is_empty() {
            return Ok(());
        }
        Err(ArchiveError::Malformed(format!(
            "{} is not expected to contain any data, found keys: {}",
            Self::NATIVE_CLASS,
            join_keys(properties.keys())
        )))
    }
}

impl ArchivedObject for NSNull {
    fn as_self_hydrating(&mut self) -> Option<&mut dyn SelfHydrating> {
        Some(self)
    }
}
