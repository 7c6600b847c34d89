/*!
 Representations of Foundation's well-known archived types.

 Each type consumes the property bag of its archived object through [`SelfHydrating`](crate::hydrators::object::SelfHydrating)
 and rejects payloads that do not match the wire layout `NSKeyedArchiver` produces.
*/

use std::rc::Rc;

use crate::{
    error::archive::ArchiveError,
    hydrators::target::TargetType,
    models::{Hydrated, Properties},
};

pub mod array;
pub mod data;
pub mod date;
pub mod dictionary;
pub mod flat;
pub mod incomplete;
pub mod null;
pub mod regex;
pub mod set;
pub mod url;
pub mod uuid;

use self::{
    array::NSArray, data::NSData, date::NSDate, dictionary::NSDictionary, null::NSNull,
    regex::NSRegularExpression, set::NSSet, url::NSURL, uuid::NSUUID,
};

/// Every native class this crate knows how to hydrate, paired with its target
pub fn native_targets() -> Vec<(&'static str, TargetType)> {
    vec![
        (NSArray::NATIVE_CLASS, TargetType::hydration_aware::<NSArray>()),
        (NSArray::MUTABLE_NATIVE_CLASS, TargetType::hydration_aware::<NSArray>()),
        (NSData::NATIVE_CLASS, TargetType::hydration_aware::<NSData>()),
        (NSData::MUTABLE_NATIVE_CLASS, TargetType::hydration_aware::<NSData>()),
        (NSDate::NATIVE_CLASS, TargetType::plain::<NSDate>()),
        (NSDictionary::NATIVE_CLASS, TargetType::hydration_aware::<NSDictionary>()),
        (NSDictionary::MUTABLE_NATIVE_CLASS, TargetType::hydration_aware::<NSDictionary>()),
        (NSNull::NATIVE_CLASS, TargetType::plain::<NSNull>()),
        (NSRegularExpression::NATIVE_CLASS, TargetType::plain::<NSRegularExpression>()),
        (NSSet::NATIVE_CLASS, TargetType::hydration_aware::<NSSet>()),
        (NSSet::MUTABLE_NATIVE_CLASS, TargetType::hydration_aware::<NSSet>()),
        (NSURL::NATIVE_CLASS, TargetType::plain::<NSURL>()),
        (NSUUID::NATIVE_CLASS, TargetType::plain::<NSUUID>()),
    ]
}

/// Take the only key out of a property bag, failing if it is missing or anything else is present
pub(crate) fn take_single_key(
    mut properties: Properties,
    key: &str,
) -> Result<Hydrated, ArchiveError> {
    if properties.len() == 1 {
        if let Some(value) = properties.remove(key) {
            return Ok(value);
        }
    }
    Err(ArchiveError::single_key(key, properties.keys()))
}

/// Take ownership of a decoded list, cloning only when the list is shared with another reference
pub(crate) fn take_array(
    value: Hydrated,
    key: &str,
    native_class: &str,
) -> Result<Vec<Hydrated>, ArchiveError> {
    match value {
        Hydrated::Array(items) => {
            Ok(Rc::try_unwrap(items).unwrap_or_else(|shared| (*shared).clone()))
        }
        other => Err(ArchiveError::Malformed(format!(
            "{key} for {native_class} must be a list, got {}",
            other.kind()
        ))),
    }
}
