/*!
 Representation of [`NSDate`](https://developer.apple.com/documentation/foundation/nsdate).
*/

use chrono::{DateTime, Utc};

use crate::{
    error::archive::ArchiveError,
    hydrators::object::{ArchivedObject, SelfHydrating},
    models::{Hydrated, Properties},
    native_types::take_single_key,
    util::dates::from_reference_seconds,
};

/// Key holding seconds since the Apple reference epoch
const TIME_KEY: &str = "NS.time";

/// A point in time, stored in the archive as seconds since 2001-01-01T00:00:00Z
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NSDate {
    pub date_time: DateTime<Utc>,
}

impl NSDate {
    pub const NATIVE_CLASS: &'static str = "NSDate";
}

/// Read the archived time as a number, accepting numeric strings
fn reference_seconds(value: &Hydrated) -> Option<f64> {
    match value {
        Hydrated::String(text) => text.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    }
}

impl SelfHydrating for NSDate {
    fn hydrate_from(&mut self, properties: Properties) -> Result<(), ArchiveError> {
        let time = take_single_key(properties, TIME_KEY)?;
        match reference_seconds(&time).and_then(from_reference_seconds) {
            Some(date_time) => {
                self.date_time = date_time;
                Ok(())
            }
            None => {
                let shown = match &time {
                    Hydrated::String(text) => text.clone(),
                    Hydrated::SignedInteger(num) => num.to_string(),
                    Hydrated::UnsignedInteger(num) => num.to_string(),
                    Hydrated::Real(num) => num.to_string(),
                    other => other.kind().to_string(),
                };
                Err(ArchiveError::Malformed(format!(
                    "Encapsulated value of time \"{shown}\" in {} is invalid",
                    Self::NATIVE_CLASS
                )))
            }
        }
    }
}

impl ArchivedObject for NSDate {
    fn as_self_hydrating(&mut self) -> Option<&mut dyn SelfHydrating> {
        Some(self)
    }
}
