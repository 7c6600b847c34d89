/*!
 Assigns a property bag to a target that does not hydrate itself.
*/

use crate::{
    error::archive::ArchiveError,
    hydrators::object::ArchivedObject,
    models::{Hydrated, Properties},
};

/// Builds the setter name for a property, i.e. `title` becomes `setTitle`
pub fn setter_name(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
        None => "set".to_string(),
    }
}

/// Fills a target with properties by probing its capabilities
///
/// Each property is offered, in order, to:
///   1. [`HasNamedField`](crate::hydrators::object::HasNamedField)
///   2. [`HasSetterConvention`](crate::hydrators::object::HasSetterConvention) using [`setter_name`]
///   3. [`HasCatchAllSetter`](crate::hydrators::object::HasCatchAllSetter)
///   4. [`AllowsDynamicFields`](crate::hydrators::object::AllowsDynamicFields), if enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Populator {
    /// Whether properties the target does not declare may be added as new fields
    pub allow_dynamic_properties: bool,
}

impl Populator {
    pub fn new(allow_dynamic_properties: bool) -> Self {
        Self {
            allow_dynamic_properties,
        }
    }

    /// Assign every property of `properties` to `target`
    pub fn populate(
        &self,
        target: &mut dyn ArchivedObject,
        native_class: &str,
        properties: Properties,
    ) -> Result<(), ArchiveError> {
        properties
            .into_iter()
            .try_for_each(|(key, value)| self.assign(target, native_class, &key, value))
    }

    fn assign(
        &self,
        target: &mut dyn ArchivedObject,
        native_class: &str,
        key: &str,
        value: Hydrated,
    ) -> Result<(), ArchiveError> {
        let value = match target.as_named_fields() {
            Some(fields) => match fields.set_field(key, value)? {
                Some(rejected) => rejected,
                None => return Ok(()),
            },
            None => value,
        };

        let value = match target.as_setters() {
            Some(setters) => match setters.call_setter(&setter_name(key), value)? {
                Some(rejected) => rejected,
                None => return Ok(()),
            },
            None => value,
        };

        if let Some(setter) = target.as_catch_all_setter() {
            return setter.set_property(key, value);
        }

        if !self.allow_dynamic_properties {
            return Err(ArchiveError::Domain(format!(
                "Cannot hydrate native {native_class} object - property {key} does not exist and dynamic properties are disabled"
            )));
        }

        match target.as_dynamic_fields() {
            Some(fields) => fields.add_dynamic_field(key, value),
            None => Err(ArchiveError::Domain(format!(
                "Cannot hydrate native {native_class} object - property {key} does not exist and the target does not accept dynamic properties"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::archive::ArchiveError,
        hydrators::{
            object::{
                AllowsDynamicFields, ArchivedObject, HasCatchAllSetter, HasNamedField,
                HasSetterConvention,
            },
            populator::{setter_name, Populator},
        },
        models::{Hydrated, Properties},
    };

    #[derive(Debug, Default)]
    struct Track {
        title: Option<String>,
        length: i64,
        extra: Properties,
    }

    impl HasNamedField for Track {
        fn set_field(
            &mut self,
            name: &str,
            value: Hydrated,
        ) -> Result<Option<Hydrated>, ArchiveError> {
            match name {
                "title" => match value {
                    Hydrated::String(text) => self.title = Some(text),
                    other => return Err(ArchiveError::field_mismatch(name, "string", &other)),
                },
                _ => return Ok(Some(value)),
            }
            Ok(None)
        }
    }

    impl HasSetterConvention for Track {
        fn call_setter(
            &mut self,
            setter: &str,
            value: Hydrated,
        ) -> Result<Option<Hydrated>, ArchiveError> {
            match setter {
                "setLength" => {
                    self.length = value
                        .as_i64()
                        .ok_or_else(|| ArchiveError::field_mismatch("length", "integer", &value))?;
                    Ok(None)
                }
                _ => Ok(Some(value)),
            }
        }
    }

    impl AllowsDynamicFields for Track {
        fn add_dynamic_field(&mut self, name: &str, value: Hydrated) -> Result<(), ArchiveError> {
            self.extra.insert(name.to_string(), value);
            Ok(())
        }
    }

    impl ArchivedObject for Track {
        fn as_named_fields(&mut self) -> Option<&mut dyn HasNamedField> {
            Some(self)
        }

        fn as_setters(&mut self) -> Option<&mut dyn HasSetterConvention> {
            Some(self)
        }

        fn as_dynamic_fields(&mut self) -> Option<&mut dyn AllowsDynamicFields> {
            Some(self)
        }
    }

    #[derive(Debug, Default)]
    struct Bag {
        seen: Vec<String>,
    }

    impl HasCatchAllSetter for Bag {
        fn set_property(&mut self, name: &str, _: Hydrated) -> Result<(), ArchiveError> {
            self.seen.push(name.to_string());
            Ok(())
        }
    }

    impl ArchivedObject for Bag {
        fn as_catch_all_setter(&mut self) -> Option<&mut dyn HasCatchAllSetter> {
            Some(self)
        }
    }

    fn properties() -> Properties {
        Properties::from([
            ("title".to_string(), Hydrated::from("Intro")),
            ("length".to_string(), Hydrated::from(93_i64)),
        ])
    }

    #[test]
    fn can_build_setter_names() {
        assert_eq!(setter_name("title"), "setTitle");
        assert_eq!(setter_name("URL"), "setURL");
        assert_eq!(setter_name("ärger"), "setÄrger");
        assert_eq!(setter_name(""), "set");
    }

    #[test]
    fn can_populate_fields_and_setters() {
        let mut track = Track::default();
        Populator::new(false)
            .populate(&mut track, "Track", properties())
            .unwrap();

        assert_eq!(track.title.as_deref(), Some("Intro"));
        assert_eq!(track.length, 93);
        assert!(track.extra.is_empty());
    }

    #[test]
    fn cant_populate_unknown_property_when_strict() {
        let mut track = Track::default();
        let mut properties = properties();
        properties.insert("genre".to_string(), Hydrated::from("jazz"));

        let error = Populator::new(false)
            .populate(&mut track, "Track", properties)
            .unwrap_err();
        assert!(matches!(error, ArchiveError::Domain(_)));
        assert!(error.to_string().contains("genre"));
    }

    #[test]
    fn can_populate_dynamic_property() {
        let mut track = Track::default();
        let mut properties = properties();
        properties.insert("genre".to_string(), Hydrated::from("jazz"));

        Populator::new(true)
            .populate(&mut track, "Track", properties)
            .unwrap();
        assert_eq!(track.extra.get("genre"), Some(&Hydrated::from("jazz")));
    }

    #[test]
    fn cant_populate_mismatched_field() {
        let mut track = Track::default();
        let error = Populator::new(true)
            .populate(
                &mut track,
                "Track",
                Properties::from([("title".to_string(), Hydrated::from(1_i64))]),
            )
            .unwrap_err();
        assert!(matches!(error, ArchiveError::Malformed(_)));
    }

    #[test]
    fn can_populate_catch_all() {
        let mut bag = Bag::default();
        Populator::default()
            .populate(&mut bag, "Bag", properties())
            .unwrap();
        assert_eq!(bag.seen, vec!["length", "title"]);
    }
}
