//! String coercion for setting values.
//!
//! Primitive fields coerce through [`SettingValue`] (`Display` one
//! way, `FromStr` the other). Complex fields need an encode/decode
//! pair registered in [`ConverterRegistry`] under their `TypeId`; a
//! missing converter skips the field instead of failing the whole
//! load or save.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Marker for types the mapper coerces without a registered converter.
///
/// Covers the primitives and `String`; everything else goes through
/// the converter registry.
pub trait SettingValue: Display + FromStr + Clone + 'static {}

impl SettingValue for bool {}
impl SettingValue for char {}
impl SettingValue for i8 {}
impl SettingValue for i16 {}
impl SettingValue for i32 {}
impl SettingValue for i64 {}
impl SettingValue for u8 {}
impl SettingValue for u16 {}
impl SettingValue for u32 {}
impl SettingValue for u64 {}
impl SettingValue for f32 {}
impl SettingValue for f64 {}
impl SettingValue for String {}

/// A bidirectional string conversion for one concrete type.
struct Converter {
    encode: Box<dyn Fn(&dyn Any) -> Option<String>>,
    decode: Box<dyn Fn(&str) -> Option<Box<dyn Any>>>,
}

/// Registry of caller-supplied converters, keyed by [`TypeId`].
#[derive(Default)]
pub struct ConverterRegistry {
    converters: HashMap<TypeId, Converter>,
}

impl ConverterRegistry {
    /// Registers the encode/decode pair for `V`, replacing any
    /// previous registration.
    ///
    /// `decode` returns `None` for input it cannot parse.
    pub fn register<V: 'static>(
        &mut self,
        encode: impl Fn(&V) -> String + 'static,
        decode: impl Fn(&str) -> Option<V> + 'static,
    ) {
        self.converters.insert(
            TypeId::of::<V>(),
            Converter {
                encode: Box::new(move |value| value.downcast_ref::<V>().map(&encode)),
                decode: Box::new(move |text| {
                    decode(text).map(|value| Box::new(value) as Box<dyn Any>)
                }),
            },
        );
    }

    /// Whether a converter for `V` is registered.
    pub fn contains<V: 'static>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<V>())
    }

    pub(crate) fn encode<V: 'static>(&self, value: &V) -> Option<String> {
        let converter = self.converters.get(&TypeId::of::<V>())?;
        (converter.encode)(value)
    }

    pub(crate) fn decode<V: 'static>(&self, text: &str) -> Option<V> {
        let converter = self.converters.get(&TypeId::of::<V>())?;
        let boxed = (converter.decode)(text)?;
        boxed.downcast::<V>().ok().map(|value| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_converter_round_trips() {
        // Arrange
        let mut registry = ConverterRegistry::default();
        registry.register::<Vec<String>>(
            |list| list.join(";"),
            |text| Some(text.split(';').map(str::to_string).collect()),
        );
        let list = vec!["a".to_string(), "b".to_string()];

        // Act
        let encoded = registry.encode::<Vec<String>>(&list).unwrap();
        let decoded: Vec<String> = registry.decode(&encoded).unwrap();

        // Assert
        assert_eq!(encoded, "a;b");
        assert_eq!(decoded, list);
    }

    #[test]
    fn unregistered_type_yields_none() {
        // Arrange
        let registry = ConverterRegistry::default();

        // Act / Assert
        assert!(!registry.contains::<Vec<String>>());
        assert_eq!(registry.encode::<Vec<String>>(&Vec::new()), None);
        assert_eq!(registry.decode::<Vec<String>>("a;b"), None);
    }

    #[test]
    fn decode_failure_propagates_as_none() {
        // Arrange
        let mut registry = ConverterRegistry::default();
        registry.register::<Vec<u16>>(
            |list| {
                list.iter()
                    .map(u16::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            },
            |text| text.split(',').map(|p| p.parse().ok()).collect(),
        );

        // Act / Assert
        assert_eq!(registry.decode::<Vec<u16>>("1,nope"), None);
    }
}
