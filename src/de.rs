//! Deserialization of a single [`Record`] into Rust values.
//!
//! Fields map onto struct members, tuple elements or sequence items by
//! position. Each field is read as UTF-8 text and parsed into the target
//! type; an empty field is `None` for `Option` members. A record with more
//! fields than the target consumes is rejected.
//!
//! ```rust
//! use serde_asv::{from_record, Record};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Trade { symbol: String, qty: u32, price: f64, note: Option<String> }
//!
//! let record = Record::from(["ACME", "10", "12.5", ""]);
//! let trade: Trade = from_record(&record).unwrap();
//! assert_eq!(trade, Trade { symbol: "ACME".into(), qty: 10, price: 12.5, note: None });
//! ```

use crate::{Error, Record, Result};
use serde::de::value::StrDeserializer;
use serde::de::{self, Deserializer as _, IntoDeserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Deserializes Rust values from the fields of one [`Record`].
pub struct Deserializer<'de> {
    record: &'de Record,
}

impl<'de> Deserializer<'de> {
    /// Creates a deserializer over the fields of `record`.
    pub fn new(record: &'de Record) -> Self {
        Deserializer { record }
    }

    fn single_field(&self) -> Result<FieldDeserializer<'de>> {
        match self.record.len() {
            1 => Ok(FieldDeserializer::new(0, self.record.get(0).unwrap_or_default())),
            n => Err(Error::custom(format!(
                "expected a record with 1 field, found {}",
                n
            ))),
        }
    }

    fn visit_fields<V>(&self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut seq = FieldSeq::new(self.record);
        let value = visitor.visit_seq(&mut seq)?;
        if seq.index < self.record.len() {
            return Err(Error::custom(format!(
                "expected a record with {} fields, found {}",
                seq.index,
                self.record.len()
            )));
        }
        Ok(value)
    }
}

macro_rules! forward_to_single_field {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                self.single_field()?.$method(visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_fields(visitor)
    }

    forward_to_single_field! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32
        deserialize_i64 deserialize_i128 deserialize_u8 deserialize_u16
        deserialize_u32 deserialize_u64 deserialize_u128 deserialize_f32
        deserialize_f64 deserialize_char deserialize_str deserialize_string
        deserialize_bytes deserialize_byte_buf deserialize_unit deserialize_identifier
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.single_field()?.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_fields(visitor)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type(
            "maps have no record representation",
        ))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.single_field()?
            .deserialize_enum(name, variants, visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct FieldSeq<'de> {
    record: &'de Record,
    index: usize,
}

impl<'de> FieldSeq<'de> {
    fn new(record: &'de Record) -> Self {
        FieldSeq { record, index: 0 }
    }
}

impl<'de> de::SeqAccess<'de> for FieldSeq<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.record.get(self.index) {
            Some(bytes) => {
                let field = FieldDeserializer::new(self.index, bytes);
                self.index += 1;
                seed.deserialize(field).map(Some)
            }
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.record.len() - self.index)
    }
}

/// Deserializes one field. Errors carry the field's index.
struct FieldDeserializer<'de> {
    index: usize,
    bytes: &'de [u8],
}

impl<'de> FieldDeserializer<'de> {
    fn new(index: usize, bytes: &'de [u8]) -> Self {
        FieldDeserializer { index, bytes }
    }

    fn text(&self) -> Result<&'de str> {
        std::str::from_utf8(self.bytes).map_err(|e| Error::invalid_field(self.index, e))
    }

    fn parse<T>(&self) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let text = self.text()?;
        text.parse()
            .map_err(|e| Error::invalid_field(self.index, format!("{:?}: {}", text, e)))
    }

    fn nested(&self, what: &str) -> Error {
        Error::unsupported_type(&format!(
            "{} nested inside record field {}",
            what, self.index
        ))
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.parse()?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for FieldDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match std::str::from_utf8(self.bytes) {
            Ok(text) => visitor.visit_borrowed_str(text),
            Err(_) => visitor.visit_borrowed_bytes(self.bytes),
        }
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_i128 => visit_i128,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_u128 => visit_u128,
        deserialize_f32 => visit_f32,
        deserialize_f64 => visit_f64,
        deserialize_char => visit_char,
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.text()?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.bytes)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.bytes.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.bytes.is_empty() {
            visitor.visit_unit()
        } else {
            Err(Error::invalid_field(self.index, "expected an empty field"))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.nested("sequence"))
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.nested("tuple"))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.nested("tuple struct"))
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.nested("map"))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.nested("struct"))
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant: StrDeserializer<'_, Error> = self.text()?.into_deserializer();
        visitor.visit_enum(variant)
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}
