//! Serialization of Rust values into a single [`Record`].
//!
//! ## Overview
//!
//! A record is flat, so only flat shapes are accepted:
//!
//! - **Structs, tuples, tuple structs, sequences**: one field per member, in
//!   declaration order (field names are not written)
//! - **Scalars**: a one-field record
//! - **Options**: `None` becomes an empty field
//! - **Unit enum variants**: the variant name
//!
//! Nested compounds, maps and data-carrying enum variants are rejected with
//! [`Error::UnsupportedType`].
//!
//! ## Usage
//!
//! ```rust
//! use serde_asv::{to_record, Record};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Trade { symbol: String, qty: u32, price: f64, note: Option<String> }
//!
//! let trade = Trade { symbol: "ACME".into(), qty: 10, price: 12.5, note: None };
//! let record = to_record(&trade).unwrap();
//! assert_eq!(record, Record::from(["ACME", "10", "12.5", ""]));
//! ```

use crate::{Error, Record, Result};
use serde::ser::{self, Impossible, Serialize, Serializer as _};

/// Collects a value into the fields of one [`Record`].
#[derive(Debug, Default)]
pub struct Serializer {
    record: Record,
}

impl Serializer {
    pub fn new() -> Self {
        Serializer {
            record: Record::new(),
        }
    }

    pub fn into_inner(self) -> Record {
        self.record
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let field = value.serialize(FieldSerializer)?;
        self.record.push_field(field);
        Ok(())
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.push(&v)
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.push(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        self.record.push_field(v);
        Ok(())
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        self.record.push_field(b"");
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.serialize_none()
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_none()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type(&format!(
            "enum variant {}::{} carries data",
            name, variant
        )))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(Compound::new(self))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(Compound::new(self))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(Compound::new(self))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type(&format!(
            "enum variant {}::{} carries data",
            name, variant
        )))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported_type(
            "maps have no record representation",
        ))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(Compound::new(self))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type(&format!(
            "enum variant {}::{} carries data",
            name, variant
        )))
    }
}

/// Writes the members of a struct, tuple or sequence as consecutive fields.
pub struct Compound<'a> {
    ser: &'a mut Serializer,
}

impl<'a> Compound<'a> {
    fn new(ser: &'a mut Serializer) -> Self {
        Compound { ser }
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.push(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.push(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.push(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.push(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Renders one scalar into the bytes of a single field.
struct FieldSerializer;

impl FieldSerializer {
    fn nested(what: &str) -> Error {
        Error::unsupported_type(&format!("{} nested inside a record field", what))
    }
}

impl ser::Serializer for FieldSerializer {
    type Ok = Vec<u8>;
    type Error = Error;

    type SerializeSeq = Impossible<Vec<u8>, Error>;
    type SerializeTuple = Impossible<Vec<u8>, Error>;
    type SerializeTupleStruct = Impossible<Vec<u8>, Error>;
    type SerializeTupleVariant = Impossible<Vec<u8>, Error>;
    type SerializeMap = Impossible<Vec<u8>, Error>;
    type SerializeStruct = Impossible<Vec<u8>, Error>;
    type SerializeStructVariant = Impossible<Vec<u8>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(if v { b"true".to_vec() } else { b"false".to_vec() })
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        Ok(v.to_string().into_bytes())
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        Ok(v.to_string().into_bytes())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        Ok(v.to_string().into_bytes())
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        Ok(v.to_string().into_bytes())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        Ok(v.to_string().into_bytes())
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        Ok(v.to_string().into_bytes())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(v.to_string().into_bytes())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(v.as_bytes().to_vec())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        Ok(v.to_vec())
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(Self::nested("data-carrying enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Self::nested("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Self::nested("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Self::nested("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Self::nested("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Self::nested("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Self::nested("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Self::nested("struct variant"))
    }
}
