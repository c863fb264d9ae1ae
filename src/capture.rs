//! Custom serde Serializer that records the top-level fields of a struct
//! together with the kind each field declares.
//!
//! `Serialize` impls call `serialize_u16` for a `u16` field no matter what
//! value it holds, so the method serde picks is the field's declared kind.
//! Compound field values (options, sequences, maps, nested structs) are
//! reported as [`ValueKind::Unsupported`] and never descended into, except
//! that `Some(x)` still records the text of `x` so it can be persisted.

use std::fmt;

use serde::ser::{self, Impossible, Serialize};
use thiserror::Error;

use crate::types::{FieldValue, ValueKind};

/// A field's declared kind plus its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Captured {
    pub kind: ValueKind,
    pub value: FieldValue,
}

impl Captured {
    fn new(kind: ValueKind, value: FieldValue) -> Self {
        Self { kind, value }
    }

    fn opaque(label: &'static str) -> Self {
        Self::new(ValueKind::Unsupported(label), FieldValue::Opaque)
    }
}

/// Capture the serialized top-level fields of `source`, in declaration order.
///
/// `source` must serialize as a struct, either directly or through one level
/// of newtype / `Some` wrapping. Fields skipped by serde are not reported.
pub fn capture<S: Serialize + ?Sized>(
    source: &S,
) -> Result<Vec<(&'static str, Captured)>, CaptureError> {
    source.serialize(RecordSerializer { unwrapped: false })
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("unsupported shape: {0}")]
    UnsupportedShape(&'static str),

    #[error("capture error: {0}")]
    Custom(String),
}

impl ser::Error for CaptureError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        CaptureError::Custom(msg.to_string())
    }
}

// ---------------------------------------------------------------------------
// Record level: only structs are accepted
// ---------------------------------------------------------------------------

type Fields = Vec<(&'static str, Captured)>;

struct RecordSerializer {
    unwrapped: bool,
}

impl RecordSerializer {
    fn reject(shape: &'static str) -> Result<Fields, CaptureError> {
        Err(CaptureError::UnsupportedShape(shape))
    }
}

impl ser::Serializer for RecordSerializer {
    type Ok = Fields;
    type Error = CaptureError;
    type SerializeSeq = Impossible<Fields, CaptureError>;
    type SerializeTuple = Impossible<Fields, CaptureError>;
    type SerializeTupleStruct = Impossible<Fields, CaptureError>;
    type SerializeTupleVariant = Impossible<Fields, CaptureError>;
    type SerializeMap = Impossible<Fields, CaptureError>;
    type SerializeStruct = RecordFields;
    type SerializeStructVariant = Impossible<Fields, CaptureError>;

    fn serialize_bool(self, _v: bool) -> Result<Fields, CaptureError> {
        Self::reject("bool")
    }

    fn serialize_i8(self, _v: i8) -> Result<Fields, CaptureError> {
        Self::reject("integer")
    }

    fn serialize_i16(self, _v: i16) -> Result<Fields, CaptureError> {
        Self::reject("integer")
    }

    fn serialize_i32(self, _v: i32) -> Result<Fields, CaptureError> {
        Self::reject("integer")
    }

    fn serialize_i64(self, _v: i64) -> Result<Fields, CaptureError> {
        Self::reject("integer")
    }

    fn serialize_u8(self, _v: u8) -> Result<Fields, CaptureError> {
        Self::reject("integer")
    }

    fn serialize_u16(self, _v: u16) -> Result<Fields, CaptureError> {
        Self::reject("integer")
    }

    fn serialize_u32(self, _v: u32) -> Result<Fields, CaptureError> {
        Self::reject("integer")
    }

    fn serialize_u64(self, _v: u64) -> Result<Fields, CaptureError> {
        Self::reject("integer")
    }

    fn serialize_f32(self, _v: f32) -> Result<Fields, CaptureError> {
        Self::reject("float")
    }

    fn serialize_f64(self, _v: f64) -> Result<Fields, CaptureError> {
        Self::reject("float")
    }

    fn serialize_char(self, _v: char) -> Result<Fields, CaptureError> {
        Self::reject("char")
    }

    fn serialize_str(self, _v: &str) -> Result<Fields, CaptureError> {
        Self::reject("string")
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Fields, CaptureError> {
        Self::reject("bytes")
    }

    fn serialize_none(self) -> Result<Fields, CaptureError> {
        Self::reject("none")
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Fields, CaptureError> {
        if self.unwrapped {
            return Self::reject("nested option");
        }
        value.serialize(RecordSerializer { unwrapped: true })
    }

    fn serialize_unit(self) -> Result<Fields, CaptureError> {
        Self::reject("unit")
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Fields, CaptureError> {
        Self::reject("unit struct")
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Fields, CaptureError> {
        Self::reject("enum")
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Fields, CaptureError> {
        if self.unwrapped {
            return Self::reject("nested newtype");
        }
        value.serialize(RecordSerializer { unwrapped: true })
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Fields, CaptureError> {
        Self::reject("enum")
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, CaptureError> {
        Err(CaptureError::UnsupportedShape("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, CaptureError> {
        Err(CaptureError::UnsupportedShape("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, CaptureError> {
        Err(CaptureError::UnsupportedShape("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, CaptureError> {
        Err(CaptureError::UnsupportedShape("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, CaptureError> {
        Err(CaptureError::UnsupportedShape("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, CaptureError> {
        Ok(RecordFields {
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, CaptureError> {
        Err(CaptureError::UnsupportedShape("enum"))
    }
}

struct RecordFields {
    fields: Fields,
}

impl ser::SerializeStruct for RecordFields {
    type Ok = Fields;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), CaptureError> {
        let captured = value.serialize(ValueSerializer)?;
        self.fields.push((key, captured));
        Ok(())
    }

    fn end(self) -> Result<Fields, CaptureError> {
        Ok(self.fields)
    }
}

// ---------------------------------------------------------------------------
// Field level: one Captured per field
// ---------------------------------------------------------------------------

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Captured;
    type Error = CaptureError;
    type SerializeSeq = OpaqueSink;
    type SerializeTuple = OpaqueSink;
    type SerializeTupleStruct = OpaqueSink;
    type SerializeTupleVariant = OpaqueSink;
    type SerializeMap = OpaqueSink;
    type SerializeStruct = OpaqueSink;
    type SerializeStructVariant = OpaqueSink;

    fn serialize_bool(self, v: bool) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::Bool, FieldValue::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::I8, FieldValue::Int(v.into())))
    }

    fn serialize_i16(self, v: i16) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::I16, FieldValue::Int(v.into())))
    }

    fn serialize_i32(self, v: i32) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::I32, FieldValue::Int(v.into())))
    }

    fn serialize_i64(self, v: i64) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::I64, FieldValue::Int(v)))
    }

    fn serialize_i128(self, _v: i128) -> Result<Captured, CaptureError> {
        Ok(Captured::opaque("i128"))
    }

    fn serialize_u8(self, v: u8) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::U8, FieldValue::Uint(v.into())))
    }

    fn serialize_u16(self, v: u16) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::U16, FieldValue::Uint(v.into())))
    }

    fn serialize_u32(self, v: u32) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::U32, FieldValue::Uint(v.into())))
    }

    fn serialize_u64(self, v: u64) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::U64, FieldValue::Uint(v)))
    }

    fn serialize_u128(self, _v: u128) -> Result<Captured, CaptureError> {
        Ok(Captured::opaque("u128"))
    }

    fn serialize_f32(self, v: f32) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::F32, FieldValue::F32(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::F64, FieldValue::F64(v)))
    }

    fn serialize_char(self, v: char) -> Result<Captured, CaptureError> {
        Ok(Captured::new(
            ValueKind::Unsupported("char"),
            FieldValue::Str(v.to_string()),
        ))
    }

    fn serialize_str(self, v: &str) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::String, FieldValue::Str(v.to_string())))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Captured, CaptureError> {
        Ok(Captured::opaque("bytes"))
    }

    fn serialize_none(self) -> Result<Captured, CaptureError> {
        Ok(Captured::new(ValueKind::Unsupported("option"), FieldValue::Absent))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Captured, CaptureError> {
        let inner = value.serialize(ValueSerializer)?;
        Ok(Captured::new(ValueKind::Unsupported("option"), inner.value))
    }

    fn serialize_unit(self) -> Result<Captured, CaptureError> {
        Ok(Captured::opaque("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Captured, CaptureError> {
        Ok(Captured::opaque("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Captured, CaptureError> {
        Ok(Captured::new(
            ValueKind::Unsupported("enum"),
            FieldValue::Str(variant.to_string()),
        ))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Captured, CaptureError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Captured, CaptureError> {
        Ok(Captured::opaque("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<OpaqueSink, CaptureError> {
        Ok(OpaqueSink("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<OpaqueSink, CaptureError> {
        Ok(OpaqueSink("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<OpaqueSink, CaptureError> {
        Ok(OpaqueSink("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<OpaqueSink, CaptureError> {
        Ok(OpaqueSink("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<OpaqueSink, CaptureError> {
        Ok(OpaqueSink("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<OpaqueSink, CaptureError> {
        Ok(OpaqueSink("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<OpaqueSink, CaptureError> {
        Ok(OpaqueSink("enum"))
    }
}

/// Swallows the contents of a compound value and reports it as unsupported.
struct OpaqueSink(&'static str);

impl OpaqueSink {
    fn finish(self) -> Result<Captured, CaptureError> {
        Ok(Captured::opaque(self.0))
    }
}

impl ser::SerializeSeq for OpaqueSink {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<(), CaptureError> {
        Ok(())
    }

    fn end(self) -> Result<Captured, CaptureError> {
        self.finish()
    }
}

impl ser::SerializeTuple for OpaqueSink {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<(), CaptureError> {
        Ok(())
    }

    fn end(self) -> Result<Captured, CaptureError> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for OpaqueSink {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<(), CaptureError> {
        Ok(())
    }

    fn end(self) -> Result<Captured, CaptureError> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for OpaqueSink {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<(), CaptureError> {
        Ok(())
    }

    fn end(self) -> Result<Captured, CaptureError> {
        self.finish()
    }
}

impl ser::SerializeMap for OpaqueSink {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, _key: &T) -> Result<(), CaptureError> {
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<(), CaptureError> {
        Ok(())
    }

    fn end(self) -> Result<Captured, CaptureError> {
        self.finish()
    }
}

impl ser::SerializeStruct for OpaqueSink {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<(), CaptureError> {
        Ok(())
    }

    fn end(self) -> Result<Captured, CaptureError> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for OpaqueSink {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<(), CaptureError> {
        Ok(())
    }

    fn end(self) -> Result<Captured, CaptureError> {
        self.finish()
    }
}
