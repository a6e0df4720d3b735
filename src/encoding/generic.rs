// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-less generic codecs.
//!
//! [`GenericStructCodec`] serializes any [`UaValue`] through a
//! self-describing layout: a tag-driven binary form, a typed-element XML
//! form, and the natural serde JSON mapping. [`GenericEnumCodec`] handles
//! enumerated values, which travel as their numeric representation.
//!
//! These codecs back the built-in bootstrap table; generated per-type
//! codecs with fixed field layouts plug in through the same
//! [`DataTypeCodec`] interface.

use crate::core::{FieldMap, NodeId, Result, UaError, UaValue};

use super::binary::{BinaryReader, BinaryWriter};
use super::codec::{DataTypeCodec, EncodingContext};
use super::xml::XmlElement;

// Binary tags for the self-describing layout.
const TAG_NULL: u8 = 0;
const TAG_BOOLEAN: u8 = 1;
const TAG_SBYTE: u8 = 2;
const TAG_BYTE: u8 = 3;
const TAG_INT16: u8 = 4;
const TAG_UINT16: u8 = 5;
const TAG_INT32: u8 = 6;
const TAG_UINT32: u8 = 7;
const TAG_INT64: u8 = 8;
const TAG_UINT64: u8 = 9;
const TAG_FLOAT: u8 = 10;
const TAG_DOUBLE: u8 = 11;
const TAG_STRING: u8 = 12;
const TAG_DATE_TIME: u8 = 13;
const TAG_GUID: u8 = 14;
const TAG_BYTE_STRING: u8 = 15;
const TAG_NODE_ID: u8 = 16;
const TAG_STATUS_CODE: u8 = 17;
const TAG_ENUM: u8 = 18;
const TAG_ARRAY: u8 = 19;
const TAG_STRUCT: u8 = 20;

/// Name given to XML array item elements.
const ARRAY_ITEM_NAME: &str = "Element";

/// Generic structure codec.
///
/// One instance per registered data type; the instance only carries the
/// type name it reports in diagnostics.
pub struct GenericStructCodec {
    type_name: String,
}

impl GenericStructCodec {
    /// Create a codec for the named data type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl DataTypeCodec for GenericStructCodec {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn encode_binary(
        &self,
        _ctx: &EncodingContext,
        value: &UaValue,
        out: &mut BinaryWriter<'_>,
    ) -> Result<()> {
        write_value(out, value);
        Ok(())
    }

    fn decode_binary(
        &self,
        _ctx: &EncodingContext,
        input: &mut BinaryReader<'_>,
    ) -> Result<UaValue> {
        read_value(input)
    }

    fn encode_xml(&self, _ctx: &EncodingContext, value: &UaValue) -> Result<XmlElement> {
        Ok(value_to_xml(&self.type_name, value))
    }

    fn decode_xml(&self, _ctx: &EncodingContext, element: &XmlElement) -> Result<UaValue> {
        xml_to_value(element)
    }

    fn encode_json(&self, _ctx: &EncodingContext, value: &UaValue) -> Result<serde_json::Value> {
        serde_json::to_value(value).map_err(|e| UaError::encoding(&self.type_name, e.to_string()))
    }

    fn decode_json(&self, _ctx: &EncodingContext, value: &serde_json::Value) -> Result<UaValue> {
        serde_json::from_value(value.clone())
            .map_err(|e| UaError::decoding(&self.type_name, e.to_string()))
    }
}

/// Generic enumerated-type codec.
///
/// Enumerated values have no wire encoding distinct from their numeric
/// representation: an i32 in binary, a numeric element in XML, a bare
/// number in JSON.
pub struct GenericEnumCodec {
    type_name: String,
}

impl GenericEnumCodec {
    /// Create a codec for the named enumerated type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    fn expect_enum(&self, value: &UaValue) -> Result<i32> {
        match value {
            UaValue::Enum(v) => Ok(*v),
            other => Err(UaError::encoding(
                &self.type_name,
                format!("expected an Enum value, got {}", other.type_name()),
            )),
        }
    }
}

impl DataTypeCodec for GenericEnumCodec {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn encode_binary(
        &self,
        _ctx: &EncodingContext,
        value: &UaValue,
        out: &mut BinaryWriter<'_>,
    ) -> Result<()> {
        out.write_i32(self.expect_enum(value)?);
        Ok(())
    }

    fn decode_binary(
        &self,
        _ctx: &EncodingContext,
        input: &mut BinaryReader<'_>,
    ) -> Result<UaValue> {
        Ok(UaValue::Enum(input.read_i32()?))
    }

    fn encode_xml(&self, _ctx: &EncodingContext, value: &UaValue) -> Result<XmlElement> {
        Ok(XmlElement::new(self.type_name.clone())
            .with_text(self.expect_enum(value)?.to_string()))
    }

    fn decode_xml(&self, _ctx: &EncodingContext, element: &XmlElement) -> Result<UaValue> {
        let value = element
            .text_content()
            .parse::<i32>()
            .map_err(|e| UaError::decoding(&self.type_name, e.to_string()))?;
        Ok(UaValue::Enum(value))
    }

    fn encode_json(&self, _ctx: &EncodingContext, value: &UaValue) -> Result<serde_json::Value> {
        Ok(serde_json::Value::from(self.expect_enum(value)?))
    }

    fn decode_json(&self, _ctx: &EncodingContext, value: &serde_json::Value) -> Result<UaValue> {
        let number = value
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| {
                UaError::decoding(&self.type_name, "expected an i32 enumeration value")
            })?;
        Ok(UaValue::Enum(number))
    }
}

// ============================================================================
// Binary layout
// ============================================================================

fn write_value(out: &mut BinaryWriter<'_>, value: &UaValue) {
    match value {
        UaValue::Null => out.write_u8(TAG_NULL),
        UaValue::Boolean(v) => {
            out.write_u8(TAG_BOOLEAN);
            out.write_bool(*v);
        }
        UaValue::SByte(v) => {
            out.write_u8(TAG_SBYTE);
            out.write_i8(*v);
        }
        UaValue::Byte(v) => {
            out.write_u8(TAG_BYTE);
            out.write_u8(*v);
        }
        UaValue::Int16(v) => {
            out.write_u8(TAG_INT16);
            out.write_i16(*v);
        }
        UaValue::UInt16(v) => {
            out.write_u8(TAG_UINT16);
            out.write_u16(*v);
        }
        UaValue::Int32(v) => {
            out.write_u8(TAG_INT32);
            out.write_i32(*v);
        }
        UaValue::UInt32(v) => {
            out.write_u8(TAG_UINT32);
            out.write_u32(*v);
        }
        UaValue::Int64(v) => {
            out.write_u8(TAG_INT64);
            out.write_i64(*v);
        }
        UaValue::UInt64(v) => {
            out.write_u8(TAG_UINT64);
            out.write_u64(*v);
        }
        UaValue::Float(v) => {
            out.write_u8(TAG_FLOAT);
            out.write_f32(*v);
        }
        UaValue::Double(v) => {
            out.write_u8(TAG_DOUBLE);
            out.write_f64(*v);
        }
        UaValue::String(v) => {
            out.write_u8(TAG_STRING);
            out.write_string(v);
        }
        UaValue::DateTime(v) => {
            out.write_u8(TAG_DATE_TIME);
            out.write_i64(*v);
        }
        UaValue::Guid(v) => {
            out.write_u8(TAG_GUID);
            out.write_guid(v);
        }
        UaValue::ByteString(v) => {
            out.write_u8(TAG_BYTE_STRING);
            out.write_byte_string(v);
        }
        UaValue::NodeId(v) => {
            out.write_u8(TAG_NODE_ID);
            out.write_node_id(v);
        }
        UaValue::StatusCode(v) => {
            out.write_u8(TAG_STATUS_CODE);
            out.write_u32(*v);
        }
        UaValue::Enum(v) => {
            out.write_u8(TAG_ENUM);
            out.write_i32(*v);
        }
        UaValue::Array(values) => {
            out.write_u8(TAG_ARRAY);
            out.write_i32(values.len() as i32);
            for item in values {
                write_value(out, item);
            }
        }
        UaValue::Struct(fields) => {
            out.write_u8(TAG_STRUCT);
            out.write_i32(fields.len() as i32);
            for (name, item) in fields {
                out.write_string(name);
                write_value(out, item);
            }
        }
    }
}

fn read_value(input: &mut BinaryReader<'_>) -> Result<UaValue> {
    let tag = input.read_u8()?;
    let value = match tag {
        TAG_NULL => UaValue::Null,
        TAG_BOOLEAN => UaValue::Boolean(input.read_bool()?),
        TAG_SBYTE => UaValue::SByte(input.read_i8()?),
        TAG_BYTE => UaValue::Byte(input.read_u8()?),
        TAG_INT16 => UaValue::Int16(input.read_i16()?),
        TAG_UINT16 => UaValue::UInt16(input.read_u16()?),
        TAG_INT32 => UaValue::Int32(input.read_i32()?),
        TAG_UINT32 => UaValue::UInt32(input.read_u32()?),
        TAG_INT64 => UaValue::Int64(input.read_i64()?),
        TAG_UINT64 => UaValue::UInt64(input.read_u64()?),
        TAG_FLOAT => UaValue::Float(input.read_f32()?),
        TAG_DOUBLE => UaValue::Double(input.read_f64()?),
        TAG_STRING => UaValue::String(input.read_string()?),
        TAG_DATE_TIME => UaValue::DateTime(input.read_i64()?),
        TAG_GUID => UaValue::Guid(input.read_guid()?),
        TAG_BYTE_STRING => UaValue::ByteString(input.read_byte_string()?),
        TAG_NODE_ID => UaValue::NodeId(input.read_node_id()?),
        TAG_STATUS_CODE => UaValue::StatusCode(input.read_u32()?),
        TAG_ENUM => UaValue::Enum(input.read_i32()?),
        TAG_ARRAY => {
            let count = read_count(input, "array")?;
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(read_value(input)?);
            }
            UaValue::Array(values)
        }
        TAG_STRUCT => {
            let count = read_count(input, "struct")?;
            let mut fields = FieldMap::new();
            for _ in 0..count {
                let name = input.read_string()?;
                fields.insert(name, read_value(input)?);
            }
            UaValue::Struct(fields)
        }
        other => {
            return Err(UaError::decoding(
                "value",
                format!("unknown value tag {other}"),
            ))
        }
    };
    Ok(value)
}

fn read_count(input: &mut BinaryReader<'_>, context: &str) -> Result<usize> {
    let count = input.read_i32()?;
    if count < 0 {
        return Err(UaError::decoding(
            context,
            format!("negative element count {count}"),
        ));
    }
    let count = count as usize;
    // A count cannot exceed one element per remaining byte
    if count > input.remaining() {
        return Err(UaError::decoding(
            context,
            format!(
                "element count {count} exceeds remaining buffer ({} bytes)",
                input.remaining()
            ),
        ));
    }
    Ok(count)
}

// ============================================================================
// XML layout
// ============================================================================

/// Attribute carrying the value's type name.
const TYPE_ATTRIBUTE: &str = "t";

fn value_to_xml(name: &str, value: &UaValue) -> XmlElement {
    let mut element = XmlElement::new(name).with_attribute(TYPE_ATTRIBUTE, value.type_name());
    match value {
        UaValue::Null => {}
        UaValue::Boolean(v) => element.text = Some(v.to_string()),
        UaValue::SByte(v) => element.text = Some(v.to_string()),
        UaValue::Byte(v) => element.text = Some(v.to_string()),
        UaValue::Int16(v) => element.text = Some(v.to_string()),
        UaValue::UInt16(v) => element.text = Some(v.to_string()),
        UaValue::Int32(v) => element.text = Some(v.to_string()),
        UaValue::UInt32(v) => element.text = Some(v.to_string()),
        UaValue::Int64(v) => element.text = Some(v.to_string()),
        UaValue::UInt64(v) => element.text = Some(v.to_string()),
        UaValue::Float(v) => element.text = Some(v.to_string()),
        UaValue::Double(v) => element.text = Some(v.to_string()),
        UaValue::String(v) => {
            if !v.is_empty() {
                element.text = Some(v.clone());
            }
        }
        UaValue::DateTime(v) => element.text = Some(v.to_string()),
        UaValue::Guid(v) => element.text = Some(v.to_string()),
        UaValue::ByteString(v) => element.text = Some(hex::encode(v)),
        UaValue::NodeId(v) => element.text = Some(v.to_string()),
        UaValue::StatusCode(v) => element.text = Some(v.to_string()),
        UaValue::Enum(v) => element.text = Some(v.to_string()),
        UaValue::Array(values) => {
            for item in values {
                element.push_child(value_to_xml(ARRAY_ITEM_NAME, item));
            }
        }
        UaValue::Struct(fields) => {
            for (field_name, item) in fields {
                element.push_child(value_to_xml(field_name, item));
            }
        }
    }
    element
}

fn xml_to_value(element: &XmlElement) -> Result<UaValue> {
    let type_name = element.attribute(TYPE_ATTRIBUTE).ok_or_else(|| {
        UaError::decoding(&element.name, "missing type attribute")
    })?;
    let text = element.text_content();

    let value = match type_name {
        "Null" => UaValue::Null,
        "Boolean" => UaValue::Boolean(parse_text(element, text)?),
        "SByte" => UaValue::SByte(parse_text(element, text)?),
        "Byte" => UaValue::Byte(parse_text(element, text)?),
        "Int16" => UaValue::Int16(parse_text(element, text)?),
        "UInt16" => UaValue::UInt16(parse_text(element, text)?),
        "Int32" => UaValue::Int32(parse_text(element, text)?),
        "UInt32" => UaValue::UInt32(parse_text(element, text)?),
        "Int64" => UaValue::Int64(parse_text(element, text)?),
        "UInt64" => UaValue::UInt64(parse_text(element, text)?),
        "Float" => UaValue::Float(parse_text(element, text)?),
        "Double" => UaValue::Double(parse_text(element, text)?),
        "String" => UaValue::String(text.to_string()),
        "DateTime" => UaValue::DateTime(parse_text(element, text)?),
        "Guid" => UaValue::Guid(
            text.parse()
                .map_err(|_| UaError::decoding(&element.name, "invalid GUID text"))?,
        ),
        "ByteString" => UaValue::ByteString(
            hex::decode(text)
                .map_err(|_| UaError::decoding(&element.name, "invalid hex text"))?,
        ),
        "NodeId" => UaValue::NodeId(text.parse::<NodeId>()?),
        "StatusCode" => UaValue::StatusCode(parse_text(element, text)?),
        "Enum" => UaValue::Enum(parse_text(element, text)?),
        "Array" => {
            let mut values = Vec::with_capacity(element.children.len());
            for child in &element.children {
                values.push(xml_to_value(child)?);
            }
            UaValue::Array(values)
        }
        "Struct" => {
            let mut fields = FieldMap::new();
            for child in &element.children {
                fields.insert(child.name.clone(), xml_to_value(child)?);
            }
            UaValue::Struct(fields)
        }
        other => {
            return Err(UaError::decoding(
                &element.name,
                format!("unknown type attribute '{other}'"),
            ))
        }
    };
    Ok(value)
}

fn parse_text<T: std::str::FromStr>(element: &XmlElement, text: &str) -> Result<T> {
    text.parse().map_err(|_| {
        UaError::decoding(&element.name, format!("invalid text content '{text}'"))
    })
}
