// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified value type system.
//!
//! Provides a single decoded-value representation shared by the Binary, XML,
//! and JSON codecs. All variants are serde-serializable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::id::NodeId;

/// Field name to value mapping for a decoded structure.
///
/// A `BTreeMap` keeps field iteration deterministic, so the schema-less
/// binary layout round-trips byte-for-byte.
pub type FieldMap = BTreeMap<String, UaValue>;

/// Unified value type for decoded OPC-UA data.
///
/// This enum represents values that can be decoded from the Binary, XML, or
/// JSON wire forms. It is serde-serializable and owns all of its data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UaValue {
    // Boolean
    Boolean(bool),

    // Signed integers
    SByte(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    Byte(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float(f32),
    Double(f64),

    // String (UTF-8)
    String(String),

    // Timestamp as 100-nanosecond ticks since 1601-01-01 (UTC)
    DateTime(i64),

    // GUID
    Guid(Uuid),

    // Binary payload
    ByteString(Vec<u8>),

    // Namespace-qualified identifier
    NodeId(NodeId),

    // OPC-UA status code
    StatusCode(u32),

    // Enumerated value, carried as its numeric representation
    Enum(i32),

    // Array of values
    Array(Vec<UaValue>),

    // Nested structure
    Struct(FieldMap),

    // Null value for optional fields
    Null,
}

impl UaValue {
    /// Check if this value is a numeric type (integers or floats).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            UaValue::SByte(_)
                | UaValue::Int16(_)
                | UaValue::Int32(_)
                | UaValue::Int64(_)
                | UaValue::Byte(_)
                | UaValue::UInt16(_)
                | UaValue::UInt32(_)
                | UaValue::UInt64(_)
                | UaValue::Float(_)
                | UaValue::Double(_)
        )
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, UaValue::Null)
    }

    /// Get the value as an i64, converting smaller integer types.
    ///
    /// Returns `None` for non-integer variants and for u64 values that do
    /// not fit.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            UaValue::SByte(v) => Some(i64::from(*v)),
            UaValue::Int16(v) => Some(i64::from(*v)),
            UaValue::Int32(v) => Some(i64::from(*v)),
            UaValue::Int64(v) => Some(*v),
            UaValue::Byte(v) => Some(i64::from(*v)),
            UaValue::UInt16(v) => Some(i64::from(*v)),
            UaValue::UInt32(v) => Some(i64::from(*v)),
            UaValue::UInt64(v) => i64::try_from(*v).ok(),
            UaValue::Enum(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Get the value as an f64, converting numeric types.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            UaValue::Float(v) => Some(f64::from(*v)),
            UaValue::Double(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    /// Get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            UaValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a structure field map.
    pub fn as_struct(&self) -> Option<&FieldMap> {
        match self {
            UaValue::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get the value as an array slice.
    pub fn as_array(&self) -> Option<&[UaValue]> {
        match self {
            UaValue::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            UaValue::Boolean(_) => "Boolean",
            UaValue::SByte(_) => "SByte",
            UaValue::Int16(_) => "Int16",
            UaValue::Int32(_) => "Int32",
            UaValue::Int64(_) => "Int64",
            UaValue::Byte(_) => "Byte",
            UaValue::UInt16(_) => "UInt16",
            UaValue::UInt32(_) => "UInt32",
            UaValue::UInt64(_) => "UInt64",
            UaValue::Float(_) => "Float",
            UaValue::Double(_) => "Double",
            UaValue::String(_) => "String",
            UaValue::DateTime(_) => "DateTime",
            UaValue::Guid(_) => "Guid",
            UaValue::ByteString(_) => "ByteString",
            UaValue::NodeId(_) => "NodeId",
            UaValue::StatusCode(_) => "StatusCode",
            UaValue::Enum(_) => "Enum",
            UaValue::Array(_) => "Array",
            UaValue::Struct(_) => "Struct",
            UaValue::Null => "Null",
        }
    }
}
