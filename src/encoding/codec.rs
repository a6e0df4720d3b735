// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec capability interface.
//!
//! A [`DataTypeCodec`] serializes values of one data type under the wire
//! encodings it supports. The registry stores codecs as shared
//! `Arc<dyn DataTypeCodec>` references and never inspects their bodies; the
//! dispatcher routes encode/decode calls to the method matching its wire
//! form.

use std::sync::Arc;

use crate::core::{NamespaceTable, Result, UaError, UaValue};

use super::binary::{BinaryReader, BinaryWriter};
use super::xml::XmlElement;

/// Shared codec reference, as stored by every registry index.
pub type CodecRef = Arc<dyn DataTypeCodec>;

/// Context shared by all encode/decode calls.
///
/// Carries the namespace table used to resolve portable identifiers; codecs
/// that embed node ids in their output also use it to interpret namespace
/// indexes.
#[derive(Debug, Clone, Default)]
pub struct EncodingContext {
    /// The process namespace table
    pub namespaces: NamespaceTable,
}

impl EncodingContext {
    /// Create a context with the default namespace table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context around an existing namespace table.
    pub fn with_namespaces(namespaces: NamespaceTable) -> Self {
        Self { namespaces }
    }
}

/// Capability interface for one data type's codecs.
///
/// A codec implements the methods for the wire forms it was registered
/// under; the default bodies reject the call naming the type, so a type
/// registered for a subset of encodings never silently produces garbage for
/// the others.
pub trait DataTypeCodec: Send + Sync {
    /// Human-readable name of the data type this codec handles.
    fn type_name(&self) -> &str;

    /// Encode a value into the binary wire form.
    fn encode_binary(
        &self,
        _ctx: &EncodingContext,
        _value: &UaValue,
        _out: &mut BinaryWriter<'_>,
    ) -> Result<()> {
        Err(UaError::encoding(
            self.type_name(),
            "type has no binary encoding",
        ))
    }

    /// Decode a value from the binary wire form.
    fn decode_binary(
        &self,
        _ctx: &EncodingContext,
        _input: &mut BinaryReader<'_>,
    ) -> Result<UaValue> {
        Err(UaError::decoding(
            self.type_name(),
            "type has no binary encoding",
        ))
    }

    /// Encode a value into an XML element.
    fn encode_xml(&self, _ctx: &EncodingContext, _value: &UaValue) -> Result<XmlElement> {
        Err(UaError::encoding(
            self.type_name(),
            "type has no XML encoding",
        ))
    }

    /// Decode a value from an XML element.
    fn decode_xml(&self, _ctx: &EncodingContext, _element: &XmlElement) -> Result<UaValue> {
        Err(UaError::decoding(
            self.type_name(),
            "type has no XML encoding",
        ))
    }

    /// Encode a value into a JSON value.
    fn encode_json(&self, _ctx: &EncodingContext, _value: &UaValue) -> Result<serde_json::Value> {
        Err(UaError::encoding(
            self.type_name(),
            "type has no JSON encoding",
        ))
    }

    /// Decode a value from a JSON value.
    fn decode_json(&self, _ctx: &EncodingContext, _value: &serde_json::Value) -> Result<UaValue> {
        Err(UaError::decoding(
            self.type_name(),
            "type has no JSON encoding",
        ))
    }
}
