// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoding dispatch.
//!
//! A [`DataTypeEncoding`] serves exactly one wire form: it resolves the
//! codec for a given encoding id through the registry and performs the
//! encode or decode call. Portable identifiers are resolved against the
//! context's namespace table first; an unknown namespace URI fails before
//! any registry state is touched.

use std::sync::Arc;

use crate::core::{EncodingKind, ExpandedNodeId, NodeId, Result, UaError, UaValue};
use crate::registry::DataTypeRegistry;
use crate::types::BufferPool;

use super::binary::{BinaryReader, BinaryWriter};
use super::codec::EncodingContext;
use super::xml::XmlElement;

/// A fully-formed wire value produced by [`DataTypeEncoding::encode`].
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedBody {
    /// Binary-encoded bytes
    Binary(Vec<u8>),
    /// XML element tree
    Xml(XmlElement),
    /// JSON value
    Json(serde_json::Value),
}

impl EncodedBody {
    /// The wire form this body carries.
    pub fn kind(&self) -> EncodingKind {
        match self {
            EncodedBody::Binary(_) => EncodingKind::Binary,
            EncodedBody::Xml(_) => EncodingKind::Xml,
            EncodedBody::Json(_) => EncodingKind::Json,
        }
    }
}

/// Codec dispatcher for one wire encoding.
///
/// One instance exists per [`EncodingKind`]; all instances share the same
/// registry. The binary instance encodes through a pooled scratch buffer
/// that returns to its pool on every exit path.
pub struct DataTypeEncoding {
    kind: EncodingKind,
    registry: Arc<DataTypeRegistry>,
    pool: BufferPool,
}

impl DataTypeEncoding {
    /// Create a dispatcher for the given wire form.
    pub fn new(kind: EncodingKind, registry: Arc<DataTypeRegistry>) -> Self {
        Self {
            kind,
            registry,
            pool: BufferPool::new(),
        }
    }

    /// Create the binary dispatcher.
    pub fn binary(registry: Arc<DataTypeRegistry>) -> Self {
        Self::new(EncodingKind::Binary, registry)
    }

    /// Create the XML dispatcher.
    pub fn xml(registry: Arc<DataTypeRegistry>) -> Self {
        Self::new(EncodingKind::Xml, registry)
    }

    /// Create the JSON dispatcher.
    pub fn json(registry: Arc<DataTypeRegistry>) -> Self {
        Self::new(EncodingKind::Json, registry)
    }

    /// The wire form this dispatcher serves.
    pub fn kind(&self) -> EncodingKind {
        self.kind
    }

    /// Encode a value through the codec registered under `encoding_id`.
    pub fn encode(
        &self,
        ctx: &EncodingContext,
        value: &UaValue,
        encoding_id: &NodeId,
    ) -> Result<EncodedBody> {
        let codec = self
            .registry
            .codec_for_encoding_id(encoding_id)
            .ok_or_else(|| UaError::no_encoder(encoding_id))?;

        match self.kind {
            EncodingKind::Binary => {
                let mut buffer = self.pool.acquire_default();
                let mut writer = BinaryWriter::new(buffer.as_mut());
                codec.encode_binary(ctx, value, &mut writer)?;
                Ok(EncodedBody::Binary(buffer.as_ref().to_vec()))
            }
            EncodingKind::Xml => Ok(EncodedBody::Xml(codec.encode_xml(ctx, value)?)),
            EncodingKind::Json => Ok(EncodedBody::Json(codec.encode_json(ctx, value)?)),
        }
    }

    /// Encode via a portable encoding id.
    ///
    /// The id is resolved against the context's namespace table first; an
    /// unknown namespace URI is an encoding error carrying that URI.
    pub fn encode_expanded(
        &self,
        ctx: &EncodingContext,
        value: &UaValue,
        encoding_id: &ExpandedNodeId,
    ) -> Result<EncodedBody> {
        match encoding_id.resolve(&ctx.namespaces) {
            Some(local) => self.encode(ctx, value, &local),
            None => Err(UaError::namespace_not_registered_encoding(
                encoding_id.namespace_uri.clone().unwrap_or_default(),
            )),
        }
    }

    /// Decode a wire body through the codec registered under `encoding_id`.
    ///
    /// The body must carry this dispatcher's wire form; codec-internal
    /// failures propagate unchanged.
    pub fn decode(
        &self,
        ctx: &EncodingContext,
        body: &EncodedBody,
        encoding_id: &NodeId,
    ) -> Result<UaValue> {
        let codec = self
            .registry
            .codec_for_encoding_id(encoding_id)
            .ok_or_else(|| UaError::no_decoder(encoding_id))?;

        match (self.kind, body) {
            (EncodingKind::Binary, EncodedBody::Binary(bytes)) => {
                codec.decode_binary(ctx, &mut BinaryReader::new(bytes))
            }
            (EncodingKind::Xml, EncodedBody::Xml(element)) => codec.decode_xml(ctx, element),
            (EncodingKind::Json, EncodedBody::Json(value)) => codec.decode_json(ctx, value),
            (expected, body) => Err(UaError::decoding(
                encoding_id.to_string(),
                format!("expected a {expected} body, got {}", body.kind()),
            )),
        }
    }

    /// Decode via a portable encoding id.
    pub fn decode_expanded(
        &self,
        ctx: &EncodingContext,
        body: &EncodedBody,
        encoding_id: &ExpandedNodeId,
    ) -> Result<UaValue> {
        match encoding_id.resolve(&ctx.namespaces) {
            Some(local) => self.decode(ctx, body, &local),
            None => Err(UaError::namespace_not_registered_decoding(
                encoding_id.namespace_uri.clone().unwrap_or_default(),
            )),
        }
    }
}
