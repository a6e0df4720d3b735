// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Uacodec
//!
//! OPC-UA data type registry and codec dispatch library.
//!
//! This library provides the catalog layer an OPC-UA stack uses to resolve
//! "give me the codec for type X under encoding Y" in O(1):
//! - **Registry** in [`registry::manager`] - the process-wide aggregator of
//!   codec indexes, keyed by encoding id, by (encoding kind, data type id),
//!   and by namespace-scoped dictionary
//! - **Dictionaries** in [`registry::dictionary`] - per-namespace codec
//!   collections that can be built in isolation and merged in bulk
//! - **Bootstrap** in [`registry::builtin`] - the base information model's
//!   type tables, registered exactly once into a lazily-created global
//! - **Dispatch** in [`encoding::dispatch`] - per-wire-form encode/decode
//!   routing for the Binary, XML, and JSON encodings
//!
//! ## Example: registering and dispatching a custom type
//!
//! ```
//! use std::sync::Arc;
//! use uacodec::encoding::{DataTypeEncoding, EncodingContext, GenericStructCodec};
//! use uacodec::registry::DataTypeRegistry;
//! use uacodec::{FieldMap, NodeId, UaValue};
//!
//! # fn main() -> uacodec::Result<()> {
//! let registry = Arc::new(DataTypeRegistry::new());
//! registry.register_type(
//!     NodeId::numeric(2, 100),
//!     Arc::new(GenericStructCodec::new("PumpStatus")),
//!     Some(NodeId::numeric(2, 102)),
//!     Some(NodeId::numeric(2, 101)),
//!     Some(NodeId::numeric(2, 103)),
//! );
//!
//! let dispatcher = DataTypeEncoding::binary(Arc::clone(&registry));
//! let ctx = EncodingContext::new();
//!
//! let mut fields = FieldMap::new();
//! fields.insert("speed".to_string(), UaValue::Double(59.5));
//! let value = UaValue::Struct(fields);
//!
//! let body = dispatcher.encode(&ctx, &value, &NodeId::numeric(2, 102))?;
//! let decoded = dispatcher.decode(&ctx, &body, &NodeId::numeric(2, 102))?;
//! assert_eq!(decoded, value);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    EncodingKind, ExpandedNodeId, FieldMap, Identifier, NamespaceTable, NodeId, Result, UaError,
    UaValue,
};

// Encoding/decoding
pub mod encoding;

// Registry layer
pub mod registry;

// Pipeline types (buffer pool)
pub mod types;

// Re-export the key registry and dispatch types
pub use encoding::{
    CodecRef, DataTypeCodec, DataTypeEncoding, EncodedBody, EncodingContext, XmlElement,
};
pub use registry::{builtin_registry, DataTypeDictionary, DataTypeRegistry};
