// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire-form support and codec dispatch.
//!
//! This module provides the encoding layer of the library:
//! - [`binary`] - Little-endian binary reader/writer primitives
//! - [`xml`] - XML element tree, parsing and serialization
//! - [`codec`] - The codec capability interface and encoding context
//! - [`generic`] - Schema-less generic struct and enum codecs
//! - [`dispatch`] - Per-wire-form codec dispatch

pub mod binary;
pub mod codec;
pub mod dispatch;
pub mod generic;
pub mod xml;

pub use binary::{BinaryReader, BinaryWriter};
pub use codec::{CodecRef, DataTypeCodec, EncodingContext};
pub use dispatch::{DataTypeEncoding, EncodedBody};
pub use generic::{GenericEnumCodec, GenericStructCodec};
pub use xml::XmlElement;
