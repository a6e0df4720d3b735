// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout uacodec.
//!
//! This module provides the foundational types for the library:
//! - [`UaError`] - Error taxonomy for encode, decode, and bootstrap failures
//! - [`UaValue`] - Unified value representation
//! - [`NodeId`] / [`ExpandedNodeId`] - Local and portable type identifiers
//! - [`NamespaceTable`] - Namespace URI to index mapping
//! - [`EncodingKind`] - Wire encoding identifier

pub mod error;
pub mod id;
pub mod namespace;
pub mod value;

pub use error::{Result, UaError};
pub use id::{ExpandedNodeId, Identifier, NodeId};
pub use namespace::{NamespaceTable, OPC_UA_NAMESPACE_URI};
pub use value::{FieldMap, UaValue};

/// Wire encoding identifier.
///
/// Exactly three encodings exist; there is no dynamic registration of new
/// kinds. The string form is the well-known OPC-UA browse name used both as
/// a human label and as the per-encoding map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    /// OPC-UA binary encoding
    Binary,
    /// OPC-UA XML encoding
    Xml,
    /// OPC-UA JSON encoding
    Json,
}

/// Error returned when parsing an `EncodingKind` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseEncodingKindError {
    _private: (),
}

impl std::fmt::Display for ParseEncodingKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid encoding name, expected 'Default Binary', 'Default XML', or 'Default JSON'"
        )
    }
}

impl std::error::Error for ParseEncodingKindError {}

impl std::str::FromStr for EncodingKind {
    type Err = ParseEncodingKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Default Binary" => Ok(EncodingKind::Binary),
            "Default XML" => Ok(EncodingKind::Xml),
            "Default JSON" => Ok(EncodingKind::Json),
            _ => match s.to_lowercase().as_str() {
                "binary" => Ok(EncodingKind::Binary),
                "xml" => Ok(EncodingKind::Xml),
                "json" => Ok(EncodingKind::Json),
                _ => Err(ParseEncodingKindError { _private: () }),
            },
        }
    }
}

impl std::fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EncodingKind {
    /// All encoding kinds, for iteration.
    pub const ALL: [EncodingKind; 3] = [EncodingKind::Binary, EncodingKind::Xml, EncodingKind::Json];

    /// Check if this kind is the binary encoding.
    pub fn is_binary(&self) -> bool {
        matches!(self, EncodingKind::Binary)
    }

    /// Check if this kind is the XML encoding.
    pub fn is_xml(&self) -> bool {
        matches!(self, EncodingKind::Xml)
    }

    /// Check if this kind is the JSON encoding.
    pub fn is_json(&self) -> bool {
        matches!(self, EncodingKind::Json)
    }

    /// The well-known browse name for this encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingKind::Binary => "Default Binary",
            EncodingKind::Xml => "Default XML",
            EncodingKind::Json => "Default JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_kind_from_str() {
        assert_eq!("Default Binary".parse::<EncodingKind>(), Ok(EncodingKind::Binary));
        assert_eq!("Default XML".parse::<EncodingKind>(), Ok(EncodingKind::Xml));
        assert_eq!("Default JSON".parse::<EncodingKind>(), Ok(EncodingKind::Json));
        assert_eq!("binary".parse::<EncodingKind>(), Ok(EncodingKind::Binary));
        assert_eq!("XML".parse::<EncodingKind>(), Ok(EncodingKind::Xml));
        assert!("Default YAML".parse::<EncodingKind>().is_err());
    }

    #[test]
    fn test_encoding_kind_round_trip() {
        for kind in EncodingKind::ALL {
            assert_eq!(kind.as_str().parse::<EncodingKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_encoding_kind_predicates() {
        assert!(EncodingKind::Binary.is_binary());
        assert!(!EncodingKind::Binary.is_xml());
        assert!(EncodingKind::Xml.is_xml());
        assert!(EncodingKind::Json.is_json());
    }
}
