// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-namespace codec dictionary.
//!
//! A [`DataTypeDictionary`] owns the codec entries for one namespace URI
//! under one wire encoding, and supports lookup along three axes: by
//! human-readable description, by data type id, and by encoding id. A
//! dictionary built in isolation (for example, loaded from a companion-spec
//! model) is merged into the process-wide registry with
//! [`DataTypeRegistry::register_type_dictionary`](crate::registry::DataTypeRegistry::register_type_dictionary).

use std::collections::HashMap;
use std::sync::RwLock;

use crate::core::{EncodingKind, NodeId};
use crate::encoding::CodecRef;

/// A structured-type entry: one codec reachable by description, data type
/// id, and encoding id.
#[derive(Clone)]
pub struct StructCodecInfo {
    /// Human-readable description (typically the type name)
    pub description: String,
    /// Abstract data type id
    pub data_type_id: NodeId,
    /// Encoding id for this dictionary's wire form
    pub encoding_id: NodeId,
    /// The codec
    pub codec: CodecRef,
}

/// An enumerated-type entry: no encoding id distinct from the data type id.
#[derive(Clone)]
pub struct EnumCodecInfo {
    /// Human-readable description (typically the type name)
    pub description: String,
    /// Abstract data type id, when known at registration time
    pub data_type_id: Option<NodeId>,
    /// The codec
    pub codec: CodecRef,
}

/// Codec dictionary for one (namespace URI, wire encoding) pair.
///
/// Registration uses overwrite semantics: re-registering under an existing
/// key replaces the previous codec everywhere it was reachable. Lookup
/// misses are `None`, never errors. The dictionary never shrinks.
pub struct DataTypeDictionary {
    namespace_uri: String,
    kind: EncodingKind,
    inner: RwLock<DictionaryInner>,
}

#[derive(Default)]
struct DictionaryInner {
    by_description: HashMap<String, CodecRef>,
    by_data_type_id: HashMap<NodeId, CodecRef>,
    by_encoding_id: HashMap<NodeId, CodecRef>,
    struct_infos: Vec<StructCodecInfo>,
    enum_infos: Vec<EnumCodecInfo>,
}

impl DataTypeDictionary {
    /// Create an empty dictionary for a namespace URI and wire encoding.
    pub fn new(namespace_uri: impl Into<String>, kind: EncodingKind) -> Self {
        Self {
            namespace_uri: namespace_uri.into(),
            kind,
            inner: RwLock::new(DictionaryInner::default()),
        }
    }

    /// The namespace URI this dictionary covers.
    pub fn namespace_uri(&self) -> &str {
        &self.namespace_uri
    }

    /// The wire encoding this dictionary covers.
    pub fn encoding_kind(&self) -> EncodingKind {
        self.kind
    }

    /// Register a structured-type codec under all three lookup axes.
    pub fn register_struct_codec(
        &self,
        codec: CodecRef,
        description: impl Into<String>,
        data_type_id: NodeId,
        encoding_id: NodeId,
    ) {
        let description = description.into();
        let mut inner = self.inner.write().unwrap();
        inner
            .by_description
            .insert(description.clone(), CodecRef::clone(&codec));
        inner
            .by_data_type_id
            .insert(data_type_id.clone(), CodecRef::clone(&codec));
        inner
            .by_encoding_id
            .insert(encoding_id.clone(), CodecRef::clone(&codec));

        let info = StructCodecInfo {
            description,
            data_type_id,
            encoding_id,
            codec,
        };
        match inner
            .struct_infos
            .iter_mut()
            .find(|existing| existing.description == info.description)
        {
            Some(existing) => *existing = info,
            None => inner.struct_infos.push(info),
        }
    }

    /// Register an enumerated-type codec.
    ///
    /// Enumerated types have no separate wire encoding identifier; the
    /// codec is indexed by description and, when supplied, by data type id.
    pub fn register_enum_codec(
        &self,
        codec: CodecRef,
        description: impl Into<String>,
        data_type_id: Option<NodeId>,
    ) {
        let description = description.into();
        let mut inner = self.inner.write().unwrap();
        inner
            .by_description
            .insert(description.clone(), CodecRef::clone(&codec));
        if let Some(id) = &data_type_id {
            inner
                .by_data_type_id
                .insert(id.clone(), CodecRef::clone(&codec));
        }

        let info = EnumCodecInfo {
            description,
            data_type_id,
            codec,
        };
        match inner
            .enum_infos
            .iter_mut()
            .find(|existing| existing.description == info.description)
        {
            Some(existing) => *existing = info,
            None => inner.enum_infos.push(info),
        }
    }

    /// Look up a codec by description.
    pub fn codec_by_description(&self, description: &str) -> Option<CodecRef> {
        let inner = self.inner.read().unwrap();
        inner.by_description.get(description).cloned()
    }

    /// Look up a codec by data type id.
    pub fn codec_by_data_type_id(&self, data_type_id: &NodeId) -> Option<CodecRef> {
        let inner = self.inner.read().unwrap();
        inner.by_data_type_id.get(data_type_id).cloned()
    }

    /// Look up a codec by encoding id.
    pub fn codec_by_encoding_id(&self, encoding_id: &NodeId) -> Option<CodecRef> {
        let inner = self.inner.read().unwrap();
        inner.by_encoding_id.get(encoding_id).cloned()
    }

    /// All structured-type entries, in insertion order.
    pub fn struct_codec_infos(&self) -> Vec<StructCodecInfo> {
        let inner = self.inner.read().unwrap();
        inner.struct_infos.clone()
    }

    /// All enumerated-type entries, in insertion order.
    pub fn enum_codec_infos(&self) -> Vec<EnumCodecInfo> {
        let inner = self.inner.read().unwrap();
        inner.enum_infos.clone()
    }

    /// Number of registered entries (structs plus enums).
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.struct_infos.len() + inner.enum_infos.len()
    }

    /// Check if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::GenericStructCodec;
    use std::sync::Arc;

    fn codec(name: &str) -> CodecRef {
        Arc::new(GenericStructCodec::new(name))
    }

    #[test]
    fn test_struct_registration_reaches_all_axes() {
        let dictionary =
            DataTypeDictionary::new("urn:example:model", EncodingKind::Binary);
        let range_codec = codec("Range");
        dictionary.register_struct_codec(
            CodecRef::clone(&range_codec),
            "Range",
            NodeId::numeric(2, 100),
            NodeId::numeric(2, 102),
        );

        assert!(dictionary.codec_by_description("Range").is_some());
        assert!(dictionary
            .codec_by_data_type_id(&NodeId::numeric(2, 100))
            .is_some());
        assert!(dictionary
            .codec_by_encoding_id(&NodeId::numeric(2, 102))
            .is_some());
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let dictionary =
            DataTypeDictionary::new("urn:example:model", EncodingKind::Binary);
        assert!(dictionary.codec_by_description("Missing").is_none());
        assert!(dictionary
            .codec_by_data_type_id(&NodeId::numeric(0, 1))
            .is_none());
        assert!(dictionary.is_empty());
    }

    #[test]
    fn test_enum_registration_without_data_type_id() {
        let dictionary = DataTypeDictionary::new("urn:example:model", EncodingKind::Xml);
        dictionary.register_enum_codec(codec("Mode"), "Mode", None);

        assert!(dictionary.codec_by_description("Mode").is_some());
        assert_eq!(dictionary.enum_codec_infos().len(), 1);
        assert!(dictionary.enum_codec_infos()[0].data_type_id.is_none());
    }

    #[test]
    fn test_reregistration_replaces_entry() {
        let dictionary =
            DataTypeDictionary::new("urn:example:model", EncodingKind::Binary);
        let first = codec("Range");
        let second = codec("Range");

        let data_type_id = NodeId::numeric(2, 100);
        let encoding_id = NodeId::numeric(2, 102);
        dictionary.register_struct_codec(
            first,
            "Range",
            data_type_id.clone(),
            encoding_id.clone(),
        );
        dictionary.register_struct_codec(
            CodecRef::clone(&second),
            "Range",
            data_type_id.clone(),
            encoding_id.clone(),
        );

        // Same entry count, and the replacement is what every axis returns
        assert_eq!(dictionary.struct_codec_infos().len(), 1);
        let found = dictionary.codec_by_encoding_id(&encoding_id).unwrap();
        assert!(Arc::ptr_eq(&found, &second));
    }

    #[test]
    fn test_infos_preserve_insertion_order() {
        let dictionary =
            DataTypeDictionary::new("urn:example:model", EncodingKind::Binary);
        for (index, name) in ["A", "B", "C"].iter().enumerate() {
            let base = 100 + (index as u32) * 10;
            dictionary.register_struct_codec(
                codec(name),
                *name,
                NodeId::numeric(2, base),
                NodeId::numeric(2, base + 2),
            );
        }

        let names: Vec<String> = dictionary
            .struct_codec_infos()
            .into_iter()
            .map(|info| info.description)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
