// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Process-wide data type registry.
//!
//! [`DataTypeRegistry`] aggregates per-namespace dictionaries and keeps the
//! flattened cross-namespace indexes used for codec resolution:
//!
//! - encoding id -> codec, for decoding an incoming body whose encoding id
//!   is the only thing known
//! - (encoding kind, data type id) -> codec, for encoding an outgoing value
//!   when the caller chooses the wire form
//! - (encoding kind, data type id) -> encoding id, for resolving which wire
//!   forms a data type supports
//! - data type id -> enum codec, for enumerated types, which have no
//!   encoding id distinct from their data type id
//!
//! Every registration path updates all of the indexes it touches under one
//! write lock, so a reader never observes a partially-applied registration.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::core::{EncodingKind, NodeId};
use crate::encoding::CodecRef;

use super::dictionary::DataTypeDictionary;

/// Process-wide owner of all dictionaries and flattened codec indexes.
///
/// Constructed once, bootstrapped with built-in types, and optionally
/// extended at runtime when a companion-spec model is loaded. Lookups and
/// registrations are safe from arbitrarily many threads.
pub struct DataTypeRegistry {
    inner: RwLock<RegistryInner>,
}

struct RegistryInner {
    /// Flattened encoding id -> codec index
    by_encoding_id: HashMap<NodeId, CodecRef>,
    /// Per-kind data type id -> codec index
    struct_codecs: HashMap<EncodingKind, HashMap<NodeId, CodecRef>>,
    /// Per-kind data type id -> encoding id table
    encoding_ids: HashMap<EncodingKind, HashMap<NodeId, NodeId>>,
    /// Enumerated types, keyed by data type id only
    enum_codecs: HashMap<NodeId, CodecRef>,
    /// Dictionaries keyed by (namespace URI, wire encoding)
    dictionaries: HashMap<(String, EncodingKind), Arc<DataTypeDictionary>>,
}

impl DataTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        let mut struct_codecs = HashMap::new();
        let mut encoding_ids = HashMap::new();
        for kind in EncodingKind::ALL {
            struct_codecs.insert(kind, HashMap::new());
            encoding_ids.insert(kind, HashMap::new());
        }
        Self {
            inner: RwLock::new(RegistryInner {
                by_encoding_id: HashMap::new(),
                struct_codecs,
                encoding_ids,
                enum_codecs: HashMap::new(),
                dictionaries: HashMap::new(),
            }),
        }
    }

    /// Register a structured type with up to three wire encodings.
    ///
    /// For each encoding id supplied, the codec becomes reachable directly
    /// by that encoding id, by the (kind, data type id) pair, and the id
    /// itself resolvable through [`encoding_id`](Self::encoding_id). `None`
    /// and the null node id both mean "not supported for this encoding" and
    /// index nothing. Re-registration overwrites every index.
    pub fn register_type(
        &self,
        data_type_id: NodeId,
        codec: CodecRef,
        binary_encoding_id: Option<NodeId>,
        xml_encoding_id: Option<NodeId>,
        json_encoding_id: Option<NodeId>,
    ) {
        let supplied = [
            (EncodingKind::Binary, binary_encoding_id),
            (EncodingKind::Xml, xml_encoding_id),
            (EncodingKind::Json, json_encoding_id),
        ];

        let mut inner = self.inner.write().unwrap();
        for (kind, encoding_id) in supplied {
            if let Some(encoding_id) = encoding_id {
                if !encoding_id.is_null() {
                    inner.register_struct(kind, data_type_id.clone(), encoding_id, &codec);
                }
            }
        }
    }

    /// Register an enumerated type by data type id.
    pub fn register_enum_type(&self, data_type_id: NodeId, codec: CodecRef) {
        let mut inner = self.inner.write().unwrap();
        debug!(data_type_id = %data_type_id, "registering enum type");
        inner.enum_codecs.insert(data_type_id, codec);
    }

    /// Merge a fully-populated dictionary into the flattened indexes.
    ///
    /// The dictionary itself stays reachable under its (namespace URI,
    /// encoding kind) key; each of its struct entries is replayed through
    /// the per-kind indexes for the dictionary's own kind, and each enum
    /// entry carrying a data type id lands in the enum index. The end state
    /// is independent of registration order, except that colliding data
    /// type ids resolve to the last registration.
    pub fn register_type_dictionary(&self, dictionary: Arc<DataTypeDictionary>) {
        let kind = dictionary.encoding_kind();
        let struct_infos = dictionary.struct_codec_infos();
        let enum_infos = dictionary.enum_codec_infos();

        let mut inner = self.inner.write().unwrap();
        debug!(
            namespace_uri = dictionary.namespace_uri(),
            kind = %kind,
            structs = struct_infos.len(),
            enums = enum_infos.len(),
            "registering type dictionary"
        );
        inner.dictionaries.insert(
            (dictionary.namespace_uri().to_string(), kind),
            Arc::clone(&dictionary),
        );

        for info in struct_infos {
            inner.register_struct(kind, info.data_type_id, info.encoding_id, &info.codec);
        }
        for info in enum_infos {
            if let Some(data_type_id) = info.data_type_id {
                inner.enum_codecs.insert(data_type_id, info.codec);
            }
        }
    }

    /// Look up a codec directly by encoding id.
    pub fn codec_for_encoding_id(&self, encoding_id: &NodeId) -> Option<CodecRef> {
        let inner = self.inner.read().unwrap();
        inner.by_encoding_id.get(encoding_id).cloned()
    }

    /// Look up a codec by (encoding kind, data type id).
    pub fn codec_for(&self, kind: EncodingKind, data_type_id: &NodeId) -> Option<CodecRef> {
        let inner = self.inner.read().unwrap();
        inner.struct_codecs[&kind].get(data_type_id).cloned()
    }

    /// Look up an enumerated-type codec by data type id.
    pub fn enum_codec(&self, data_type_id: &NodeId) -> Option<CodecRef> {
        let inner = self.inner.read().unwrap();
        inner.enum_codecs.get(data_type_id).cloned()
    }

    /// Resolve the encoding id a data type uses for the given wire form.
    pub fn encoding_id(&self, kind: EncodingKind, data_type_id: &NodeId) -> Option<NodeId> {
        let inner = self.inner.read().unwrap();
        inner.encoding_ids[&kind].get(data_type_id).cloned()
    }

    /// Resolve the binary encoding id of a data type.
    pub fn binary_encoding_id(&self, data_type_id: &NodeId) -> Option<NodeId> {
        self.encoding_id(EncodingKind::Binary, data_type_id)
    }

    /// Resolve the XML encoding id of a data type.
    pub fn xml_encoding_id(&self, data_type_id: &NodeId) -> Option<NodeId> {
        self.encoding_id(EncodingKind::Xml, data_type_id)
    }

    /// Resolve the JSON encoding id of a data type.
    pub fn json_encoding_id(&self, data_type_id: &NodeId) -> Option<NodeId> {
        self.encoding_id(EncodingKind::Json, data_type_id)
    }

    /// Look up a registered dictionary by namespace URI and wire encoding.
    pub fn type_dictionary(
        &self,
        namespace_uri: &str,
        kind: EncodingKind,
    ) -> Option<Arc<DataTypeDictionary>> {
        let inner = self.inner.read().unwrap();
        inner
            .dictionaries
            .get(&(namespace_uri.to_string(), kind))
            .cloned()
    }

    /// Number of entries in the flattened encoding id index.
    pub fn registered_encoding_count(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.by_encoding_id.len()
    }

    /// Number of registered enumerated types.
    pub fn registered_enum_count(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.enum_codecs.len()
    }
}

impl Default for DataTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryInner {
    /// Apply one (kind, data type, encoding id) struct registration to all
    /// three indexes. The encoding-id table records the id for its own
    /// kind, so the per-kind tables never disagree with the flattened
    /// index.
    fn register_struct(
        &mut self,
        kind: EncodingKind,
        data_type_id: NodeId,
        encoding_id: NodeId,
        codec: &CodecRef,
    ) {
        debug!(
            kind = %kind,
            data_type_id = %data_type_id,
            encoding_id = %encoding_id,
            "registering struct type"
        );
        if let Some(slot) = self.struct_codecs.get_mut(&kind) {
            if slot
                .insert(data_type_id.clone(), CodecRef::clone(codec))
                .is_some()
            {
                warn!(
                    kind = %kind,
                    data_type_id = %data_type_id,
                    "replacing previously registered codec"
                );
            }
        }
        if let Some(slot) = self.encoding_ids.get_mut(&kind) {
            slot.insert(data_type_id, encoding_id.clone());
        }
        self.by_encoding_id
            .insert(encoding_id, CodecRef::clone(codec));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::GenericStructCodec;

    fn codec(name: &str) -> CodecRef {
        Arc::new(GenericStructCodec::new(name))
    }

    #[test]
    fn test_register_type_with_all_encodings() {
        let registry = DataTypeRegistry::new();
        let range_codec = codec("Range");
        let data_type = NodeId::numeric(2, 100);
        let (bin, xml, json) = (
            NodeId::numeric(2, 102),
            NodeId::numeric(2, 101),
            NodeId::numeric(2, 103),
        );

        registry.register_type(
            data_type.clone(),
            CodecRef::clone(&range_codec),
            Some(bin.clone()),
            Some(xml.clone()),
            Some(json.clone()),
        );

        for (kind, id) in [
            (EncodingKind::Binary, &bin),
            (EncodingKind::Xml, &xml),
            (EncodingKind::Json, &json),
        ] {
            let direct = registry.codec_for_encoding_id(id).unwrap();
            let by_pair = registry.codec_for(kind, &data_type).unwrap();
            assert!(Arc::ptr_eq(&direct, &range_codec));
            assert!(Arc::ptr_eq(&by_pair, &range_codec));
            assert_eq!(registry.encoding_id(kind, &data_type), Some(id.clone()));
        }
    }

    #[test]
    fn test_register_type_binary_only() {
        let registry = DataTypeRegistry::new();
        let data_type = NodeId::numeric(2, 200);
        let bin = NodeId::numeric(2, 202);

        registry.register_type(
            data_type.clone(),
            codec("BinaryOnly"),
            Some(bin.clone()),
            None,
            None,
        );

        assert!(registry.codec_for_encoding_id(&bin).is_some());
        assert!(registry.codec_for(EncodingKind::Binary, &data_type).is_some());
        assert!(registry.codec_for(EncodingKind::Xml, &data_type).is_none());
        assert!(registry.codec_for(EncodingKind::Json, &data_type).is_none());
        assert_eq!(registry.xml_encoding_id(&data_type), None);
        assert_eq!(registry.json_encoding_id(&data_type), None);
        assert_eq!(registry.binary_encoding_id(&data_type), Some(bin));
    }

    #[test]
    fn test_null_encoding_ids_index_nothing() {
        let registry = DataTypeRegistry::new();
        let data_type = NodeId::numeric(2, 300);

        registry.register_type(
            data_type.clone(),
            codec("Unencodable"),
            Some(NodeId::null()),
            None,
            Some(NodeId::null()),
        );

        assert_eq!(registry.registered_encoding_count(), 0);
        for kind in EncodingKind::ALL {
            assert!(registry.codec_for(kind, &data_type).is_none());
            assert!(registry.encoding_id(kind, &data_type).is_none());
        }
    }

    #[test]
    fn test_reregistration_wins_everywhere() {
        let registry = DataTypeRegistry::new();
        let data_type = NodeId::numeric(2, 400);
        let bin = NodeId::numeric(2, 402);
        let first = codec("Range");
        let second = codec("Range");

        registry.register_type(data_type.clone(), first, Some(bin.clone()), None, None);
        registry.register_type(
            data_type.clone(),
            CodecRef::clone(&second),
            Some(bin.clone()),
            None,
            None,
        );

        let direct = registry.codec_for_encoding_id(&bin).unwrap();
        let by_pair = registry.codec_for(EncodingKind::Binary, &data_type).unwrap();
        assert!(Arc::ptr_eq(&direct, &second));
        assert!(Arc::ptr_eq(&by_pair, &second));
        assert_eq!(registry.registered_encoding_count(), 1);
    }

    #[test]
    fn test_enum_registration_is_separate_from_structs() {
        let registry = DataTypeRegistry::new();
        let data_type = NodeId::numeric(0, 852);
        registry.register_enum_type(data_type.clone(), codec("ServerState"));

        assert!(registry.enum_codec(&data_type).is_some());
        assert!(registry.codec_for(EncodingKind::Binary, &data_type).is_none());
        assert_eq!(registry.registered_encoding_count(), 0);
        assert_eq!(registry.registered_enum_count(), 1);
    }

    #[test]
    fn test_dictionary_bulk_registration() {
        let registry = DataTypeRegistry::new();
        let dictionary = Arc::new(DataTypeDictionary::new(
            "urn:example:model",
            EncodingKind::Binary,
        ));

        dictionary.register_struct_codec(
            codec("Range"),
            "Range",
            NodeId::numeric(2, 100),
            NodeId::numeric(2, 102),
        );
        dictionary.register_enum_codec(codec("Mode"), "Mode", Some(NodeId::numeric(2, 110)));

        registry.register_type_dictionary(Arc::clone(&dictionary));

        assert!(registry
            .codec_for_encoding_id(&NodeId::numeric(2, 102))
            .is_some());
        assert!(registry
            .codec_for(EncodingKind::Binary, &NodeId::numeric(2, 100))
            .is_some());
        assert_eq!(
            registry.binary_encoding_id(&NodeId::numeric(2, 100)),
            Some(NodeId::numeric(2, 102))
        );
        assert!(registry.enum_codec(&NodeId::numeric(2, 110)).is_some());

        let found = registry
            .type_dictionary("urn:example:model", EncodingKind::Binary)
            .unwrap();
        assert!(Arc::ptr_eq(&found, &dictionary));
        assert!(registry
            .type_dictionary("urn:example:model", EncodingKind::Xml)
            .is_none());
    }

    #[test]
    fn test_registrations_survive_unrelated_registrations() {
        let registry = DataTypeRegistry::new();
        let data_type = NodeId::numeric(2, 500);
        let bin = NodeId::numeric(2, 502);
        let range_codec = codec("Range");

        registry.register_type(
            data_type.clone(),
            CodecRef::clone(&range_codec),
            Some(bin.clone()),
            None,
            None,
        );
        for offset in 0..50u32 {
            let base = 1000 + offset * 10;
            registry.register_type(
                NodeId::numeric(3, base),
                codec("Other"),
                Some(NodeId::numeric(3, base + 2)),
                Some(NodeId::numeric(3, base + 1)),
                None,
            );
        }

        let direct = registry.codec_for_encoding_id(&bin).unwrap();
        assert!(Arc::ptr_eq(&direct, &range_codec));
        assert_eq!(registry.binary_encoding_id(&data_type), Some(bin));
    }

    #[test]
    fn test_concurrent_registration_and_lookup() {
        use std::thread;

        let registry = Arc::new(DataTypeRegistry::new());

        let writers: Vec<_> = (0..4u32)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..50u32 {
                        let base = 10_000 + worker * 1000 + i * 10;
                        registry.register_type(
                            NodeId::numeric(2, base),
                            codec("Concurrent"),
                            Some(NodeId::numeric(2, base + 2)),
                            Some(NodeId::numeric(2, base + 1)),
                            None,
                        );
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4u32)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..50u32 {
                        let data_type = NodeId::numeric(2, 10_000 + i * 10);
                        // A miss is fine; a partially-applied registration is not
                        let by_pair = registry.codec_for(EncodingKind::Binary, &data_type);
                        if by_pair.is_some() {
                            assert!(registry.binary_encoding_id(&data_type).is_some());
                        }
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }

        assert_eq!(registry.registered_encoding_count(), 4 * 50 * 2);
    }
}
