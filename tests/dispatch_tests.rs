// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoding dispatch integration tests.
//!
//! Tests cover:
//! - Dispatching against the built-in registry
//! - Portable identifier resolution through the namespace table
//! - The error taxonomy for missing codecs and unknown namespaces

use std::sync::Arc;

use uacodec::encoding::{
    DataTypeEncoding, EncodedBody, EncodingContext, GenericStructCodec,
};
use uacodec::registry::{builtin_registry, DataTypeRegistry};
use uacodec::{
    EncodingKind, ExpandedNodeId, FieldMap, Identifier, NamespaceTable, NodeId, UaError, UaValue,
};

// ============================================================================
// Fixtures
// ============================================================================

fn argument_value() -> UaValue {
    let mut fields = FieldMap::new();
    fields.insert("Name".to_string(), UaValue::String("setpoint".to_string()));
    fields.insert("DataType".to_string(), UaValue::NodeId(NodeId::numeric(0, 11)));
    fields.insert("ValueRank".to_string(), UaValue::Int32(-1));
    fields.insert("ArrayDimensions".to_string(), UaValue::Array(Vec::new()));
    fields.insert(
        "Description".to_string(),
        UaValue::String("Control loop setpoint".to_string()),
    );
    UaValue::Struct(fields)
}

// ============================================================================
// Built-in registry dispatch
// ============================================================================

#[test]
fn test_builtin_argument_binary_round_trip() {
    // Argument's binary encoding node is i=298
    let registry = builtin_registry();
    let encoding_id = registry
        .binary_encoding_id(&NodeId::numeric(0, 296))
        .unwrap();
    assert_eq!(encoding_id, NodeId::numeric(0, 298));

    // Dispatchers take Arc ownership; bootstrap a local registry
    let registry = Arc::new(DataTypeRegistry::new());
    uacodec::registry::bootstrap(&registry).unwrap();

    let dispatcher = DataTypeEncoding::binary(Arc::clone(&registry));
    let ctx = EncodingContext::new();
    let value = argument_value();

    let body = dispatcher.encode(&ctx, &value, &encoding_id).unwrap();
    match &body {
        EncodedBody::Binary(bytes) => assert!(!bytes.is_empty()),
        other => panic!("expected binary body, got {:?}", other.kind()),
    }
    assert_eq!(dispatcher.decode(&ctx, &body, &encoding_id).unwrap(), value);
}

#[test]
fn test_builtin_argument_xml_round_trip() {
    let registry = Arc::new(DataTypeRegistry::new());
    uacodec::registry::bootstrap(&registry).unwrap();
    let encoding_id = registry.xml_encoding_id(&NodeId::numeric(0, 296)).unwrap();

    let dispatcher = DataTypeEncoding::xml(registry);
    let ctx = EncodingContext::new();
    let value = argument_value();

    let body = dispatcher.encode(&ctx, &value, &encoding_id).unwrap();
    match &body {
        EncodedBody::Xml(element) => assert_eq!(element.name, "Argument"),
        other => panic!("expected XML body, got {:?}", other.kind()),
    }
    assert_eq!(dispatcher.decode(&ctx, &body, &encoding_id).unwrap(), value);
}

// ============================================================================
// Encoding-kind selection through the id tables
// ============================================================================

#[test]
fn test_encoder_chooses_wire_form_from_id_tables() {
    let registry = Arc::new(DataTypeRegistry::new());
    let data_type = NodeId::numeric(2, 100);
    registry.register_type(
        data_type.clone(),
        Arc::new(GenericStructCodec::new("PumpStatus")),
        Some(NodeId::numeric(2, 102)),
        None,
        Some(NodeId::numeric(2, 103)),
    );

    // An encoder deciding which wire form to produce resolves the id first
    assert_eq!(
        registry.encoding_id(EncodingKind::Binary, &data_type),
        Some(NodeId::numeric(2, 102))
    );
    assert_eq!(registry.encoding_id(EncodingKind::Xml, &data_type), None);

    let json_id = registry
        .encoding_id(EncodingKind::Json, &data_type)
        .unwrap();
    let dispatcher = DataTypeEncoding::json(registry);
    let ctx = EncodingContext::new();

    let mut fields = FieldMap::new();
    fields.insert("speed".to_string(), UaValue::Double(59.5));
    let value = UaValue::Struct(fields);

    let body = dispatcher.encode(&ctx, &value, &json_id).unwrap();
    assert_eq!(dispatcher.decode(&ctx, &body, &json_id).unwrap(), value);
}

// ============================================================================
// Portable identifiers
// ============================================================================

#[test]
fn test_expanded_id_dispatch_through_namespace_table() {
    let registry = Arc::new(DataTypeRegistry::new());
    let mut namespaces = NamespaceTable::new();
    let index = namespaces.register("urn:example:machines").unwrap();

    registry.register_type(
        NodeId::numeric(index, 100),
        Arc::new(GenericStructCodec::new("MachineStatus")),
        Some(NodeId::numeric(index, 102)),
        None,
        None,
    );

    let dispatcher = DataTypeEncoding::binary(registry);
    let ctx = EncodingContext::with_namespaces(namespaces);
    let portable =
        ExpandedNodeId::with_uri("urn:example:machines", Identifier::Numeric(102));

    let mut fields = FieldMap::new();
    fields.insert("running".to_string(), UaValue::Boolean(true));
    let value = UaValue::Struct(fields);

    let body = dispatcher.encode_expanded(&ctx, &value, &portable).unwrap();
    assert_eq!(
        dispatcher.decode_expanded(&ctx, &body, &portable).unwrap(),
        value
    );
}

#[test]
fn test_unknown_namespace_fails_with_uri_in_message() {
    let registry = Arc::new(DataTypeRegistry::new());
    let dispatcher = DataTypeEncoding::binary(registry);
    let ctx = EncodingContext::new();
    let portable =
        ExpandedNodeId::with_uri("urn:example:never-registered", Identifier::Numeric(102));

    let err = dispatcher
        .encode_expanded(&ctx, &UaValue::Null, &portable)
        .unwrap_err();
    assert!(matches!(err, UaError::Encoding { .. }));
    assert!(err.to_string().contains("urn:example:never-registered"));

    let err = dispatcher
        .decode_expanded(&ctx, &EncodedBody::Binary(Vec::new()), &portable)
        .unwrap_err();
    assert!(matches!(err, UaError::Decoding { .. }));
    assert!(err.to_string().contains("urn:example:never-registered"));
}

// ============================================================================
// Error taxonomy
// ============================================================================

#[test]
fn test_missing_codec_carries_the_encoding_id() {
    let registry = Arc::new(DataTypeRegistry::new());
    let ctx = EncodingContext::new();
    let unknown = NodeId::numeric(5, 4242);

    for dispatcher in [
        DataTypeEncoding::binary(Arc::clone(&registry)),
        DataTypeEncoding::xml(Arc::clone(&registry)),
        DataTypeEncoding::json(Arc::clone(&registry)),
    ] {
        let err = dispatcher
            .encode(&ctx, &UaValue::Null, &unknown)
            .unwrap_err();
        assert!(matches!(err, UaError::Encoding { .. }));
        assert!(err.to_string().contains("ns=5;i=4242"));
    }
}

#[test]
fn test_codec_internal_errors_propagate_unchanged() {
    let registry = Arc::new(DataTypeRegistry::new());
    registry.register_type(
        NodeId::numeric(2, 100),
        Arc::new(GenericStructCodec::new("PumpStatus")),
        Some(NodeId::numeric(2, 102)),
        None,
        None,
    );
    let dispatcher = DataTypeEncoding::binary(registry);
    let ctx = EncodingContext::new();

    // Truncated body: the codec's buffer-too-short error surfaces as-is
    let truncated = EncodedBody::Binary(vec![20]);
    let err = dispatcher
        .decode(&ctx, &truncated, &NodeId::numeric(2, 102))
        .unwrap_err();
    assert!(matches!(err, UaError::Decoding { .. }));
    assert!(err.to_string().contains("buffer too short"));
}
