// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Built-in type bootstrap.
//!
//! The base information model's structured and enumerated types are
//! registered from static tables iterated by [`bootstrap`], rather than
//! from per-type call sites. [`builtin_registry`] exposes the process-wide
//! registry, populated exactly once on first access.
//!
//! Identifiers live in namespace 0 and follow the base model's numeric
//! convention: for a structured type id `n`, the XML encoding node is
//! `n + 1` and the binary encoding node is `n + 2`.

use std::sync::Arc;

use tracing::debug;

use crate::core::{NodeId, Result, UaError};
use crate::encoding::{GenericEnumCodec, GenericStructCodec};

use super::manager::DataTypeRegistry;

/// One structured-type row of the registration data.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTypeEntry {
    /// Type name, used as codec description
    pub name: &'static str,
    /// Data type id in namespace 0
    pub data_type: u32,
    /// XML encoding id in namespace 0
    pub xml: u32,
    /// Binary encoding id in namespace 0
    pub binary: u32,
    /// JSON encoding id in namespace 0, when the model assigns one
    pub json: Option<u32>,
}

/// One enumerated-type row of the registration data.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinEnumEntry {
    /// Type name, used as codec description
    pub name: &'static str,
    /// Data type id in namespace 0
    pub data_type: u32,
}

const fn entry(name: &'static str, data_type: u32) -> BuiltinTypeEntry {
    BuiltinTypeEntry {
        name,
        data_type,
        xml: data_type + 1,
        binary: data_type + 2,
        json: None,
    }
}

const fn enum_entry(name: &'static str, data_type: u32) -> BuiltinEnumEntry {
    BuiltinEnumEntry { name, data_type }
}

/// Structured types of the base information model.
pub const BUILTIN_TYPES: &[BuiltinTypeEntry] = &[
    entry("Argument", 296),
    entry("UserTokenPolicy", 304),
    entry("ApplicationDescription", 308),
    entry("EndpointDescription", 312),
    entry("SignedSoftwareCertificate", 344),
    entry("AddNodesItem", 376),
    entry("RequestHeader", 389),
    entry("ResponseHeader", 392),
    entry("ServiceFault", 395),
    entry("FindServersRequest", 420),
    entry("FindServersResponse", 423),
    entry("GetEndpointsRequest", 426),
    entry("GetEndpointsResponse", 429),
    entry("OpenSecureChannelRequest", 444),
    entry("OpenSecureChannelResponse", 447),
    entry("CloseSecureChannelRequest", 450),
    entry("CloseSecureChannelResponse", 453),
    entry("CreateSessionRequest", 459),
    entry("CreateSessionResponse", 462),
    entry("ActivateSessionRequest", 465),
    entry("ActivateSessionResponse", 468),
    entry("CloseSessionRequest", 471),
    entry("CloseSessionResponse", 474),
    entry("CancelRequest", 477),
    entry("CancelResponse", 480),
    entry("AddNodesRequest", 486),
    entry("AddNodesResponse", 489),
    entry("AddReferencesRequest", 492),
    entry("AddReferencesResponse", 495),
    entry("DeleteNodesRequest", 498),
    entry("DeleteNodesResponse", 501),
    entry("DeleteReferencesRequest", 504),
    entry("DeleteReferencesResponse", 507),
    entry("ViewDescription", 511),
    entry("BrowseDescription", 514),
    entry("ReferenceDescription", 518),
    entry("BrowseResult", 522),
    entry("BrowseRequest", 525),
    entry("BrowseResponse", 528),
    entry("BrowseNextRequest", 531),
    entry("BrowseNextResponse", 534),
    entry("RelativePathElement", 537),
    entry("RelativePath", 540),
    entry("BrowsePath", 543),
    entry("BrowsePathTarget", 546),
    entry("BrowsePathResult", 549),
    entry("TranslateBrowsePathsToNodeIdsRequest", 552),
    entry("TranslateBrowsePathsToNodeIdsResponse", 555),
    entry("RegisterNodesRequest", 558),
    entry("RegisterNodesResponse", 561),
    entry("UnregisterNodesRequest", 564),
    entry("UnregisterNodesResponse", 567),
    entry("ReadValueId", 626),
    entry("ReadRequest", 629),
    entry("ReadResponse", 632),
    entry("HistoryReadRequest", 662),
    entry("HistoryReadResponse", 665),
    entry("WriteValue", 668),
    entry("WriteRequest", 671),
    entry("WriteResponse", 674),
    entry("CallMethodRequest", 704),
    entry("CallMethodResult", 707),
    entry("CallRequest", 710),
    entry("CallResponse", 713),
    entry("MonitoringParameters", 740),
    entry("CreateSubscriptionRequest", 785),
    entry("CreateSubscriptionResponse", 788),
    entry("PublishRequest", 824),
    entry("PublishResponse", 827),
];

/// Enumerated types of the base information model.
pub const BUILTIN_ENUMS: &[BuiltinEnumEntry] = &[
    enum_entry("IdType", 256),
    enum_entry("NodeClass", 257),
    enum_entry("MessageSecurityMode", 302),
    enum_entry("UserTokenType", 303),
    enum_entry("ApplicationType", 307),
    enum_entry("SecurityTokenRequestType", 315),
    enum_entry("BrowseDirection", 510),
    enum_entry("BrowseResultMask", 517),
    enum_entry("FilterOperator", 576),
    enum_entry("TimestampsToReturn", 625),
    enum_entry("MonitoringMode", 716),
    enum_entry("DataChangeTrigger", 717),
    enum_entry("DeadbandType", 718),
    enum_entry("RedundancySupport", 851),
    enum_entry("ServerState", 852),
];

/// Populate a registry with the built-in type tables.
///
/// Fail-fast: the first malformed entry aborts the whole bootstrap with an
/// initialization error naming the entry, since a half-populated built-in
/// registry is unsafe to use.
pub fn bootstrap(registry: &DataTypeRegistry) -> Result<()> {
    for entry in BUILTIN_TYPES {
        validate(entry).map_err(|cause| UaError::initialization(entry.name, cause))?;
        registry.register_type(
            NodeId::numeric(0, entry.data_type),
            Arc::new(GenericStructCodec::new(entry.name)),
            Some(NodeId::numeric(0, entry.binary)),
            Some(NodeId::numeric(0, entry.xml)),
            entry.json.map(|id| NodeId::numeric(0, id)),
        );
    }
    for entry in BUILTIN_ENUMS {
        if entry.data_type == 0 {
            return Err(UaError::initialization(entry.name, "null data type id"));
        }
        registry.register_enum_type(
            NodeId::numeric(0, entry.data_type),
            Arc::new(GenericEnumCodec::new(entry.name)),
        );
    }
    debug!(
        structs = BUILTIN_TYPES.len(),
        enums = BUILTIN_ENUMS.len(),
        "built-in type bootstrap complete"
    );
    Ok(())
}

/// Reject rows that would silently index nothing or collide with the null
/// sentinel.
fn validate(entry: &BuiltinTypeEntry) -> std::result::Result<(), String> {
    if entry.data_type == 0 {
        return Err("null data type id".to_string());
    }
    if entry.binary == 0 || entry.xml == 0 || entry.json == Some(0) {
        return Err("null encoding id".to_string());
    }
    if entry.binary == entry.xml {
        return Err(format!(
            "binary and XML encoding ids collide at {}",
            entry.binary
        ));
    }
    Ok(())
}

static BUILTIN_REGISTRY: std::sync::OnceLock<DataTypeRegistry> = std::sync::OnceLock::new();

/// Get the process-wide built-in type registry.
///
/// The registry is created and bootstrapped exactly once, on first access;
/// concurrent first accesses all observe the fully-populated registry.
///
/// # Panics
///
/// Panics if the bootstrap itself fails, which only happens when the static
/// registration tables are malformed.
pub fn builtin_registry() -> &'static DataTypeRegistry {
    BUILTIN_REGISTRY.get_or_init(|| {
        let registry = DataTypeRegistry::new();
        match bootstrap(&registry) {
            Ok(()) => registry,
            Err(err) => panic!("built-in type bootstrap failed: {err}"),
        }
    })
}
