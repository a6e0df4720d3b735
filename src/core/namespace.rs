// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Runtime namespace table.
//!
//! Maps namespace URIs to the small integer indexes used to compact
//! identifiers on the wire. Index 0 is always the OPC-UA namespace.

use super::error::{Result, UaError};

/// URI of the OPC-UA namespace, always at index 0.
pub const OPC_UA_NAMESPACE_URI: &str = "http://opcfoundation.org/UA/";

/// Ordered mapping from namespace URI to namespace index.
///
/// The table only grows; indexes handed out stay valid for the lifetime of
/// the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTable {
    uris: Vec<String>,
}

impl NamespaceTable {
    /// Create a table containing only the OPC-UA namespace at index 0.
    pub fn new() -> Self {
        Self {
            uris: vec![OPC_UA_NAMESPACE_URI.to_string()],
        }
    }

    /// Register a namespace URI, returning its index.
    ///
    /// Idempotent: registering an already-known URI returns its existing
    /// index.
    ///
    /// # Errors
    ///
    /// Fails when the table has exhausted the u16 index space.
    pub fn register(&mut self, uri: impl Into<String>) -> Result<u16> {
        let uri = uri.into();
        if let Some(index) = self.index_of(&uri) {
            return Ok(index);
        }
        if self.uris.len() > usize::from(u16::MAX) {
            return Err(UaError::encoding(uri, "namespace table is full"));
        }
        self.uris.push(uri);
        Ok((self.uris.len() - 1) as u16)
    }

    /// Look up the index of a namespace URI.
    pub fn index_of(&self, uri: &str) -> Option<u16> {
        self.uris
            .iter()
            .position(|candidate| candidate == uri)
            .map(|index| index as u16)
    }

    /// Look up the URI registered at an index.
    pub fn uri_of(&self, index: u16) -> Option<&str> {
        self.uris.get(usize::from(index)).map(String::as_str)
    }

    /// Number of registered namespaces.
    pub fn len(&self) -> usize {
        self.uris.len()
    }

    /// A table is never empty; index 0 is always present.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opc_ua_namespace_is_index_zero() {
        let table = NamespaceTable::new();
        assert_eq!(table.index_of(OPC_UA_NAMESPACE_URI), Some(0));
        assert_eq!(table.uri_of(0), Some(OPC_UA_NAMESPACE_URI));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_register_assigns_sequential_indexes() {
        let mut table = NamespaceTable::new();
        assert_eq!(table.register("urn:example:a").unwrap(), 1);
        assert_eq!(table.register("urn:example:b").unwrap(), 2);
        assert_eq!(table.uri_of(2), Some("urn:example:b"));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut table = NamespaceTable::new();
        let first = table.register("urn:example:a").unwrap();
        let second = table.register("urn:example:a").unwrap();
        assert_eq!(first, second);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unknown_uri_is_none() {
        let table = NamespaceTable::new();
        assert_eq!(table.index_of("urn:example:missing"), None);
        assert_eq!(table.uri_of(42), None);
    }
}
