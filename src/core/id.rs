// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Namespace-qualified type identifiers.
//!
//! Two flavors exist:
//! - [`NodeId`] - the local form, namespace index already resolved against
//!   the running process's namespace table. Immutable and hashable; used as
//!   the key type everywhere in the registry.
//! - [`ExpandedNodeId`] - the portable form, carrying a namespace URI
//!   instead of an index. Must be resolved to a [`NodeId`] before use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::UaError;
use super::namespace::NamespaceTable;

/// Identifier portion of a [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identifier {
    /// Numeric identifier (the common case for well-known types)
    Numeric(u32),
    /// String identifier
    String(String),
    /// GUID identifier
    Guid(Uuid),
    /// Opaque byte-string identifier
    Opaque(Vec<u8>),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "i={n}"),
            Identifier::String(s) => write!(f, "s={s}"),
            Identifier::Guid(g) => write!(f, "g={g}"),
            Identifier::Opaque(b) => write!(f, "b={}", hex::encode(b)),
        }
    }
}

/// A namespace-qualified identifier in local form.
///
/// The namespace index is relative to the process's [`NamespaceTable`].
/// Equal identifiers compare equal and hash equal regardless of which code
/// path constructed them, so `NodeId` is usable as a map key across all
/// registry indexes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Namespace index into the process namespace table
    pub namespace: u16,
    /// Identifier within the namespace
    pub identifier: Identifier,
}

impl NodeId {
    /// Create a numeric identifier.
    pub fn numeric(namespace: u16, value: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(value),
        }
    }

    /// Create a string identifier.
    pub fn string(namespace: u16, value: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(value.into()),
        }
    }

    /// Create a GUID identifier.
    pub fn guid(namespace: u16, value: Uuid) -> Self {
        Self {
            namespace,
            identifier: Identifier::Guid(value),
        }
    }

    /// Create an opaque byte-string identifier.
    pub fn opaque(namespace: u16, value: impl Into<Vec<u8>>) -> Self {
        Self {
            namespace,
            identifier: Identifier::Opaque(value.into()),
        }
    }

    /// The null identifier (`ns=0;i=0`).
    pub fn null() -> Self {
        Self::numeric(0, 0)
    }

    /// Check whether this is a null identifier.
    ///
    /// Every identifier flavor has a null sentinel: numeric 0, the empty
    /// string, the nil GUID, and the empty byte string, all in namespace 0.
    pub fn is_null(&self) -> bool {
        if self.namespace != 0 {
            return false;
        }
        match &self.identifier {
            Identifier::Numeric(n) => *n == 0,
            Identifier::String(s) => s.is_empty(),
            Identifier::Guid(g) => g.is_nil(),
            Identifier::Opaque(b) => b.is_empty(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};{}", self.namespace, self.identifier)
        } else {
            write!(f, "{}", self.identifier)
        }
    }
}

impl FromStr for NodeId {
    type Err = UaError;

    /// Parse the standard string form (`ns=2;i=1234`, `s=Name`, `g=<uuid>`,
    /// `b=<hex>`). The `ns=` prefix is optional and defaults to namespace 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, rest) = match s.strip_prefix("ns=") {
            Some(tail) => {
                let (index, rest) = tail.split_once(';').ok_or_else(|| {
                    UaError::decoding(s, "missing ';' after namespace index")
                })?;
                let namespace: u16 = index
                    .parse()
                    .map_err(|_| UaError::decoding(s, "invalid namespace index"))?;
                (namespace, rest)
            }
            None => (0, s),
        };

        let identifier = match rest.split_once('=') {
            Some(("i", value)) => Identifier::Numeric(
                value
                    .parse()
                    .map_err(|_| UaError::decoding(s, "invalid numeric identifier"))?,
            ),
            Some(("s", value)) => Identifier::String(value.to_string()),
            Some(("g", value)) => Identifier::Guid(
                Uuid::parse_str(value)
                    .map_err(|_| UaError::decoding(s, "invalid GUID identifier"))?,
            ),
            Some(("b", value)) => Identifier::Opaque(
                hex::decode(value)
                    .map_err(|_| UaError::decoding(s, "invalid opaque identifier"))?,
            ),
            _ => {
                return Err(UaError::decoding(
                    s,
                    "expected identifier of the form i=, s=, g= or b=",
                ))
            }
        };

        Ok(NodeId {
            namespace,
            identifier,
        })
    }
}

/// A namespace-portable identifier.
///
/// Carries a namespace URI instead of a resolved index, for configuration
/// files or cross-server references. Resolve against a [`NamespaceTable`]
/// before using the result as a registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpandedNodeId {
    /// Namespace URI; when absent the inner node id's index is authoritative
    pub namespace_uri: Option<String>,
    /// Server index (0 for the local server)
    pub server_index: u32,
    /// The identifier, namespace index meaningful only when no URI is set
    pub node: NodeId,
}

impl ExpandedNodeId {
    /// Wrap an already-local identifier.
    pub fn local(node: NodeId) -> Self {
        Self {
            namespace_uri: None,
            server_index: 0,
            node,
        }
    }

    /// Create a portable identifier qualified by a namespace URI.
    pub fn with_uri(uri: impl Into<String>, identifier: Identifier) -> Self {
        Self {
            namespace_uri: Some(uri.into()),
            server_index: 0,
            node: NodeId {
                namespace: 0,
                identifier,
            },
        }
    }

    /// Resolve to a local [`NodeId`] against the given namespace table.
    ///
    /// Returns `None` when a namespace URI is present but not registered in
    /// the table. When no URI is carried, the inner node id is returned
    /// unchanged.
    pub fn resolve(&self, namespaces: &NamespaceTable) -> Option<NodeId> {
        match &self.namespace_uri {
            None => Some(self.node.clone()),
            Some(uri) => {
                let namespace = namespaces.index_of(uri)?;
                Some(NodeId {
                    namespace,
                    identifier: self.node.identifier.clone(),
                })
            }
        }
    }
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        match &self.namespace_uri {
            Some(uri) => write!(f, "nsu={};{}", uri, self.node.identifier),
            None => write!(f, "{}", self.node),
        }
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node: NodeId) -> Self {
        ExpandedNodeId::local(node)
    }
}
