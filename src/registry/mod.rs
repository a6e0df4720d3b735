// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Data type registry.
//!
//! This module provides the registry layer of the library:
//! - [`dictionary`] - Per-namespace, per-encoding codec dictionaries
//! - [`manager`] - The process-wide registry with flattened lookup indexes
//! - [`builtin`] - Built-in type tables and the one-time bootstrap

pub mod builtin;
pub mod dictionary;
pub mod manager;

pub use builtin::{bootstrap, builtin_registry, BuiltinEnumEntry, BuiltinTypeEntry};
pub use dictionary::{DataTypeDictionary, EnumCodecInfo, StructCodecInfo};
pub use manager::DataTypeRegistry;
