// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binary wire support.
//!
//! [`BinaryWriter`] and [`BinaryReader`] provide the primitive-level access
//! codecs use for the binary encoding. All multi-byte values are
//! little-endian. Strings and byte strings are length-prefixed with an i32,
//! where -1 marks a null value.

use byteorder::{ByteOrder, LittleEndian};
use uuid::Uuid;

use crate::core::{Identifier, NodeId, Result, UaError};

/// Length prefix marking a null string or byte string.
const NULL_LENGTH: i32 = -1;

// Node id format bytes, per the compact binary identifier forms.
const NODE_ID_TWO_BYTE: u8 = 0x00;
const NODE_ID_FOUR_BYTE: u8 = 0x01;
const NODE_ID_NUMERIC: u8 = 0x02;
const NODE_ID_STRING: u8 = 0x03;
const NODE_ID_GUID: u8 = 0x04;
const NODE_ID_OPAQUE: u8 = 0x05;

/// Writer for binary-encoded data.
///
/// Appends to a borrowed buffer so the dispatcher can hand it a pooled
/// scratch buffer. Writes are infallible; the buffer grows as needed.
pub struct BinaryWriter<'a> {
    out: &'a mut Vec<u8>,
}

impl<'a> BinaryWriter<'a> {
    /// Create a writer appending to `out`.
    pub fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Check whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn write_bool(&mut self, value: bool) {
        self.out.push(u8::from(value));
    }

    pub fn write_u8(&mut self, value: u8) {
        self.out.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.out.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, value);
        self.out.extend_from_slice(&buf);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16);
    }

    pub fn write_u32(&mut self, value: u32) {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.out.extend_from_slice(&buf);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32);
    }

    pub fn write_u64(&mut self, value: u64) {
        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, value);
        self.out.extend_from_slice(&buf);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_u64(value as u64);
    }

    pub fn write_f32(&mut self, value: f32) {
        let mut buf = [0u8; 4];
        LittleEndian::write_f32(&mut buf, value);
        self.out.extend_from_slice(&buf);
    }

    pub fn write_f64(&mut self, value: f64) {
        let mut buf = [0u8; 8];
        LittleEndian::write_f64(&mut buf, value);
        self.out.extend_from_slice(&buf);
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) {
        self.write_i32(value.len() as i32);
        self.out.extend_from_slice(value.as_bytes());
    }

    /// Write a length-prefixed byte string.
    pub fn write_byte_string(&mut self, value: &[u8]) {
        self.write_i32(value.len() as i32);
        self.out.extend_from_slice(value);
    }

    /// Write a null string or byte string marker.
    pub fn write_null_string(&mut self) {
        self.write_i32(NULL_LENGTH);
    }

    /// Write a GUID in its binary field layout.
    pub fn write_guid(&mut self, value: &Uuid) {
        let (d1, d2, d3, d4) = value.as_fields();
        self.write_u32(d1);
        self.write_u16(d2);
        self.write_u16(d3);
        self.out.extend_from_slice(d4);
    }

    /// Write a node id in its compact binary form.
    ///
    /// Numeric identifiers use the two-byte or four-byte form when they fit.
    pub fn write_node_id(&mut self, value: &NodeId) {
        match &value.identifier {
            Identifier::Numeric(n) => {
                if value.namespace == 0 && *n <= u32::from(u8::MAX) {
                    self.write_u8(NODE_ID_TWO_BYTE);
                    self.write_u8(*n as u8);
                } else if value.namespace <= u16::from(u8::MAX) && *n <= u32::from(u16::MAX) {
                    self.write_u8(NODE_ID_FOUR_BYTE);
                    self.write_u8(value.namespace as u8);
                    self.write_u16(*n as u16);
                } else {
                    self.write_u8(NODE_ID_NUMERIC);
                    self.write_u16(value.namespace);
                    self.write_u32(*n);
                }
            }
            Identifier::String(s) => {
                self.write_u8(NODE_ID_STRING);
                self.write_u16(value.namespace);
                self.write_string(s);
            }
            Identifier::Guid(g) => {
                self.write_u8(NODE_ID_GUID);
                self.write_u16(value.namespace);
                self.write_guid(g);
            }
            Identifier::Opaque(b) => {
                self.write_u8(NODE_ID_OPAQUE);
                self.write_u16(value.namespace);
                self.write_byte_string(b);
            }
        }
    }
}

/// Bounds-checked reader over binary-encoded data.
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a reader over `data`, starting at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes remaining after the read position.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Take the next `count` bytes, or fail with a buffer-too-short error.
    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(UaError::buffer_too_short(
                count,
                self.remaining(),
                self.position,
            ));
        }
        let slice = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(slice)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.take(1)?[0] != 0)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Read a length-prefixed UTF-8 string; a -1 length yields the empty
    /// string.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_i32()?;
        if length == NULL_LENGTH {
            return Ok(String::new());
        }
        if length < 0 {
            return Err(UaError::decoding(
                "string",
                format!("invalid length prefix {length}"),
            ));
        }
        let bytes = self.take(length as usize)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| UaError::decoding("string", e.to_string()))
    }

    /// Read a length-prefixed byte string; a -1 length yields an empty
    /// buffer.
    pub fn read_byte_string(&mut self) -> Result<Vec<u8>> {
        let length = self.read_i32()?;
        if length == NULL_LENGTH {
            return Ok(Vec::new());
        }
        if length < 0 {
            return Err(UaError::decoding(
                "byte string",
                format!("invalid length prefix {length}"),
            ));
        }
        Ok(self.take(length as usize)?.to_vec())
    }

    /// Read a GUID from its binary field layout.
    pub fn read_guid(&mut self) -> Result<Uuid> {
        let d1 = self.read_u32()?;
        let d2 = self.read_u16()?;
        let d3 = self.read_u16()?;
        let d4: [u8; 8] = self.take(8)?.try_into().map_err(|_| {
            UaError::decoding("guid", "short trailing field")
        })?;
        Ok(Uuid::from_fields(d1, d2, d3, &d4))
    }

    /// Read a node id written by [`BinaryWriter::write_node_id`].
    pub fn read_node_id(&mut self) -> Result<NodeId> {
        let format = self.read_u8()?;
        match format {
            NODE_ID_TWO_BYTE => Ok(NodeId::numeric(0, u32::from(self.read_u8()?))),
            NODE_ID_FOUR_BYTE => {
                let namespace = u16::from(self.read_u8()?);
                let value = u32::from(self.read_u16()?);
                Ok(NodeId::numeric(namespace, value))
            }
            NODE_ID_NUMERIC => {
                let namespace = self.read_u16()?;
                let value = self.read_u32()?;
                Ok(NodeId::numeric(namespace, value))
            }
            NODE_ID_STRING => {
                let namespace = self.read_u16()?;
                let value = self.read_string()?;
                Ok(NodeId::string(namespace, value))
            }
            NODE_ID_GUID => {
                let namespace = self.read_u16()?;
                let value = self.read_guid()?;
                Ok(NodeId::guid(namespace, value))
            }
            NODE_ID_OPAQUE => {
                let namespace = self.read_u16()?;
                let value = self.read_byte_string()?;
                Ok(NodeId::opaque(namespace, value))
            }
            other => Err(UaError::decoding(
                "node id",
                format!("unknown identifier format 0x{other:02x}"),
            )),
        }
    }
}
