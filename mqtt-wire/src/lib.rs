//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Decoding of MQTT control packets received from an untrusted transport.
//!
//! Every decoder in this crate is bounds-checked and infallible: a truncated
//! or malformed input degrades to absent fields, never to a panic or an
//! out-of-bounds read. See [`packets::DecodedPacket`] for the entry point.

#![deny(missing_debug_implementations)]

pub mod bytes;
pub mod fixed_header;
pub mod integers;
pub mod packets;
pub mod properties;
pub mod qos;
pub mod reason_code;
pub mod strings;

/// The protocol revision a connection was established with.
///
/// Property blocks only exist on the wire for MQTT 5.0, so packet decoders
/// are gated on this.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProtocolVersion {
    V3_1_1,
    V5,
}

impl ProtocolVersion {
    pub fn has_properties(&self) -> bool {
        matches!(self, ProtocolVersion::V5)
    }
}
