//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use bytes::Bytes;
use mqtt_wire::packets::DecodedPacket;
use mqtt_wire::ProtocolVersion;

/// One complete control packet as handed over by the framing layer: the
/// fixed header byte plus the owned remaining bytes.
///
/// The buffer is reference counted, so the frame can be held onto or cloned
/// cheaply while decoded views borrow from it.
#[derive(Debug, Clone)]
pub struct ReceivedPacket {
    fixed_header: u8,
    body: Bytes,
    version: ProtocolVersion,
}

impl ReceivedPacket {
    pub fn new(fixed_header: u8, body: Bytes, version: ProtocolVersion) -> ReceivedPacket {
        ReceivedPacket {
            fixed_header,
            body,
            version,
        }
    }

    pub fn fixed_header(&self) -> u8 {
        self.fixed_header
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Decodes the packet, borrowing from the owned buffer.
    ///
    /// `None` only for an invalid fixed header or a packet type a client
    /// never receives; anything else decodes best effort.
    pub fn decode(&self) -> Option<DecodedPacket<'_>> {
        DecodedPacket::decode(self.fixed_header, &self.body, self.version)
    }
}
