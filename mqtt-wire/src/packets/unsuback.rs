//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use crate::bytes::ByteCursor;
use crate::properties::PropertyBlock;
use crate::reason_code::UnsubackReasonCode;
use crate::ProtocolVersion;

/// A received UNSUBACK packet, same shape as SUBACK with its own code set.
#[derive(Debug, Default, PartialEq)]
pub struct DecodedUnsubAck<'i> {
    pub packet_identifier: Option<u16>,
    pub properties: PropertyBlock<'i>,
    pub reason_codes: Vec<UnsubackReasonCode>,
}

impl<'i> DecodedUnsubAck<'i> {
    pub fn decode(body: &'i [u8], version: ProtocolVersion) -> DecodedUnsubAck<'i> {
        let mut packet = DecodedUnsubAck::default();
        let mut cursor = ByteCursor::new(body);

        let Some(packet_identifier) = cursor.read_u16() else {
            return packet;
        };
        packet.packet_identifier = Some(packet_identifier);

        if version.has_properties() {
            packet.properties = PropertyBlock::decode(&mut cursor);
        }

        while let Some(code) = UnsubackReasonCode::read(&mut cursor) {
            packet.reason_codes.push(code);
        }

        packet
    }
}
