//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use crate::bytes::ByteCursor;
use crate::properties::PropertyBlock;
use crate::reason_code::SubackReasonCode;
use crate::ProtocolVersion;

/// A received SUBACK packet: one reason code per subscription in the
/// SUBSCRIBE it acknowledges.
#[derive(Debug, Default, PartialEq)]
pub struct DecodedSubAck<'i> {
    pub packet_identifier: Option<u16>,
    pub properties: PropertyBlock<'i>,
    pub reason_codes: Vec<SubackReasonCode>,
}

impl<'i> DecodedSubAck<'i> {
    pub fn decode(body: &'i [u8], version: ProtocolVersion) -> DecodedSubAck<'i> {
        let mut packet = DecodedSubAck::default();
        let mut cursor = ByteCursor::new(body);

        let Some(packet_identifier) = cursor.read_u16() else {
            return packet;
        };
        packet.packet_identifier = Some(packet_identifier);

        if version.has_properties() {
            packet.properties = PropertyBlock::decode(&mut cursor);
        }

        // One code per remaining byte; an unrecognized value ends the list
        // but not the packet.
        while let Some(code) = SubackReasonCode::read(&mut cursor) {
            packet.reason_codes.push(code);
        }

        packet
    }
}
