//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use crate::bytes::ByteCursor;
use crate::properties::PropertyBlock;
use crate::reason_code::ConnectReasonCode;
use crate::ProtocolVersion;

/// A received CONNACK packet.
#[derive(Debug, Default, PartialEq)]
pub struct DecodedConnAck<'i> {
    pub session_present: Option<bool>,
    pub reason_code: Option<ConnectReasonCode>,
    pub properties: PropertyBlock<'i>,
}

impl<'i> DecodedConnAck<'i> {
    pub fn decode(body: &'i [u8], version: ProtocolVersion) -> DecodedConnAck<'i> {
        let mut packet = DecodedConnAck::default();
        let mut cursor = ByteCursor::new(body);

        let Some(acknowledge_flags) = cursor.read_u8() else {
            return packet;
        };
        packet.session_present = Some(acknowledge_flags & 0b0000_0001 != 0);

        let Some(reason_code) = ConnectReasonCode::read(&mut cursor) else {
            return packet;
        };
        packet.reason_code = Some(reason_code);

        if version.has_properties() {
            packet.properties = PropertyBlock::decode(&mut cursor);
        }

        packet
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::packets::DecodedPacket;
    use crate::properties::PropertyId;
    use crate::reason_code::ConnectReasonCode;
    use crate::ProtocolVersion;

    #[test]
    fn check_connack() {
        #[rustfmt::skip]
        let body = [
            0x01, // session present
            0x00, // success
            0x05, PropertyId::AssignedClientIdentifier.into(), 0x00, 0x02, b'i', b'd',
        ];
        let packet = DecodedPacket::decode(0b0010_0000, &body, ProtocolVersion::V5);

        match packet {
            Some(DecodedPacket::Connack(connack)) => {
                assert_eq!(connack.session_present, Some(true));
                assert_eq!(connack.reason_code, Some(ConnectReasonCode::Success));
                assert_eq!(connack.properties.assigned_client_identifier, Some("id"));
            }
            other => panic!("expected a CONNACK, got {other:?}"),
        }
    }

    #[test]
    fn check_empty_connack() {
        let packet = DecodedPacket::decode(0b0010_0000, &[], ProtocolVersion::V5);

        match packet {
            Some(DecodedPacket::Connack(connack)) => {
                assert_eq!(connack.session_present, None);
                assert_eq!(connack.reason_code, None);
            }
            other => panic!("expected a CONNACK, got {other:?}"),
        }
    }
}
