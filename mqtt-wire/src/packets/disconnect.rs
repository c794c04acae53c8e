//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use crate::bytes::ByteCursor;
use crate::properties::PropertyBlock;
use crate::reason_code::DisconnectReasonCode;
use crate::ProtocolVersion;

/// A received DISCONNECT packet.
///
/// An empty body is legal and means a normal disconnection; the reason code
/// is left absent rather than defaulted so that stays visible to the caller.
#[derive(Debug, Default, PartialEq)]
pub struct DecodedDisconnect<'i> {
    pub reason_code: Option<DisconnectReasonCode>,
    pub properties: PropertyBlock<'i>,
}

impl<'i> DecodedDisconnect<'i> {
    pub fn decode(body: &'i [u8], version: ProtocolVersion) -> DecodedDisconnect<'i> {
        let mut packet = DecodedDisconnect::default();
        let mut cursor = ByteCursor::new(body);

        let Some(reason_code) = DisconnectReasonCode::read(&mut cursor) else {
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
    use crate::reason_code::DisconnectReasonCode;
    use crate::ProtocolVersion;

    #[test]
    fn check_disconnect() {
        let body = [0x8B];
        let packet = DecodedPacket::decode(0b1110_0000, &body, ProtocolVersion::V5);

        match packet {
            Some(DecodedPacket::Disconnect(disconnect)) => {
                assert_eq!(
                    disconnect.reason_code,
                    Some(DisconnectReasonCode::ServerShuttingDown)
                );
            }
            other => panic!("expected a DISCONNECT, got {other:?}"),
        }
    }

    #[test]
    fn check_empty_disconnect() {
        let packet = DecodedPacket::decode(0b1110_0000, &[], ProtocolVersion::V5);

        match packet {
            Some(DecodedPacket::Disconnect(disconnect)) => {
                assert_eq!(disconnect.reason_code, None);
            }
            other => panic!("expected a DISCONNECT, got {other:?}"),
        }
    }
}
