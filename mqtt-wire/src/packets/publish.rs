//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use crate::bytes::ByteCursor;
use crate::properties::PropertyBlock;
use crate::qos::QualityOfService;
use crate::ProtocolVersion;

/// A received PUBLISH packet.
///
/// `payload` is absent when decoding gave up before reaching it, which is
/// distinct from a present but empty payload.
#[derive(Debug, Default, PartialEq)]
pub struct DecodedPublish<'i> {
    pub dup: bool,
    pub qos: QualityOfService,
    pub retain: bool,
    pub topic: Option<&'i str>,
    pub packet_identifier: Option<u16>,
    pub properties: PropertyBlock<'i>,
    pub payload: Option<&'i [u8]>,
}

impl<'i> DecodedPublish<'i> {
    pub fn decode(
        dup: bool,
        qos: QualityOfService,
        retain: bool,
        body: &'i [u8],
        version: ProtocolVersion,
    ) -> DecodedPublish<'i> {
        let mut packet = DecodedPublish {
            dup,
            qos,
            retain,
            ..DecodedPublish::default()
        };
        let mut cursor = ByteCursor::new(body);

        let Some(topic) = cursor.read_string() else {
            return packet;
        };
        packet.topic = Some(topic);

        // A packet identifier is only on the wire for QoS 1 and 2
        if qos != QualityOfService::AtMostOnce {
            let Some(packet_identifier) = cursor.read_u16() else {
                return packet;
            };
            packet.packet_identifier = Some(packet_identifier);
        }

        if version.has_properties() {
            packet.properties = PropertyBlock::decode(&mut cursor);
        }

        packet.payload = Some(cursor.remaining());
        packet
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::packets::DecodedPacket;
    use crate::packets::DecodedPublish;
    use crate::properties::PropertyId;
    use crate::qos::QualityOfService;
    use crate::ProtocolVersion;

    const PUBLISH_QOS1: u8 = 0b0011_0010;

    fn decode_publish(body: &[u8]) -> DecodedPublish<'_> {
        match DecodedPacket::decode(PUBLISH_QOS1, body, ProtocolVersion::V5) {
            Some(DecodedPacket::Publish(publish)) => publish,
            other => panic!("expected a PUBLISH, got {other:?}"),
        }
    }

    #[test]
    fn check_publish_with_property() {
        #[rustfmt::skip]
        let body = [
            0x00, 0x05, b't', b'o', b'p', b'i', b'c',
            0x00, 0x01, // packet identifier
            0x02, PropertyId::PayloadFormatIndicator.into(), 0x01,
            b'h', b'i',
        ];

        let publish = decode_publish(&body);

        assert_eq!(publish.topic, Some("topic"));
        assert_eq!(publish.qos, QualityOfService::AtLeastOnce);
        assert_eq!(publish.packet_identifier, Some(1));
        assert_eq!(publish.properties.payload_format_indicator, Some(1));
        assert_eq!(publish.payload, Some(&b"hi"[..]));
    }

    #[test]
    fn check_publish_with_truncated_property_value() {
        // Property block announces a payload format indicator but its value
        // byte is missing.
        #[rustfmt::skip]
        let body = [
            0x00, 0x05, b't', b'o', b'p', b'i', b'c',
            0x00, 0x01,
            0x02, PropertyId::PayloadFormatIndicator.into(),
        ];

        let publish = decode_publish(&body);

        assert_eq!(publish.topic, Some("topic"));
        assert_eq!(publish.packet_identifier, Some(1));
        assert_eq!(publish.properties.payload_format_indicator, None);
    }

    #[test]
    fn check_publish_with_truncated_topic() {
        let body = [0x00, 0x05, b't', b'o'];
        let publish = decode_publish(&body);

        assert_eq!(publish.topic, None);
        assert_eq!(publish.packet_identifier, None);
        assert_eq!(publish.payload, None);
    }

    #[test]
    fn check_publish_with_missing_packet_identifier() {
        let body = [0x00, 0x05, b't', b'o', b'p', b'i', b'c', 0x00];
        let publish = decode_publish(&body);

        assert_eq!(publish.topic, Some("topic"));
        assert_eq!(publish.packet_identifier, None);
    }

    #[test]
    fn check_qos0_publish_has_no_packet_identifier() {
        let body = [0x00, 0x01, b't', 0x00, b'x'];
        let packet = DecodedPacket::decode(0b0011_0000, &body, ProtocolVersion::V5);

        match packet {
            Some(DecodedPacket::Publish(publish)) => {
                assert_eq!(publish.topic, Some("t"));
                assert_eq!(publish.packet_identifier, None);
                assert_eq!(publish.payload, Some(&b"x"[..]));
            }
            other => panic!("expected a PUBLISH, got {other:?}"),
        }
    }

    #[test]
    fn check_v3_publish_skips_properties() {
        let body = [0x00, 0x01, b't', 0x00, 0x01, 0x02, 0x01, 0x01];
        let packet = DecodedPacket::decode(PUBLISH_QOS1, &body, ProtocolVersion::V3_1_1);

        match packet {
            Some(DecodedPacket::Publish(publish)) => {
                assert_eq!(publish.packet_identifier, Some(1));
                // For 3.1.1 the property block bytes are payload
                assert_eq!(publish.payload, Some(&[0x02, 0x01, 0x01][..]));
                assert_eq!(publish.properties.payload_format_indicator, None);
            }
            other => panic!("expected a PUBLISH, got {other:?}"),
        }
    }
}
