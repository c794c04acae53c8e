//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Everything around decoding the fixed MQTT header byte

use crate::qos::QualityOfService;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PacketType {
    Connect,
    Connack,
    Publish {
        dup: bool,
        qos: QualityOfService,
        retain: bool,
    },
    Puback,
    Pubrec,
    Pubrel,
    Pubcomp,
    Subscribe,
    Suback,
    Unsubscribe,
    Unsuback,
    Pingreq,
    Pingresp,
    Disconnect,
    Auth,
}

#[derive(Debug, PartialEq)]
pub struct FixedHeader {
    pub packet_type: PacketType,
}

impl FixedHeader {
    /// Decodes the first byte of a control packet.
    ///
    /// The upper nibble selects the packet type, the lower nibble carries
    /// flags. Only PUBLISH puts meaning into its flags for a receiver;
    /// reserved flag bits of other packet types are ignored rather than
    /// rejected, matching the tolerant stance of the rest of this crate. A
    /// type nibble of 0 or a QoS of 3 has no valid meaning and fails.
    pub fn decode(byte: u8) -> Option<FixedHeader> {
        let flags = byte & 0x0F;

        let packet_type = match byte >> 4 {
            1 => PacketType::Connect,
            2 => PacketType::Connack,
            3 => PacketType::Publish {
                dup: (0b1000 & flags) != 0,
                qos: QualityOfService::try_from((flags & 0b0110) >> 1).ok()?,
                retain: (0b0001 & flags) != 0,
            },
            4 => PacketType::Puback,
            5 => PacketType::Pubrec,
            6 => PacketType::Pubrel,
            7 => PacketType::Pubcomp,
            8 => PacketType::Subscribe,
            9 => PacketType::Suback,
            10 => PacketType::Unsubscribe,
            11 => PacketType::Unsuback,
            12 => PacketType::Pingreq,
            13 => PacketType::Pingresp,
            14 => PacketType::Disconnect,
            15 => PacketType::Auth,
            _ => return None,
        };

        Some(FixedHeader { packet_type })
    }
}
