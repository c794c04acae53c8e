//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Per-packet-type decoders for the packets a client receives.
//!
//! Each decoder consumes one complete packet body as delivered by the
//! framing layer and returns a struct whose fallible fields are `Option`s.
//! A truncated packet yields a partially populated struct, never an error:
//! the protocol favors keeping what parsed over rejecting the frame.

use crate::fixed_header::FixedHeader;
use crate::fixed_header::PacketType;
use crate::ProtocolVersion;

pub mod ack;
pub mod connack;
pub mod disconnect;
pub mod publish;
pub mod suback;
pub mod unsuback;

pub use self::ack::DecodedPubAck;
pub use self::ack::DecodedPubComp;
pub use self::connack::DecodedConnAck;
pub use self::disconnect::DecodedDisconnect;
pub use self::publish::DecodedPublish;
pub use self::suback::DecodedSubAck;
pub use self::unsuback::DecodedUnsubAck;

/// One decoded server-to-client control packet.
#[derive(Debug, PartialEq)]
pub enum DecodedPacket<'i> {
    Publish(DecodedPublish<'i>),
    Puback(DecodedPubAck<'i>),
    Pubrec(DecodedPubAck<'i>),
    Pubrel(DecodedPubComp<'i>),
    Pubcomp(DecodedPubComp<'i>),
    Suback(DecodedSubAck<'i>),
    Unsuback(DecodedUnsubAck<'i>),
    Connack(DecodedConnAck<'i>),
    Disconnect(DecodedDisconnect<'i>),
    Pingreq,
    Pingresp,
}

impl<'i> DecodedPacket<'i> {
    /// Dispatches on the fixed header byte.
    ///
    /// Returns `None` for an invalid header and for the client-to-server
    /// packet types this receiving core does not decode (CONNECT,
    /// SUBSCRIBE, UNSUBSCRIBE, AUTH).
    pub fn decode(
        fixed_header: u8,
        body: &'i [u8],
        version: ProtocolVersion,
    ) -> Option<DecodedPacket<'i>> {
        let header = FixedHeader::decode(fixed_header)?;

        let packet = match header.packet_type {
            PacketType::Publish { dup, qos, retain } => {
                DecodedPacket::Publish(DecodedPublish::decode(dup, qos, retain, body, version))
            }
            PacketType::Puback => DecodedPacket::Puback(DecodedPubAck::decode(body, version)),
            PacketType::Pubrec => DecodedPacket::Pubrec(DecodedPubAck::decode(body, version)),
            PacketType::Pubrel => DecodedPacket::Pubrel(DecodedPubComp::decode(body, version)),
            PacketType::Pubcomp => DecodedPacket::Pubcomp(DecodedPubComp::decode(body, version)),
            PacketType::Suback => DecodedPacket::Suback(DecodedSubAck::decode(body, version)),
            PacketType::Unsuback => {
                DecodedPacket::Unsuback(DecodedUnsubAck::decode(body, version))
            }
            PacketType::Connack => DecodedPacket::Connack(DecodedConnAck::decode(body, version)),
            PacketType::Disconnect => {
                DecodedPacket::Disconnect(DecodedDisconnect::decode(body, version))
            }
            PacketType::Pingreq => DecodedPacket::Pingreq,
            PacketType::Pingresp => DecodedPacket::Pingresp,
            PacketType::Connect
            | PacketType::Subscribe
            | PacketType::Unsubscribe
            | PacketType::Auth => return None,
        };

        Some(packet)
    }
}
