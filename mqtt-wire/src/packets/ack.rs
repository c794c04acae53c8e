//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! The four publish acknowledgment packets share one wire shape: packet
//! identifier, then (MQTT 5 only) an optional reason code and property
//! block. A server may omit both when the code is Success and there are no
//! properties; the decoded reason code stays absent in that case so callers
//! can tell "omitted" from "sent 0x00".

use crate::bytes::ByteCursor;
use crate::properties::PropertyBlock;
use crate::reason_code::PubackReasonCode;
use crate::reason_code::PubrelReasonCode;
use crate::ProtocolVersion;

macro_rules! define_publish_ack {
    ($(#[$doc:meta])* pub struct $name:ident with $code:ty) => {
        $(#[$doc])*
        #[derive(Debug, Default, PartialEq)]
        pub struct $name<'i> {
            pub packet_identifier: Option<u16>,
            pub reason_code: Option<$code>,
            pub properties: PropertyBlock<'i>,
        }

        impl<'i> $name<'i> {
            pub fn decode(body: &'i [u8], version: ProtocolVersion) -> $name<'i> {
                let mut packet = $name::default();
                let mut cursor = ByteCursor::new(body);

                let Some(packet_identifier) = cursor.read_u16() else {
                    return packet;
                };
                packet.packet_identifier = Some(packet_identifier);

                if !version.has_properties() || cursor.is_empty() {
                    return packet;
                }

                let Some(reason_code) = <$code>::read(&mut cursor) else {
                    return packet;
                };
                packet.reason_code = Some(reason_code);

                if !cursor.is_empty() {
                    packet.properties = PropertyBlock::decode(&mut cursor);
                }

                packet
            }
        }
    };
}

define_publish_ack! {
    /// A received PUBACK or PUBREC packet.
    pub struct DecodedPubAck with PubackReasonCode
}

define_publish_ack! {
    /// A received PUBREL or PUBCOMP packet.
    pub struct DecodedPubComp with PubrelReasonCode
}
