//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! MQTT 5.0 property identifiers and best-effort property block decoding

use crate::bytes::ByteCursor;

/// The complete MQTT 5.0 property identifier table.
///
/// The raw values must match the protocol specification exactly, they are
/// matched against bytes coming off the wire.
#[derive(num_enum::TryFromPrimitive, num_enum::IntoPrimitive)]
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PropertyId {
    PayloadFormatIndicator = 0x01,
    MessageExpiryInterval = 0x02,
    ContentType = 0x03,
    ResponseTopic = 0x08,
    CorrelationData = 0x09,
    SubscriptionIdentifier = 0x0B,
    SessionExpiryInterval = 0x11,
    AssignedClientIdentifier = 0x12,
    ServerKeepAlive = 0x13,
    AuthenticationMethod = 0x15,
    AuthenticationData = 0x16,
    RequestProblemInformation = 0x17,
    WillDelayInterval = 0x18,
    RequestResponseInformation = 0x19,
    ResponseInformation = 0x1A,
    ServerReference = 0x1C,
    ReasonString = 0x1F,
    ReceiveMaximum = 0x21,
    TopicAliasMaximum = 0x22,
    TopicAlias = 0x23,
    MaximumQoS = 0x24,
    RetainAvailable = 0x25,
    UserProperty = 0x26,
    MaximumPacketSize = 0x27,
    WildcardSubscriptionAvailable = 0x28,
    SubscriptionIdentifiersAvailable = 0x29,
    SharedSubscriptionAvailable = 0x2A,
}

/// A single decoded property, typed per its identifier.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Property<'i> {
    PayloadFormatIndicator(u8),
    MessageExpiryInterval(u32),
    ContentType(&'i str),
    ResponseTopic(&'i str),
    CorrelationData(&'i [u8]),
    SubscriptionIdentifier(u32),
    SessionExpiryInterval(u32),
    AssignedClientIdentifier(&'i str),
    ServerKeepAlive(u16),
    AuthenticationMethod(&'i str),
    AuthenticationData(&'i [u8]),
    RequestProblemInformation(u8),
    WillDelayInterval(u32),
    RequestResponseInformation(u8),
    ResponseInformation(&'i str),
    ServerReference(&'i str),
    ReasonString(&'i str),
    ReceiveMaximum(u16),
    TopicAliasMaximum(u16),
    TopicAlias(u16),
    MaximumQoS(u8),
    RetainAvailable(u8),
    UserProperty(&'i str, &'i str),
    MaximumPacketSize(u32),
    WildcardSubscriptionAvailable(u8),
    SubscriptionIdentifiersAvailable(u8),
    SharedSubscriptionAvailable(u8),
}

impl<'i> Property<'i> {
    /// Reads the value for an already decoded identifier.
    ///
    /// Returns `None` on truncation, leaving the cursor where the value
    /// would have started.
    pub fn read(id: PropertyId, cursor: &mut ByteCursor<'i>) -> Option<Property<'i>> {
        let prop = match id {
            PropertyId::PayloadFormatIndicator => {
                Property::PayloadFormatIndicator(cursor.read_u8()?)
            }
            PropertyId::MessageExpiryInterval => {
                Property::MessageExpiryInterval(cursor.read_u32()?)
            }
            PropertyId::ContentType => Property::ContentType(cursor.read_string()?),
            PropertyId::ResponseTopic => Property::ResponseTopic(cursor.read_string()?),
            PropertyId::CorrelationData => Property::CorrelationData(cursor.read_binary_data()?),
            PropertyId::SubscriptionIdentifier => {
                Property::SubscriptionIdentifier(cursor.read_variable_u32()?)
            }
            PropertyId::SessionExpiryInterval => {
                Property::SessionExpiryInterval(cursor.read_u32()?)
            }
            PropertyId::AssignedClientIdentifier => {
                Property::AssignedClientIdentifier(cursor.read_string()?)
            }
            PropertyId::ServerKeepAlive => Property::ServerKeepAlive(cursor.read_u16()?),
            PropertyId::AuthenticationMethod => {
                Property::AuthenticationMethod(cursor.read_string()?)
            }
            PropertyId::AuthenticationData => {
                Property::AuthenticationData(cursor.read_binary_data()?)
            }
            PropertyId::RequestProblemInformation => {
                Property::RequestProblemInformation(cursor.read_u8()?)
            }
            PropertyId::WillDelayInterval => Property::WillDelayInterval(cursor.read_u32()?),
            PropertyId::RequestResponseInformation => {
                Property::RequestResponseInformation(cursor.read_u8()?)
            }
            PropertyId::ResponseInformation => {
                Property::ResponseInformation(cursor.read_string()?)
            }
            PropertyId::ServerReference => Property::ServerReference(cursor.read_string()?),
            PropertyId::ReasonString => Property::ReasonString(cursor.read_string()?),
            PropertyId::ReceiveMaximum => Property::ReceiveMaximum(cursor.read_u16()?),
            PropertyId::TopicAliasMaximum => Property::TopicAliasMaximum(cursor.read_u16()?),
            PropertyId::TopicAlias => Property::TopicAlias(cursor.read_u16()?),
            PropertyId::MaximumQoS => Property::MaximumQoS(cursor.read_u8()?),
            PropertyId::RetainAvailable => Property::RetainAvailable(cursor.read_u8()?),
            PropertyId::UserProperty => {
                let (key, value) = cursor.read_string_pair()?;
                Property::UserProperty(key, value)
            }
            PropertyId::MaximumPacketSize => Property::MaximumPacketSize(cursor.read_u32()?),
            PropertyId::WildcardSubscriptionAvailable => {
                Property::WildcardSubscriptionAvailable(cursor.read_u8()?)
            }
            PropertyId::SubscriptionIdentifiersAvailable => {
                Property::SubscriptionIdentifiersAvailable(cursor.read_u8()?)
            }
            PropertyId::SharedSubscriptionAvailable => {
                Property::SharedSubscriptionAvailable(cursor.read_u8()?)
            }
        };

        Some(prop)
    }
}

/// All properties of one packet's property block.
///
/// Single-valued slots hold the last occurrence when a sender repeats an
/// identifier within one block; MQTT leaves that case unspecified and
/// last-write-wins is this crate's documented policy. User properties keep
/// every pair in arrival order, duplicate keys included.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct PropertyBlock<'i> {
    pub payload_format_indicator: Option<u8>,
    pub message_expiry_interval: Option<u32>,
    pub content_type: Option<&'i str>,
    pub response_topic: Option<&'i str>,
    pub correlation_data: Option<&'i [u8]>,
    pub subscription_identifier: Option<u32>,
    pub session_expiry_interval: Option<u32>,
    pub assigned_client_identifier: Option<&'i str>,
    pub server_keep_alive: Option<u16>,
    pub authentication_method: Option<&'i str>,
    pub authentication_data: Option<&'i [u8]>,
    pub request_problem_information: Option<u8>,
    pub will_delay_interval: Option<u32>,
    pub request_response_information: Option<u8>,
    pub response_information: Option<&'i str>,
    pub server_reference: Option<&'i str>,
    pub reason_string: Option<&'i str>,
    pub receive_maximum: Option<u16>,
    pub topic_alias_maximum: Option<u16>,
    pub topic_alias: Option<u16>,
    pub maximum_qos: Option<u8>,
    pub retain_available: Option<u8>,
    pub user_properties: Vec<(&'i str, &'i str)>,
    pub maximum_packet_size: Option<u32>,
    pub wildcard_subscription_available: Option<u8>,
    pub subscription_identifiers_available: Option<u8>,
    pub shared_subscription_available: Option<u8>,
}

impl<'i> PropertyBlock<'i> {
    /// Decodes one property block, best effort.
    ///
    /// The declared block length is read first but never trusted beyond the
    /// bytes actually present. Iteration stops at the declared end, at the
    /// first unrecognized identifier, or at the first truncated value;
    /// whatever was decoded up to that point is kept and no error is raised.
    /// On an early stop the cursor stays where decoding gave up, so the
    /// caller reads any trailing packet fields from that point.
    pub fn decode(cursor: &mut ByteCursor<'i>) -> PropertyBlock<'i> {
        let mut block = PropertyBlock::default();

        let Some(declared_len) = cursor.read_variable_u32() else {
            return block;
        };

        // An attacker controls declared_len; the buffer end is the real bound.
        let end = cursor
            .position()
            .saturating_add(declared_len as usize)
            .min(cursor.len());

        while cursor.position() < end {
            let Some(raw_id) = cursor.read_variable_u32() else {
                break;
            };
            let Some(id) = u8::try_from(raw_id)
                .ok()
                .and_then(|id| PropertyId::try_from(id).ok())
            else {
                break;
            };
            let Some(property) = Property::read(id, cursor) else {
                break;
            };

            block.insert(property);
        }

        block
    }

    fn insert(&mut self, property: Property<'i>) {
        match property {
            Property::PayloadFormatIndicator(v) => self.payload_format_indicator = Some(v),
            Property::MessageExpiryInterval(v) => self.message_expiry_interval = Some(v),
            Property::ContentType(v) => self.content_type = Some(v),
            Property::ResponseTopic(v) => self.response_topic = Some(v),
            Property::CorrelationData(v) => self.correlation_data = Some(v),
            Property::SubscriptionIdentifier(v) => self.subscription_identifier = Some(v),
            Property::SessionExpiryInterval(v) => self.session_expiry_interval = Some(v),
            Property::AssignedClientIdentifier(v) => self.assigned_client_identifier = Some(v),
            Property::ServerKeepAlive(v) => self.server_keep_alive = Some(v),
            Property::AuthenticationMethod(v) => self.authentication_method = Some(v),
            Property::AuthenticationData(v) => self.authentication_data = Some(v),
            Property::RequestProblemInformation(v) => self.request_problem_information = Some(v),
            Property::WillDelayInterval(v) => self.will_delay_interval = Some(v),
            Property::RequestResponseInformation(v) => {
                self.request_response_information = Some(v)
            }
            Property::ResponseInformation(v) => self.response_information = Some(v),
            Property::ServerReference(v) => self.server_reference = Some(v),
            Property::ReasonString(v) => self.reason_string = Some(v),
            Property::ReceiveMaximum(v) => self.receive_maximum = Some(v),
            Property::TopicAliasMaximum(v) => self.topic_alias_maximum = Some(v),
            Property::TopicAlias(v) => self.topic_alias = Some(v),
            Property::MaximumQoS(v) => self.maximum_qos = Some(v),
            Property::RetainAvailable(v) => self.retain_available = Some(v),
            Property::UserProperty(key, value) => self.user_properties.push((key, value)),
            Property::MaximumPacketSize(v) => self.maximum_packet_size = Some(v),
            Property::WildcardSubscriptionAvailable(v) => {
                self.wildcard_subscription_available = Some(v)
            }
            Property::SubscriptionIdentifiersAvailable(v) => {
                self.subscription_identifiers_available = Some(v)
            }
            Property::SharedSubscriptionAvailable(v) => {
                self.shared_subscription_available = Some(v)
            }
        }
    }
}
