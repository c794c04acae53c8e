//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Client-side core for MQTT: the wire codec re-exported from
//! [`mqtt_wire`], plus the scheduled timer that drives keepalive pings and
//! reconnect backoff for a connection manager built on top.

#![deny(missing_debug_implementations)]

pub mod keep_alive;
pub mod packet;
pub mod timer;

pub use mqtt_wire as wire;
