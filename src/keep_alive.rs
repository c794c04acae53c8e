//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::num::NonZeroU16;
use std::time::Duration;

use crate::timer::ScheduledTimer;
use crate::timer::TimerScheduler;

/// The keepalive setting negotiated on CONNECT, driving the ping timer.
#[derive(Debug, Clone, Copy)]
pub enum KeepAlive {
    Disabled,
    Seconds(NonZeroU16),
}

impl KeepAlive {
    /// The value sent in the CONNECT packet, 0 meaning disabled.
    pub fn as_u16(&self) -> u16 {
        match self {
            KeepAlive::Disabled => 0,
            KeepAlive::Seconds(s) => s.get(),
        }
    }

    /// The period between keepalive pings, if any.
    pub fn ping_interval(&self) -> Option<Duration> {
        match self {
            KeepAlive::Disabled => None,
            KeepAlive::Seconds(s) => Some(Duration::from_secs(s.get().into())),
        }
    }

    /// Starts the repeating ping timer for this keepalive, already resumed.
    /// Returns `None` when keepalive is disabled.
    pub fn start_ping_timer(
        &self,
        scheduler: &dyn TimerScheduler,
        ping: impl Fn() + Send + Sync + 'static,
    ) -> Option<ScheduledTimer> {
        let interval = self.ping_interval()?;
        Some(ScheduledTimer::every(
            scheduler,
            interval,
            "keep-alive-ping",
            ping,
        ))
    }
}

impl TryFrom<Duration> for KeepAlive {
    type Error = KeepAliveError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        let secs = value.as_secs();
        if secs > u16::MAX.into() {
            return Err(KeepAliveError::OutOfBounds);
        }
        let secs = secs as u16;

        Ok(KeepAlive::Seconds(NonZeroU16::try_from(secs)?))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeepAliveError {
    #[error("KeepAlive cannot be of zero duration")]
    KeepAliveZero(#[from] std::num::TryFromIntError),

    #[error("KeepAlive out of bounds, maximum is {} seconds", u16::MAX)]
    OutOfBounds,
}
