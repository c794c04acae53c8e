//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Recurring and one-shot timers for keepalive pings and reconnect backoff.
//!
//! The underlying timer primitive has a strict sequencing contract: resuming
//! or suspending it twice in a row, or cancelling it while suspended, is
//! fatal. [`ScheduledTimer`] wraps it in a three-state machine so those
//! sequences can never be issued, no matter how callers interleave
//! `resume`/`suspend`/`cancel` or when the timer is dropped.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;
use std::time::Duration;

use tokio::sync::watch;

/// The wrapper-level lifecycle state of a [`ScheduledTimer`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TimerState {
    Suspended,
    Resumed,
    Canceled,
}

/// Handle to one underlying timer primitive.
///
/// Implementations are allowed (and the production one does) to treat a
/// violated sequencing contract as fatal, exactly like the OS timer
/// primitives this models: `resume` is only valid while suspended,
/// `suspend` only while resumed, `cancel` only while resumed. All calls must
/// return promptly.
pub trait TimerSource: Send + Sync {
    fn resume(&self);
    fn suspend(&self);
    fn cancel(&self);
}

/// Creates timer sources on some execution context.
///
/// Injected rather than global so tests can drive timers without wall-clock
/// waits. The `tick` callback fires on the scheduler's context, never on the
/// thread that constructed the timer.
pub trait TimerScheduler {
    /// Creates a new source, initially suspended. `interval` of `None` makes
    /// a one-shot source that fires once, `delay` after its first resume.
    fn create_source(
        &self,
        name: &str,
        delay: Duration,
        interval: Option<Duration>,
        tick: Box<dyn Fn() + Send + Sync>,
    ) -> Box<dyn TimerSource>;
}

type EventHandler = Arc<dyn Fn() + Send + Sync>;

struct Gate {
    state: TimerState,
    handler: Option<EventHandler>,
}

struct Inner {
    name: String,
    one_shot: bool,
    // The single lock serializing all state transitions. The handler lives
    // under the same lock but is only cloned there, then invoked outside it,
    // so a handler may itself call suspend/cancel without deadlocking.
    gate: Mutex<Gate>,
    source: OnceLock<Box<dyn TimerSource>>,
}

impl Inner {
    fn lock_gate(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn source(&self) -> &dyn TimerSource {
        self.source
            .get()
            .expect("source is installed before the timer is handed out")
            .as_ref()
    }

    fn resume(&self) {
        let mut gate = self.lock_gate();
        if gate.state != TimerState::Suspended {
            return;
        }
        gate.state = TimerState::Resumed;
        tracing::debug!(name = %self.name, "resuming timer");
        self.source().resume();
    }

    fn suspend(&self) {
        let mut gate = self.lock_gate();
        if gate.state != TimerState::Resumed {
            return;
        }
        gate.state = TimerState::Suspended;
        tracing::debug!(name = %self.name, "suspending timer");
        self.source().suspend();
    }

    fn cancel(&self) {
        let mut gate = self.lock_gate();
        if gate.state == TimerState::Canceled {
            return;
        }
        // The underlying primitive cannot cancel a suspended timer
        if gate.state == TimerState::Suspended {
            self.source().resume();
        }
        gate.state = TimerState::Canceled;
        tracing::debug!(name = %self.name, "cancelling timer");
        self.source().cancel();
    }

    fn fire(&self) {
        let handler = {
            let gate = self.lock_gate();
            if gate.state == TimerState::Canceled {
                return;
            }
            gate.handler.clone()
        };

        if let Some(handler) = handler {
            handler();
        }

        // A one-shot timer parks itself after its single run so that later
        // cancellation or drop finds it in a well-defined state.
        if self.one_shot {
            self.suspend();
        }
    }
}

/// A pausable, cancelable timer bound to one [`TimerSource`].
///
/// Freshly constructed timers are suspended; nothing fires until
/// [`resume`](ScheduledTimer::resume). `resume` and `suspend` outside their
/// expected state are no-ops, `cancel` is terminal and idempotent, and
/// dropping the timer cancels it from whatever state it is in. The event
/// handler is never invoked after cancellation.
pub struct ScheduledTimer {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ScheduledTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTimer")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl ScheduledTimer {
    /// Creates a suspended timer.
    ///
    /// An `interval` of zero makes a one-shot timer that fires once, `delay`
    /// after the first resume. Otherwise the timer repeats every `interval`,
    /// first firing after `delay` (or one full `interval` when `delay` is
    /// `None`). `name` is diagnostic only.
    pub fn new(
        scheduler: &dyn TimerScheduler,
        name: impl Into<String>,
        delay: Option<Duration>,
        interval: Duration,
    ) -> ScheduledTimer {
        let name = name.into();
        let one_shot = interval.is_zero();
        let start_delay = delay.unwrap_or(interval);

        let inner = Arc::new(Inner {
            name: name.clone(),
            one_shot,
            gate: Mutex::new(Gate {
                state: TimerState::Suspended,
                handler: None,
            }),
            source: OnceLock::new(),
        });

        let tick = {
            let inner = Arc::downgrade(&inner);
            Box::new(move || {
                if let Some(inner) = inner.upgrade() {
                    inner.fire();
                }
            })
        };

        let source =
            scheduler.create_source(&name, start_delay, (!one_shot).then_some(interval), tick);
        if inner.source.set(source).is_err() {
            unreachable!("the source cell is written exactly once");
        }

        ScheduledTimer { inner }
    }

    /// Creates a repeating timer that is already resumed.
    pub fn every(
        scheduler: &dyn TimerScheduler,
        interval: Duration,
        name: impl Into<String>,
        block: impl Fn() + Send + Sync + 'static,
    ) -> ScheduledTimer {
        let timer = ScheduledTimer::new(scheduler, name, None, interval);
        timer.set_event_handler(block);
        timer.resume();
        timer
    }

    /// Creates a one-shot timer that runs `block` once, `delay` from now,
    /// then suspends itself so it can be dropped or canceled safely.
    pub fn after(
        scheduler: &dyn TimerScheduler,
        delay: Duration,
        name: impl Into<String>,
        block: impl Fn() + Send + Sync + 'static,
    ) -> ScheduledTimer {
        let timer = ScheduledTimer::new(scheduler, name, Some(delay), Duration::ZERO);
        timer.set_event_handler(block);
        timer.resume();
        timer
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn state(&self) -> TimerState {
        self.inner.lock_gate().state
    }

    /// Installs the callback invoked on every fire. Replaces any previous
    /// handler; takes effect for the next fire.
    pub fn set_event_handler(&self, handler: impl Fn() + Send + Sync + 'static) {
        self.inner.lock_gate().handler = Some(Arc::new(handler));
    }

    pub fn clear_event_handler(&self) {
        self.inner.lock_gate().handler = None;
    }

    /// Starts dispatch. No-op unless currently suspended.
    pub fn resume(&self) {
        self.inner.resume();
    }

    /// Pauses dispatch. No-op unless currently resumed.
    pub fn suspend(&self) {
        self.inner.suspend();
    }

    /// Stops the timer for good. Idempotent; safe from any state.
    pub fn cancel(&self) {
        self.inner.cancel();
    }
}

impl Drop for ScheduledTimer {
    fn drop(&mut self) {
        let mut gate = self.inner.lock_gate();

        // Drop the handler before touching the source so user code cannot
        // run during teardown.
        gate.handler = None;

        match gate.state {
            TimerState::Canceled => return,
            TimerState::Suspended => self.inner.source().resume(),
            TimerState::Resumed => {}
        }

        gate.state = TimerState::Canceled;
        tracing::debug!(name = %self.inner.name, "cancelling timer on drop");
        self.inner.source().cancel();
    }
}

/// Production scheduler: one tokio task per timer source.
///
/// Holds a runtime handle explicitly instead of relying on an ambient
/// runtime, so its lifecycle is visible to the owner.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum SourcePhase {
    Suspended,
    Resumed,
    Canceled,
}

impl TokioScheduler {
    pub fn new(handle: tokio::runtime::Handle) -> TokioScheduler {
        TokioScheduler { handle }
    }

    /// Binds to the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> TokioScheduler {
        TokioScheduler {
            handle: tokio::runtime::Handle::current(),
        }
    }
}

impl TimerScheduler for TokioScheduler {
    fn create_source(
        &self,
        name: &str,
        delay: Duration,
        interval: Option<Duration>,
        tick: Box<dyn Fn() + Send + Sync>,
    ) -> Box<dyn TimerSource> {
        let (phase_tx, phase_rx) = watch::channel(SourcePhase::Suspended);

        self.handle
            .spawn(run_source(phase_rx, delay, interval, tick));

        Box::new(TokioTimerSource {
            name: name.to_owned(),
            phase: phase_tx,
        })
    }
}

/// The tokio-backed timer source.
///
/// Enforces the same sequencing contract an OS timer handle has: unbalanced
/// resume/suspend or a cancel while suspended aborts instead of silently
/// corrupting the schedule. [`ScheduledTimer`] guarantees these are
/// unreachable.
struct TokioTimerSource {
    name: String,
    phase: watch::Sender<SourcePhase>,
}

impl TimerSource for TokioTimerSource {
    fn resume(&self) {
        self.phase.send_modify(|phase| {
            assert_eq!(
                *phase,
                SourcePhase::Suspended,
                "timer source {:?}: resume while not suspended",
                self.name
            );
            *phase = SourcePhase::Resumed;
        });
    }

    fn suspend(&self) {
        self.phase.send_modify(|phase| {
            assert_eq!(
                *phase,
                SourcePhase::Resumed,
                "timer source {:?}: suspend while not resumed",
                self.name
            );
            *phase = SourcePhase::Suspended;
        });
    }

    fn cancel(&self) {
        self.phase.send_modify(|phase| {
            assert_eq!(
                *phase,
                SourcePhase::Resumed,
                "timer source {:?}: cancel while suspended",
                self.name
            );
            *phase = SourcePhase::Canceled;
        });
    }
}

async fn run_source(
    mut phase: watch::Receiver<SourcePhase>,
    delay: Duration,
    interval: Option<Duration>,
    tick: Box<dyn Fn() + Send + Sync>,
) {
    let mut next_fire = delay;

    'armed: loop {
        // Park here while suspended. A closed channel means the owning
        // source handle is gone, nothing can fire anymore.
        loop {
            let current = *phase.borrow_and_update();
            match current {
                SourcePhase::Resumed => break,
                SourcePhase::Canceled => return,
                SourcePhase::Suspended => {
                    if phase.changed().await.is_err() {
                        return;
                    }
                }
            }
        }

        // Suspension discards elapsed time; the full period re-arms on the
        // next resume.
        let deadline = tokio::time::Instant::now() + next_fire;

        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => {
                    tick();

                    match interval {
                        Some(every) => {
                            next_fire = every;
                            continue 'armed;
                        }
                        None => {
                            // One-shot: hold until cancellation or drop.
                            loop {
                                if *phase.borrow_and_update() == SourcePhase::Canceled {
                                    return;
                                }
                                if phase.changed().await.is_err() {
                                    return;
                                }
                            }
                        }
                    }
                }
                changed = phase.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    match *phase.borrow_and_update() {
                        SourcePhase::Canceled => return,
                        SourcePhase::Suspended => continue 'armed,
                        SourcePhase::Resumed => {}
                    }
                }
            }
        }
    }
}
