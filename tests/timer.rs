//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Behavior of [`ScheduledTimer`] on the tokio-backed scheduler, run
//! against a paused clock so nothing here waits for wall time.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use skymqtt::timer::ScheduledTimer;
use skymqtt::timer::TimerState;
use skymqtt::timer::TokioScheduler;

fn counting_handler() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let fired = Arc::new(AtomicUsize::new(0));
    let handler = {
        let fired = Arc::clone(&fired);
        move || {
            fired.fetch_add(1, Ordering::SeqCst);
        }
    };
    (fired, handler)
}

/// Lets the spawned timer tasks observe the advanced clock.
async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn repeating_timer_fires_every_interval() {
    let scheduler = TokioScheduler::current();
    let (fired, handler) = counting_handler();

    let timer = ScheduledTimer::every(&scheduler, Duration::from_secs(1), "ping", handler);
    settle().await;

    tokio::time::advance(Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 2);

    timer.cancel();
}

#[tokio::test(start_paused = true)]
async fn suspended_timer_does_not_fire() {
    let scheduler = TokioScheduler::current();
    let (fired, handler) = counting_handler();

    let timer = ScheduledTimer::every(&scheduler, Duration::from_secs(1), "paused", handler);
    settle().await;

    timer.suspend();
    tokio::time::advance(Duration::from_secs(10)).await;
    settle().await;

    assert_eq!(fired.load(Ordering::SeqCst), 0);

    // Resuming re-arms a full period
    timer.resume();
    settle().await;
    tokio::time::advance(Duration::from_secs(1)).await;
    settle().await;

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    timer.cancel();
}

#[tokio::test(start_paused = true)]
async fn one_shot_fires_once_then_suspends_itself() {
    let scheduler = TokioScheduler::current();
    let (fired, handler) = counting_handler();

    let timer = ScheduledTimer::after(&scheduler, Duration::from_millis(500), "once", handler);
    settle().await;

    tokio::time::advance(Duration::from_millis(500)).await;
    settle().await;

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(timer.state(), TimerState::Suspended);

    tokio::time::advance(Duration::from_secs(60)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn canceled_timer_never_fires_again() {
    let scheduler = TokioScheduler::current();
    let (fired, handler) = counting_handler();

    let timer = ScheduledTimer::every(&scheduler, Duration::from_secs(1), "canceled", handler);
    settle().await;

    tokio::time::advance(Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    timer.cancel();
    assert_eq!(timer.state(), TimerState::Canceled);

    tokio::time::advance(Duration::from_secs(30)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn suspend_only_timers_can_be_dropped_safely() {
    let scheduler = TokioScheduler::current();

    // Never resumed, only suspended and dropped. The teardown path has to
    // resume the underlying source before cancelling it; the production
    // source aborts the process if it does not.
    for i in 0..50 {
        let timer = ScheduledTimer::new(
            &scheduler,
            format!("drop-{i}"),
            None,
            Duration::from_secs(1),
        );
        timer.suspend();
        drop(timer);
    }

    settle().await;
}

#[tokio::test(start_paused = true)]
async fn dropped_timer_stops_firing() {
    let scheduler = TokioScheduler::current();
    let (fired, handler) = counting_handler();

    let timer = ScheduledTimer::every(&scheduler, Duration::from_secs(1), "dropped", handler);
    settle().await;
    drop(timer);

    tokio::time::advance(Duration::from_secs(30)).await;
    settle().await;

    assert_eq!(fired.load(Ordering::SeqCst), 0);
}
