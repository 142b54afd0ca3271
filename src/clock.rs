// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The shared "current time" driving every day line.
//!
//! A [`Clock`] publishes one displayed instant to its subscribers. In live
//! mode it follows its [`TimeSource`] on every [`TickingClock::tick`]; while
//! an override is set (drag-scrubbing) ticks are ignored and the override is
//! shown instead. Setting or clearing the override publishes immediately.
//!
//! The clock owns no thread: the host calls [`TickingClock::tick`] every
//! [`TICK_INTERVAL`] from whatever timer it already runs.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::Utc;

use crate::instant::Instant;

/// How often a live clock is expected to tick.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Wall-clock source of a live clock.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> Instant {
        Instant::from_utc(Utc::now())
    }
}

impl<F: Fn() -> Instant> TimeSource for F {
    fn now(&self) -> Instant {
        self()
    }
}

/// Subscriber callback, invoked with each published instant.
pub type Callback = Arc<dyn Fn(Instant) + Send + Sync>;

/// A publisher of the displayed instant.
pub trait Clock {
    /// The displayed instant: the override if set, else the last live tick.
    fn now(&self) -> Instant;

    /// Register `callback`; it stays registered until the returned
    /// [`Subscription`] is dropped.
    fn subscribe(&self, callback: Callback) -> Subscription;

    /// Freeze the displayed instant at `instant` and publish it.
    fn set_override(&self, instant: Instant);

    /// Resume live mode and publish the live instant.
    fn clear_override(&self);

    fn is_overridden(&self) -> bool;
}

struct State {
    displayed: Instant,
    overridden: bool,
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    // A panicking subscriber never runs under the lock; the data stays valid.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle keeping a [`Clock`] callback registered.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    state: Weak<Mutex<State>>,
}

impl Subscription {
    /// Unsubscribe now; same as dropping.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            lock(&state).subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// [`Clock`] driven by explicit ticks of a [`TimeSource`].
pub struct TickingClock<S = SystemTime> {
    source: S,
    state: Arc<Mutex<State>>,
}

impl Default for TickingClock<SystemTime> {
    fn default() -> Self {
        Self::new(SystemTime)
    }
}

impl<S: TimeSource> TickingClock<S> {
    /// Live clock starting at `source.now()`.
    pub fn new(source: S) -> Self {
        let displayed = source.now();
        Self {
            source,
            state: Arc::new(Mutex::new(State {
                displayed,
                overridden: false,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Sample the source and publish, unless an override is active.
    ///
    /// Returns the displayed instant after the tick.
    pub fn tick(&self) -> Instant {
        let live = self.source.now();
        let callbacks = {
            let mut state = lock(&self.state);
            if state.overridden {
                return state.displayed;
            }
            state.displayed = live;
            subscribers(&state)
        };
        publish(&callbacks, live);
        live
    }

    /// Number of registered callbacks.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.state).subscribers.len()
    }

    fn set_displayed(&self, instant: Instant, overridden: bool) {
        let callbacks = {
            let mut state = lock(&self.state);
            state.displayed = instant;
            state.overridden = overridden;
            subscribers(&state)
        };
        publish(&callbacks, instant);
    }
}

fn subscribers(state: &State) -> Vec<Callback> {
    state.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
}

fn publish(callbacks: &[Callback], instant: Instant) {
    for callback in callbacks {
        callback(instant);
    }
}

impl<S: TimeSource> Clock for TickingClock<S> {
    fn now(&self) -> Instant {
        lock(&self.state).displayed
    }

    fn subscribe(&self, callback: Callback) -> Subscription {
        let mut state = lock(&self.state);
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.push((id, callback));
        Subscription {
            id,
            state: Arc::downgrade(&self.state),
        }
    }

    fn set_override(&self, instant: Instant) {
        log::trace!("clock override set to {instant}");
        self.set_displayed(instant, true);
    }

    fn clear_override(&self) {
        log::trace!("clock override cleared");
        self.set_displayed(self.source.now(), false);
    }

    fn is_overridden(&self) -> bool {
        lock(&self.state).overridden
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for TickingClock<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("TickingClock")
            .field("source", &self.source)
            .field("displayed", &state.displayed)
            .field("overridden", &state.overridden)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Seconds;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Source advanced by hand, in whole seconds.
    #[derive(Clone, Default)]
    struct ManualSource(Arc<AtomicU64>);

    impl ManualSource {
        fn advance(&self, seconds: u64) {
            self.0.fetch_add(seconds, Ordering::SeqCst);
        }
    }

    impl TimeSource for ManualSource {
        fn now(&self) -> Instant {
            Instant::from_unix_seconds(self.0.load(Ordering::SeqCst) as f64)
        }
    }

    fn recorder() -> (Callback, Arc<Mutex<Vec<f64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: Callback = Arc::new(move |t: Instant| sink.lock().unwrap().push(t.unix_seconds()));
        (callback, seen)
    }

    #[test]
    fn ticks_follow_source() {
        let source = ManualSource::default();
        let clock = TickingClock::new(source.clone());
        let (callback, seen) = recorder();
        let _sub = clock.subscribe(callback);

        source.advance(1);
        clock.tick();
        source.advance(1);
        clock.tick();
        assert_eq!(*seen.lock().unwrap(), vec![1.0, 2.0]);
        assert_eq!(clock.now().unix_seconds(), 2.0);
    }

    #[test]
    fn override_freezes_and_release_resumes() {
        let source = ManualSource::default();
        let clock = TickingClock::new(source.clone());
        let (callback, seen) = recorder();
        let _sub = clock.subscribe(callback);

        let scrubbed = Instant::UNIX_EPOCH + Seconds::new(500.0);
        clock.set_override(scrubbed);
        assert!(clock.is_overridden());
        assert_eq!(clock.now(), scrubbed);

        source.advance(10);
        assert_eq!(clock.tick(), scrubbed);
        assert_eq!(clock.now(), scrubbed);

        clock.clear_override();
        assert!(!clock.is_overridden());
        assert_eq!(clock.now().unix_seconds(), 10.0);
        assert_eq!(*seen.lock().unwrap(), vec![500.0, 10.0]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let source = ManualSource::default();
        let clock = TickingClock::new(source.clone());
        let (callback, seen) = recorder();
        let sub = clock.subscribe(callback);
        assert_eq!(clock.subscriber_count(), 1);

        sub.cancel();
        assert_eq!(clock.subscriber_count(), 0);
        clock.tick();
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn subscription_outliving_clock_is_harmless() {
        let clock = TickingClock::new(ManualSource::default());
        let (callback, _) = recorder();
        let sub = clock.subscribe(callback);
        drop(clock);
        drop(sub);
    }

    #[test]
    fn closures_are_time_sources() {
        let clock = TickingClock::new(|| Instant::from_unix_seconds(42.0));
        assert_eq!(clock.tick().unix_seconds(), 42.0);
    }

    #[test]
    fn system_clock_is_recent() {
        let clock = TickingClock::default();
        // After 2020-01-01.
        assert!(clock.now().unix_seconds() > 1_577_836_800.0);
    }
}
