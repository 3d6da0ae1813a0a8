//! Circuit breaker guarding the upstream employee service.
//!
//! # States
//! - Closed: normal operation, requests pass through
//! - Open: upstream assumed down, requests fail fast
//! - Half-Open: a bounded number of trial requests probe recovery
//!
//! # State Transitions
//! ```text
//! Closed → Open: failure rate >= threshold over the sliding window
//!                (once at least `minimum_calls` outcomes are recorded)
//! Open → Half-Open: after `open_wait_secs`
//! Half-Open → Closed: trial failure rate below threshold
//! Half-Open → Open: trial failure rate at or above threshold
//! ```
//!
//! The window is count based: the last `sliding_window_size` outcomes.
//! The lock is only held for bookkeeping, never across the guarded call.

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::CircuitBreakerConfig;
use crate::observability::metrics;

/// Externally visible breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a guarded call.
#[derive(Debug, Error)]
pub enum BreakerError<E> {
    /// Call rejected without running the operation.
    #[error("circuit breaker is open")]
    Open,

    /// The operation ran and failed.
    #[error(transparent)]
    Inner(E),
}

#[derive(Debug)]
enum Phase {
    Closed,
    Open { until: Instant },
    HalfOpen { admitted: u32, completed: u32, failures: u32 },
}

#[derive(Debug)]
struct Inner {
    phase: Phase,
    /// Bumped on every transition; permits from an older epoch are not counted.
    epoch: u64,
    /// `true` marks a failure.
    window: VecDeque<bool>,
}

/// Count-based circuit breaker.
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    open_wait: Duration,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    /// Create a closed breaker.
    pub fn new(config: CircuitBreakerConfig) -> Self {
        let open_wait = Duration::from_secs(config.open_wait_secs);
        let window = VecDeque::with_capacity(config.sliding_window_size);
        metrics::record_circuit_state(CircuitState::Closed);
        Self {
            config,
            open_wait,
            inner: Mutex::new(Inner { phase: Phase::Closed, epoch: 0, window }),
        }
    }

    /// Current state, applying a pending Open → Half-Open transition.
    pub fn state(&self) -> CircuitState {
        let mut inner = self.lock();
        self.expire_open(&mut inner);
        match inner.phase {
            Phase::Closed => CircuitState::Closed,
            Phase::Open { .. } => CircuitState::Open,
            Phase::HalfOpen { .. } => CircuitState::HalfOpen,
        }
    }

    /// Whether the breaker is doing anything at all.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Run `op` under the breaker.
    ///
    /// `is_failure` decides which errors count against the upstream; errors
    /// it rejects are recorded as successful calls.
    pub async fn call<T, E, F, Fut>(
        &self,
        is_failure: impl Fn(&E) -> bool,
        op: F,
    ) -> Result<T, BreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.config.enabled {
            return op().await.map_err(BreakerError::Inner);
        }

        let permit = self.try_acquire().ok_or(BreakerError::Open)?;
        let result = op().await;
        let failed = matches!(&result, Err(e) if is_failure(e));
        permit.complete(failed);
        result.map_err(BreakerError::Inner)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expire_open(&self, inner: &mut Inner) {
        if let Phase::Open { until } = inner.phase {
            if Instant::now() >= until {
                tracing::info!("Circuit breaker half-open, admitting trial calls");
                inner.phase = Phase::HalfOpen { admitted: 0, completed: 0, failures: 0 };
                inner.epoch += 1;
                metrics::record_circuit_state(CircuitState::HalfOpen);
            }
        }
    }

    fn try_acquire(&self) -> Option<Permit<'_>> {
        let mut inner = self.lock();
        self.expire_open(&mut inner);
        match &mut inner.phase {
            Phase::Closed => {}
            Phase::Open { .. } => return None,
            Phase::HalfOpen { admitted, .. } => {
                if *admitted >= self.config.half_open_max_calls {
                    return None;
                }
                *admitted += 1;
            }
        }
        Some(Permit { breaker: self, epoch: inner.epoch, done: false })
    }

    fn record(&self, epoch: u64, failed: bool) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        if epoch != inner.epoch {
            tracing::debug!(failed, "Ignoring outcome admitted before the last transition");
            return;
        }
        let threshold = self.config.failure_rate_threshold;

        let next = match &mut inner.phase {
            Phase::Closed => {
                inner.window.push_back(failed);
                while inner.window.len() > self.config.sliding_window_size {
                    inner.window.pop_front();
                }
                let calls = inner.window.len();
                let failures = inner.window.iter().filter(|f| **f).count();
                let rate = failure_rate(failures, calls);
                if calls >= self.config.minimum_calls && rate >= threshold {
                    tracing::warn!(failure_rate = rate, calls, "Circuit breaker opened");
                    Some(CircuitState::Open)
                } else {
                    None
                }
            }
            Phase::HalfOpen { completed, failures, .. } => {
                *completed += 1;
                if failed {
                    *failures += 1;
                }
                if *completed < self.config.half_open_max_calls {
                    None
                } else if failure_rate(*failures as usize, *completed as usize) >= threshold {
                    tracing::warn!(failures = *failures, "Circuit breaker re-opened after trial calls");
                    Some(CircuitState::Open)
                } else {
                    tracing::info!(failures = *failures, "Circuit breaker closed");
                    Some(CircuitState::Closed)
                }
            }
            // unreachable: nothing is admitted while open
            Phase::Open { .. } => None,
        };

        match next {
            Some(CircuitState::Open) => self.open(inner),
            Some(CircuitState::Closed) => {
                inner.phase = Phase::Closed;
                inner.epoch += 1;
                inner.window.clear();
                metrics::record_circuit_state(CircuitState::Closed);
            }
            Some(CircuitState::HalfOpen) | None => {}
        }
    }

    fn open(&self, inner: &mut Inner) {
        inner.phase = Phase::Open { until: Instant::now() + self.open_wait };
        inner.epoch += 1;
        inner.window.clear();
        metrics::record_circuit_state(CircuitState::Open);
    }
}

fn failure_rate(failures: usize, calls: usize) -> f64 {
    if calls == 0 {
        return 0.0;
    }
    failures as f64 * 100.0 / calls as f64
}

/// Admission ticket for one call; a dropped, unfinished call counts as failed.
struct Permit<'a> {
    breaker: &'a CircuitBreaker,
    epoch: u64,
    done: bool,
}

impl Permit<'_> {
    fn complete(mut self, failed: bool) {
        self.done = true;
        self.breaker.record(self.epoch, failed);
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.breaker.record(self.epoch, true);
        }
    }
}
