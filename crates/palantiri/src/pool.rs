//! Palantiri pool implementation: a fair admission gate plus per-entry
//! atomic availability flags.
//!
//! Two pieces cooperate without any lock spanning an operation:
//!
//! - The **admission gate** is a fair `tokio::sync::Semaphore` sized to the
//!   pool capacity. It bounds the number of concurrent holders and grants
//!   permits to waiters in FIFO order.
//! - The **availability table** is a fixed array of `(Palantir, AtomicBool)`
//!   entries. A permit holder claims an entry with a `true -> false`
//!   compare-and-set; release flips it back with `false -> true`.
//!
//! Ordering is load-bearing on release: the flag becomes visible as
//! available *before* the permit is added, so a waiter admitted by that
//! permit always finds at least one claimable entry.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::Semaphore;

use crate::error::PoolError;
use crate::palantir::Palantir;

#[derive(Debug)]
struct PoolEntry {
    palantir: Palantir,
    available: AtomicBool,
}

/// A fair, bounded pool of exclusive-use palantiri.
///
/// The set of palantiri is fixed at construction and never resized. Holders
/// must return what they took via [`release`](Self::release); a holder that
/// never releases leaks a permit permanently, which is a caller bug the
/// pool does not detect.
#[derive(Debug)]
pub struct PalantiriPool {
    gate: Semaphore,
    entries: Vec<PoolEntry>,
}

impl PalantiriPool {
    /// Create a pool managing the given palantiri, all initially available.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfiguration`] if `palantiri` is empty
    /// or contains duplicate identities. Malformed input is rejected, not
    /// sanitized, so construction is deterministic.
    pub fn new(palantiri: Vec<Palantir>) -> Result<Self, PoolError> {
        if palantiri.is_empty() {
            return Err(PoolError::InvalidConfiguration {
                reason: "at least one palantir is required".to_string(),
            });
        }

        let mut seen = std::collections::HashSet::with_capacity(palantiri.len());
        for palantir in &palantiri {
            if !seen.insert(palantir.id()) {
                return Err(PoolError::InvalidConfiguration {
                    reason: format!("duplicate palantir {}", palantir.id()),
                });
            }
        }

        let gate = Semaphore::new(palantiri.len());
        let entries = palantiri
            .into_iter()
            .map(|palantir| PoolEntry {
                palantir,
                available: AtomicBool::new(true),
            })
            .collect();

        Ok(Self { gate, entries })
    }

    /// Take a palantir, suspending until one is available.
    ///
    /// Permits are granted to waiters in the order they arrived; which
    /// specific palantir a woken waiter ends up with is not ordered.
    /// There is no timeout variant. Dropping the returned future before it
    /// completes gives any permit it obtained back to the gate.
    pub async fn acquire(&self) -> Palantir {
        let permit = match self.gate.acquire().await {
            Ok(permit) => permit,
            // The gate is owned by the pool and never closed.
            Err(_) => unreachable!("admission gate closed"),
        };

        // A permit guarantees at least one available entry: releases
        // publish the flag before the permit, and flags are cleared only by
        // permit holders. A pass can still lose every claim race to other
        // holders mid-scan, so rescan after yielding.
        loop {
            for entry in &self.entries {
                if entry
                    .available
                    .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
                {
                    permit.forget();
                    return entry.palantir;
                }
            }
            tokio::task::yield_now().await;
        }
    }

    /// Take a palantir without suspending, or `None` if the pool is
    /// exhausted.
    pub fn try_acquire(&self) -> Option<Palantir> {
        let permit = self.gate.try_acquire().ok()?;

        loop {
            for entry in &self.entries {
                if entry
                    .available
                    .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
                {
                    permit.forget();
                    return Some(entry.palantir);
                }
            }
            // Another holder is between its gate decrement and its claim;
            // the window is a few instructions wide.
            std::hint::spin_loop();
        }
    }

    /// Return a palantir to the pool, waking one waiter if any.
    ///
    /// A palantir the pool does not manage is ignored. Releasing a
    /// palantir that is already available is a no-op: the `false -> true`
    /// transition fails, no permit is added, and the gate can never exceed
    /// capacity no matter how many times a caller double-releases.
    pub fn release(&self, palantir: &Palantir) {
        let Some(entry) = self
            .entries
            .iter()
            .find(|entry| entry.palantir == *palantir)
        else {
            tracing::warn!(palantir = %palantir.id(), "Ignoring release of unknown palantir");
            return;
        };

        // Flag first, permit second: a waiter admitted by this permit must
        // be able to find the entry.
        if entry
            .available
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.gate.add_permits(1);
        } else {
            tracing::debug!(palantir = %palantir.id(), "Ignoring release of available palantir");
        }
    }

    /// Current count of available permits on the admission gate.
    ///
    /// Diagnostic accessor for tests and observability; the functional
    /// contract does not depend on it.
    pub fn available_permits(&self) -> usize {
        self.gate.available_permits()
    }

    /// Total number of palantiri managed by the pool.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// The palantiri managed by the pool, in construction order.
    pub fn palantiri(&self) -> impl Iterator<Item = &Palantir> {
        self.entries.iter().map(|entry| &entry.palantir)
    }

    /// Point-in-time observability snapshot.
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            capacity: self.capacity(),
            available: self.available_permits(),
        }
    }
}

/// Serializable pool state for diagnostics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PoolSnapshot {
    pub capacity: usize,
    pub available: usize,
}
