/*
 * The shared occupancy state: the counter, the admission gate and the reset
 * notice, behind one guard.
 *
 * Every task gets a shared reference to the same `OccupancyStore` and can only
 * go through the operations below. Counter changes and token releases happen
 * in the same critical section, so once an operation has returned the free
 * tokens and the count always add up to the capacity.
 */

pub mod gate;
pub mod reset_signal;

use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    mutex::{Mutex, MutexGuard},
};
use embassy_time::{Duration, with_timeout};

use crate::config::Timeouts;
use crate::error::{Error, Result};
use gate::AdmissionGate;
use reset_signal::ResetSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Admission {
    Admitted { count: u32 },
    CapacityReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Departure {
    Departed { count: u32 },
    /// Nobody was inside; nothing changed.
    AlreadyEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cleared {
    pub removed: u32,
}

/// What the renderer sees in one guarded observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub count: u32,
    pub capacity: u32,
    /// A reset happened since the previous observation.
    pub reset_notice: bool,
}

pub struct OccupancyStore<M: RawMutex> {
    capacity: u32,
    timeouts: Timeouts,
    gate: AdmissionGate<M>,
    count: Mutex<M, u32>,
    reset: ResetSignal,
}

impl<M: RawMutex> OccupancyStore<M> {
    pub const fn new(capacity: u32, timeouts: Timeouts) -> Self {
        Self {
            capacity,
            timeouts,
            gate: AdmissionGate::new(capacity),
            count: Mutex::new(0),
            reset: ResetSignal::new(),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    async fn lock(&self, timeout: Duration) -> Result<MutexGuard<'_, M, u32>> {
        with_timeout(timeout, self.count.lock())
            .await
            .map_err(|_| Error::GuardUnavailable)
    }

    /*
     * Token first, then the guard. The permit is only disarmed once the count
     * has actually gone up; every other way out of this function drops it,
     * which puts the token back.
     */
    pub async fn try_admit(&self) -> Result<Admission> {
        let Some(permit) = self.gate.acquire(self.timeouts.token).await else {
            return Ok(Admission::CapacityReached);
        };

        let mut count = self.lock(self.timeouts.guard).await?;
        if *count >= self.capacity {
            warn!("holding a token with {} of {} inside", *count, self.capacity);
            return Ok(Admission::CapacityReached);
        }

        permit.disarm();
        *count += 1;
        Ok(Admission::Admitted { count: *count })
    }

    pub async fn release_one(&self) -> Result<Departure> {
        let mut count = self.lock(self.timeouts.guard).await?;
        if *count == 0 {
            return Ok(Departure::AlreadyEmpty);
        }

        *count -= 1;
        self.gate.release(1);
        Ok(Departure::Departed { count: *count })
    }

    pub async fn reset_all(&self) -> Result<Cleared> {
        let mut count = self.lock(self.timeouts.guard).await?;
        let removed = *count;
        while *count > 0 {
            self.gate.release(1);
            *count -= 1;
        }

        self.reset.raise();
        Ok(Cleared { removed })
    }

    /// Run `f` on a snapshot while still holding the guard, so whatever `f`
    /// draws is consistent with the count. Taking the snapshot consumes a
    /// pending reset notice.
    pub async fn observe<R>(&self, timeout: Duration, f: impl FnOnce(Snapshot) -> R) -> Result<R> {
        let count = self.lock(timeout).await?;
        let snapshot = Snapshot {
            count: *count,
            capacity: self.capacity,
            reset_notice: self.reset.take(),
        };

        Ok(f(snapshot))
    }

    pub async fn count(&self, timeout: Duration) -> Result<u32> {
        Ok(*self.lock(timeout).await?)
    }

    pub fn available_tokens(&self) -> u32 {
        self.gate.available()
    }

    /// Take the guard with no bound, as a stuck task would.
    #[cfg(test)]
    pub(crate) async fn hold_guard(&self) -> MutexGuard<'_, M, u32> {
        self.count.lock().await
    }
}
