/*
 * The admission gate: one token per free place. Entry takes a token before it
 * touches the counter; exit and reset hand tokens back from inside the guard.
 *
 * The semaphore does the waiting. Next to it the gate keeps its own count of
 * free tokens, so reading it never disturbs the semaphore. The count goes up
 * before a token is handed back and down only after one was taken, so it is
 * never below what the semaphore holds and never wraps.
 */

use core::mem;
use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    semaphore::{GreedySemaphore, Semaphore},
};
use embassy_time::{Duration, with_timeout};

/// A token taken from the gate. Dropping it gives the token back; `disarm` it
/// to keep the place.
#[must_use]
pub struct Permit<'a, M: RawMutex> {
    gate: &'a AdmissionGate<M>,
}

impl<M: RawMutex> Permit<'_, M> {
    pub fn disarm(self) {
        mem::forget(self);
    }
}

impl<M: RawMutex> Drop for Permit<'_, M> {
    fn drop(&mut self) {
        self.gate.release(1);
    }
}

// Only the entry task ever waits for a token, so there is no queue of waiters
// to be fair to.
pub struct AdmissionGate<M: RawMutex> {
    tokens: GreedySemaphore<M>,
    free: AtomicU32,
}

impl<M: RawMutex> AdmissionGate<M> {
    pub const fn new(capacity: u32) -> Self {
        Self {
            tokens: GreedySemaphore::new(capacity as usize),
            free: AtomicU32::new(capacity),
        }
    }

    pub async fn acquire(&self, timeout: Duration) -> Option<Permit<'_, M>> {
        let taken = match self.tokens.try_acquire(1) {
            Some(taken) => taken,
            None => match with_timeout(timeout, self.tokens.acquire(1)).await {
                Ok(Ok(taken)) => taken,
                Ok(Err(_)) | Err(_) => return None,
            },
        };

        // From here on the permit owns the token.
        let _ = taken.disarm();
        self.free.fetch_sub(1, Ordering::AcqRel);
        Some(Permit { gate: self })
    }

    pub fn release(&self, tokens: u32) {
        self.free.fetch_add(tokens, Ordering::AcqRel);
        self.tokens.release(tokens as usize);
    }

    pub fn available(&self) -> u32 {
        self.free.load(Ordering::Acquire)
    }
}
