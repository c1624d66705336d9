/*
 * The three button tasks. Each one polls its own trigger, debounces it, runs
 * one store operation and plays the matching feedback once the guard has been
 * released again. They differ only in the `Action` they perform.
 */

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Instant, Timer};

use crate::config::{DEBOUNCE_WINDOW, POLL_INTERVAL};
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::feedback::{self, CAPACITY_ALARM, Melody, RESET_CHIME};
use crate::hal::{Buzzer, Trigger};
use crate::occupancy::{Admission, Cleared, Departure, OccupancyStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    Admit,
    Depart,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Admission(Admission),
    Departure(Departure),
    Reset(Cleared),
}

impl Outcome {
    pub fn feedback(&self) -> Option<Melody> {
        match self {
            Outcome::Admission(Admission::CapacityReached) => Some(CAPACITY_ALARM),
            Outcome::Reset(_) => Some(RESET_CHIME),
            Outcome::Admission(Admission::Admitted { .. }) | Outcome::Departure(_) => None,
        }
    }
}

pub struct InputTask<T: Trigger, B: Buzzer> {
    action: Action,
    trigger: T,
    buzzer: B,
    debouncer: Debouncer,
}

impl<T: Trigger, B: Buzzer> InputTask<T, B> {
    pub fn new(action: Action, trigger: T, buzzer: B) -> Self {
        Self {
            action,
            trigger,
            buzzer,
            debouncer: Debouncer::new(DEBOUNCE_WINDOW),
        }
    }

    async fn perform<M: RawMutex>(&self, store: &OccupancyStore<M>) -> Result<Outcome> {
        match self.action {
            Action::Admit => store.try_admit().await.map(Outcome::Admission),
            Action::Depart => store.release_one().await.map(Outcome::Departure),
            Action::Reset => store.reset_all().await.map(Outcome::Reset),
        }
    }

    /// One poll of the trigger at `now`. Returns what happened if the press
    /// was accepted, `None` if there was nothing to do or the guard was busy.
    pub async fn poll<M: RawMutex>(
        &mut self,
        store: &OccupancyStore<M>,
        now: Instant,
    ) -> Option<Outcome> {
        if !self.debouncer.is_ready(self.trigger.is_asserted(), now) {
            return None;
        }

        let outcome = match self.perform(store).await {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!("{}: skipped, {}", self.action, error);
                return None;
            }
        };
        self.debouncer.accept(now);

        match outcome {
            Outcome::Admission(Admission::Admitted { count }) => info!("admitted, {} inside", count),
            Outcome::Admission(Admission::CapacityReached) => info!("admission refused, full"),
            Outcome::Departure(Departure::Departed { count }) => info!("departed, {} inside", count),
            Outcome::Departure(Departure::AlreadyEmpty) => trace!("departure ignored, empty"),
            Outcome::Reset(Cleared { removed }) => info!("reset, {} cleared", removed),
        }

        if let Some(melody) = outcome.feedback() {
            feedback::play(&mut self.buzzer, melody).await;
        }

        Some(outcome)
    }

    pub async fn run<M: RawMutex>(mut self, store: &OccupancyStore<M>) -> ! {
        loop {
            self.poll(store, Instant::now()).await;
            Timer::after(POLL_INTERVAL).await;
        }
    }
}
