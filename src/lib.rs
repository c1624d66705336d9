/*
 * Occupancy controller core for the DESPI-M02 board.
 *
 * Everything in this library is device independent: the tasks only see the
 * traits in `hal`, so the whole core runs under test on the host. The
 * firmware binary in `main.rs` wires the tasks to the board I/O in `io.rs`.
 */

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod debounce;
pub mod error;
pub mod feedback;
pub mod hal;
pub mod indicator;
pub mod input;
pub mod occupancy;
pub mod render;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use occupancy::{Admission, Cleared, Departure, OccupancyStore, Snapshot};
