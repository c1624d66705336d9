pub type Result<T> = core::result::Result<T, Error>;

/// Failures of the occupancy core.
///
/// Running out of admission tokens and leaving an empty room are ordinary
/// outcomes, see `Admission` and `Departure`. The only thing that can go wrong
/// is a bounded wait on the guard expiring, and the caller recovers from that
/// by trying again on its next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The guard was held by another task for longer than the caller waits.
    GuardUnavailable,
}
