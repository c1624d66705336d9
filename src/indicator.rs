/*
 * The RGB status light. Coarser than the display: blue when empty, green while
 * there is comfortable room, yellow for the last place and red when full.
 */

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Timer;
use enum_ordinalize::Ordinalize;

use crate::config::{INDICATOR_GUARD_TIMEOUT, INDICATOR_PERIOD};
use crate::hal::RgbIndicator;
use crate::occupancy::OccupancyStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Ordinalize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum StatusColor {
    Blue,
    Green,
    Yellow,
    Red,
}

// (red, green, blue) per color, indexed by ordinal.
const RGB: [(bool, bool, bool); StatusColor::VARIANT_COUNT] = [
    (false, false, true),
    (false, true, false),
    (true, true, false),
    (true, false, false),
];

impl StatusColor {
    pub fn for_occupancy(count: u32, capacity: u32) -> Self {
        if count == 0 {
            StatusColor::Blue
        } else if count <= capacity.saturating_sub(2) {
            StatusColor::Green
        } else if count <= capacity.saturating_sub(1) {
            StatusColor::Yellow
        } else {
            StatusColor::Red
        }
    }

    pub fn rgb(self) -> (bool, bool, bool) {
        RGB[self.ordinal()]
    }
}

/*
 * A busy guard reads as an empty room. Showing blue for one period is better
 * than showing a color for a count that may no longer be true.
 */
pub async fn indicate_once<M: RawMutex, I: RgbIndicator>(
    store: &OccupancyStore<M>,
    indicator: &mut I,
) -> StatusColor {
    let count = store.count(INDICATOR_GUARD_TIMEOUT).await.unwrap_or(0);
    let color = StatusColor::for_occupancy(count, store.capacity());

    let (red, green, blue) = color.rgb();
    indicator.set_color(red, green, blue);
    color
}

pub async fn run<M: RawMutex, I: RgbIndicator>(store: &OccupancyStore<M>, mut indicator: I) -> ! {
    loop {
        indicate_once(store, &mut indicator).await;
        Timer::after(INDICATOR_PERIOD).await;
    }
}
