/*
 * The display task. Every period it takes a snapshot under the guard, lays out
 * a frame and draws it while still holding the guard. If the guard is busy the
 * cycle is skipped and the previous frame stays on screen.
 */

use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Timer;
use heapless::{String, Vec};

use crate::config::{RENDER_GUARD_TIMEOUT, RENDER_PERIOD};
use crate::error::Result;
use crate::hal::TextDisplay;
use crate::occupancy::{OccupancyStore, Snapshot};

pub const TITLE: &str = "ACCESS CONTROL";
pub const RESET_NOTICE: &str = "RESET DONE!";

pub const LINE_WIDTH: usize = 32;
pub const MAX_LINES: usize = 4;

const TITLE_Y: i32 = 5;
const COUNT_Y: i32 = 20;
const STATUS_Y: i32 = 35;
const NOTICE_Y: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Empty,
    Open,
    Full,
}

impl Status {
    pub fn of(count: u32, capacity: u32) -> Self {
        if count == 0 {
            Status::Empty
        } else if count >= capacity {
            Status::Full
        } else {
            Status::Open
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Empty => "Empty",
            Status::Open => "Access open",
            Status::Full => "FULL!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String<LINE_WIDTH>,
    pub x: i32,
    pub y: i32,
}

impl TextLine {
    fn new(y: i32) -> Self {
        Self {
            text: String::new(),
            x: 0,
            y,
        }
    }

    fn with_text(text: &str, y: i32) -> Self {
        let mut line = Self::new(y);
        // Every fixed label is shorter than LINE_WIDTH.
        let _ = line.text.push_str(text);
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<TextLine, MAX_LINES>,
}

impl Frame {
    pub fn compose(snapshot: &Snapshot) -> Self {
        let mut lines = Vec::new();

        let mut count = TextLine::new(COUNT_Y);
        // "Users: " and two u32s fit in LINE_WIDTH.
        let _ = write!(count.text, "Users: {}/{}", snapshot.count, snapshot.capacity);

        let status = Status::of(snapshot.count, snapshot.capacity);

        // MAX_LINES leaves room for all four.
        let _ = lines.push(TextLine::with_text(TITLE, TITLE_Y));
        let _ = lines.push(count);
        let _ = lines.push(TextLine::with_text(status.label(), STATUS_Y));
        if snapshot.reset_notice {
            let _ = lines.push(TextLine::with_text(RESET_NOTICE, NOTICE_Y));
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn draw<D: TextDisplay>(&self, display: &mut D) {
        display.clear();
        for line in &self.lines {
            display.draw_text(&line.text, line.x, line.y);
        }
        display.flush();
    }
}

pub async fn render_once<M: RawMutex, D: TextDisplay>(
    store: &OccupancyStore<M>,
    display: &mut D,
) -> Result<()> {
    store
        .observe(RENDER_GUARD_TIMEOUT, |snapshot| {
            Frame::compose(&snapshot).draw(display)
        })
        .await
}

pub async fn run<M: RawMutex, D: TextDisplay>(store: &OccupancyStore<M>, mut display: D) -> ! {
    display.clear();
    display.flush();

    loop {
        if render_once(store, &mut display).await.is_err() {
            trace!("render skipped, guard busy");
        }
        Timer::after(RENDER_PERIOD).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DisplayCall, FAST, RecordingDisplay, TestStore};
    use embassy_futures::block_on;

    fn snapshot(count: u32, reset_notice: bool) -> Snapshot {
        Snapshot {
            count,
            capacity: 10,
            reset_notice,
        }
    }

    fn texts(frame: &Frame) -> std::vec::Vec<&str> {
        frame.lines().iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(Status::of(0, 10), Status::Empty);
        assert_eq!(Status::of(1, 10), Status::Open);
        assert_eq!(Status::of(9, 10), Status::Open);
        assert_eq!(Status::of(10, 10), Status::Full);
    }

    #[test]
    fn test_frame_layout() {
        let frame = Frame::compose(&snapshot(3, false));

        assert_eq!(texts(&frame), ["ACCESS CONTROL", "Users: 3/10", "Access open"]);
        let ys: std::vec::Vec<i32> = frame.lines().iter().map(|line| line.y).collect();
        assert_eq!(ys, [5, 20, 35]);
    }

    #[test]
    fn test_frame_with_reset_notice() {
        let frame = Frame::compose(&snapshot(0, true));

        assert_eq!(
            texts(&frame),
            ["ACCESS CONTROL", "Users: 0/10", "Empty", "RESET DONE!"]
        );
        assert_eq!(frame.lines()[3].y, 50);
    }

    #[test]
    fn test_full_frame() {
        let frame = Frame::compose(&snapshot(10, false));
        assert_eq!(texts(&frame)[2], "FULL!");
    }

    #[test]
    fn test_draw_clears_then_flushes() {
        let mut display = RecordingDisplay::default();

        Frame::compose(&snapshot(1, false)).draw(&mut display);

        assert_eq!(display.calls.first(), Some(&DisplayCall::Clear));
        assert_eq!(display.calls.last(), Some(&DisplayCall::Flush));
        assert_eq!(
            display.calls[1],
            DisplayCall::Text("ACCESS CONTROL".to_string(), 0, 5)
        );
    }

    #[test]
    fn test_reset_notice_shown_on_one_frame_only() {
        let store = TestStore::new(10, FAST);
        block_on(store.try_admit()).unwrap();
        block_on(store.reset_all()).unwrap();

        let mut first = RecordingDisplay::default();
        let mut second = RecordingDisplay::default();
        block_on(render_once(&store, &mut first)).unwrap();
        block_on(render_once(&store, &mut second)).unwrap();

        assert!(first.texts().contains(&RESET_NOTICE));
        assert!(!second.texts().contains(&RESET_NOTICE));
        assert!(second.texts().contains(&"Users: 0/10"));
    }

    #[test]
    fn test_busy_guard_skips_the_frame() {
        let store = TestStore::new(10, FAST);
        let mut display = RecordingDisplay::default();

        let guard = block_on(store.hold_guard());
        // Waits the full render bound before giving up.
        assert!(block_on(render_once(&store, &mut display)).is_err());
        drop(guard);

        assert!(display.calls.is_empty());
    }
}
