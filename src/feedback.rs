/*
 * Audible feedback. A melody is a short list of notes and rests; the input
 * tasks play one after they have released the guard, so a 1.5 second alarm
 * never keeps the display from refreshing.
 */

use embassy_time::{Duration, Timer};

use crate::hal::Buzzer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pitch(u16);

impl Pitch {
    pub const C4: Pitch = Pitch(262);
    pub const G4: Pitch = Pitch(392);

    pub const fn hz(self) -> u16 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    Tone(Pitch, Duration),
    Rest(Duration),
}

pub type Melody = &'static [Note];

/// Admission refused: the room is full.
pub const CAPACITY_ALARM: Melody = &[Note::Tone(Pitch::C4, Duration::from_millis(1500))];

/// Everybody was cleared out.
pub const RESET_CHIME: Melody = &[
    Note::Tone(Pitch::G4, Duration::from_millis(333)),
    Note::Rest(Duration::from_millis(333)),
    Note::Tone(Pitch::G4, Duration::from_millis(333)),
];

pub async fn play<B: Buzzer>(buzzer: &mut B, melody: Melody) {
    for note in melody {
        match *note {
            Note::Tone(pitch, duration) => buzzer.play_tone(pitch, duration).await,
            Note::Rest(duration) => Timer::after(duration).await,
        }
    }
}
