use std::fmt::Display;

use super::sample::DATA_LINES;

/// Stereo side a word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StereoChannel {
    Left,
    Right,
}

impl StereoChannel {
    /// The word completed by a WS flip belongs to the side WS was on before
    /// the flip: high selects left.
    pub fn from_word_select(ws_before_flip: bool) -> Self {
        if ws_before_flip {
            StereoChannel::Left
        } else {
            StereoChannel::Right
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StereoChannel::Left => "L",
            StereoChannel::Right => "R",
        }
    }

    pub fn index(self) -> usize {
        match self {
            StereoChannel::Left => 0,
            StereoChannel::Right => 1,
        }
    }
}

impl Display for StereoChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A word completed on all four data lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedWord {
    pub values: [u32; DATA_LINES],
    pub channel: StereoChannel,
    /// Bits actually clocked in (capped at the configured word length).
    pub bit_count: u32,
    /// Clock edges ignored after the word was already full.
    pub overrun_bits: u32,
    /// Sample index where the word began.
    pub start: u64,
    /// Sample index of the WS flip that ended it.
    pub end: u64,
}

impl CompletedWord {
    /// Clock edges seen in the word window, ignored ones included.
    pub fn observed_length(&self) -> u32 {
        self.bit_count + self.overrun_bits
    }
}
