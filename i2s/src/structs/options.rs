//! Decoder configuration.
//!
//! Options can be built directly or set by name from string values, the way
//! a logic-analyzer host passes decoder options (`word_length=24`,
//! `dump_file=yes`, ...).

use std::fmt::Display;

use crate::structs::sample::DATA_LINES;
use crate::utils::errors::ConfigError;

/// Bits per word per stereo channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordLength {
    W12,
    #[default]
    W16,
    W20,
    W24,
    W32,
}

/// Width of one serialized PCM word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackWidth {
    U16,
    U32,
}

impl PackWidth {
    pub fn bits(self) -> u32 {
        match self {
            PackWidth::U16 => 16,
            PackWidth::U32 => 32,
        }
    }
}

impl WordLength {
    pub const ALL: [WordLength; 5] = [
        WordLength::W12,
        WordLength::W16,
        WordLength::W20,
        WordLength::W24,
        WordLength::W32,
    ];

    pub fn bits(self) -> u32 {
        match self {
            WordLength::W12 => 12,
            WordLength::W16 => 16,
            WordLength::W20 => 20,
            WordLength::W24 => 24,
            WordLength::W32 => 32,
        }
    }

    /// Output word width used when dumping this length to PCM.
    pub fn pack_width(self) -> PackWidth {
        if self.bits() <= 16 {
            PackWidth::U16
        } else {
            PackWidth::U32
        }
    }

    /// Left shift that moves the captured bits to the top of the pack width.
    pub fn shift(self) -> u32 {
        self.pack_width().bits() - self.bits()
    }

    /// Hex digits needed to print one word of this length.
    pub fn hex_digits(self) -> usize {
        if self.bits() <= 16 { 4 } else { 8 }
    }
}

impl TryFrom<u32> for WordLength {
    type Error = ConfigError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        WordLength::ALL
            .into_iter()
            .find(|wl| wl.bits() == bits)
            .ok_or(ConfigError::UnsupportedWordLength(bits))
    }
}

impl Display for WordLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Index of one serial data line, always below [`DATA_LINES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataLine(usize);

impl DataLine {
    pub fn index(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for DataLine {
    type Error = ConfigError;

    fn try_from(line: usize) -> Result<Self, Self::Error> {
        if line < DATA_LINES {
            Ok(DataLine(line))
        } else {
            Err(ConfigError::InvalidDataLine(line))
        }
    }
}

/// What to do when decoding starts without a known sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleRatePolicy {
    /// Decode anyway; the rate in the report becomes `?`.
    #[default]
    Tolerant,
    /// Refuse to decode until a sample rate has been supplied.
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderOptions {
    pub word_length: WordLength,
    pub dump_file: bool,
    pub show_log: bool,
    pub wav_preview: bool,
    pub wav_line: DataLine,
    pub samplerate_policy: SampleRatePolicy,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            word_length: WordLength::W16,
            dump_file: false,
            show_log: true,
            wav_preview: false,
            wav_line: DataLine::default(),
            samplerate_policy: SampleRatePolicy::Tolerant,
        }
    }
}

impl DecoderOptions {
    /// Sets one option from its textual name and value.
    ///
    /// Unknown names and out-of-range values are rejected here so that a bad
    /// configuration never reaches the sample stream.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            option: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "word_length" => {
                let bits = value.trim().parse::<u32>().map_err(|_| invalid())?;
                self.word_length = WordLength::try_from(bits)?;
            }
            "dump_file" => self.dump_file = parse_yes_no(value).ok_or_else(invalid)?,
            "show_log" => self.show_log = parse_yes_no(value).ok_or_else(invalid)?,
            "wav_preview" => self.wav_preview = parse_yes_no(value).ok_or_else(invalid)?,
            "wav_line" => {
                let line = value.trim().parse::<usize>().map_err(|_| invalid())?;
                self.wav_line = DataLine::try_from(line)?;
            }
            "samplerate_policy" => {
                self.samplerate_policy = match value.trim() {
                    "tolerant" => SampleRatePolicy::Tolerant,
                    "required" => SampleRatePolicy::Required,
                    _ => return Err(invalid()),
                }
            }
            _ => return Err(ConfigError::UnknownOption(key.to_string())),
        }
        Ok(())
    }

    /// Parses a `key=value` pair and applies it with [`DecoderOptions::set`].
    pub fn set_pair(&mut self, pair: &str) -> Result<(), ConfigError> {
        match pair.split_once('=') {
            Some((key, value)) => self.set(key.trim(), value),
            None => Err(ConfigError::InvalidValue {
                option: pair.to_string(),
                value: String::new(),
            }),
        }
    }
}

fn parse_yes_no(value: &str) -> Option<bool> {
    match value.trim() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}
