//! Error types raised while configuring or running the decoder.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported word length: {0} (expected one of 12, 16, 20, 24, 32)")]
    UnsupportedWordLength(u32),

    #[error("Unknown decoder option: {0}")]
    UnknownOption(String),

    #[error("Invalid value {value:?} for option {option}")]
    InvalidValue { option: String, value: String },

    #[error("Data line index must be 0-3, got {0}")]
    InvalidDataLine(usize),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Cannot decode without samplerate")]
    MissingSamplerate,

    #[error("Sample index went backwards: {current} after {previous}")]
    NonMonotonicSample { previous: u64, current: u64 },
}
