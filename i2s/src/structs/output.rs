//! Records produced by the decoder.
//!
//! Every record carries the `[start, end]` sample range it describes.
//! Hosts receive them through an [`EventSink`].

use super::sample::DATA_LINES;
use super::word::StereoChannel;

/// Annotation rows, indexed the way hosts number them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationClass {
    Left = 0,
    Right = 1,
    Warning = 2,
}

impl AnnotationClass {
    pub fn id(self) -> &'static str {
        match self {
            AnnotationClass::Left => "left",
            AnnotationClass::Right => "right",
            AnnotationClass::Warning => "warnings",
        }
    }
}

impl From<StereoChannel> for AnnotationClass {
    fn from(channel: StereoChannel) -> Self {
        match channel {
            StereoChannel::Left => AnnotationClass::Left,
            StereoChannel::Right => AnnotationClass::Right,
        }
    }
}

/// Binary output classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryClass {
    Wav = 0,
}

/// Human-readable annotation; `texts` goes from longest to shortest form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub class: AnnotationClass,
    pub texts: Vec<String>,
}

/// The structured `DATA` packet: one word per data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRecord {
    pub channel: StereoChannel,
    pub values: [u32; DATA_LINES],
}

impl DataRecord {
    pub const PACKET_TYPE: &'static str = "DATA";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    Data {
        start: u64,
        end: u64,
        record: DataRecord,
    },
    Annotation {
        start: u64,
        end: u64,
        annotation: Annotation,
    },
    Binary {
        start: u64,
        end: u64,
        class: BinaryClass,
        data: Vec<u8>,
    },
}

/// Receiver for decoder output.
pub trait EventSink {
    fn put(&mut self, event: OutputEvent);
}

impl EventSink for Vec<OutputEvent> {
    fn put(&mut self, event: OutputEvent) {
        self.push(event);
    }
}
