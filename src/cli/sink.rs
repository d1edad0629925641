use std::io::Write;

use anyhow::Result;
use i2s::structs::output::{AnnotationClass, EventSink, OutputEvent};
use log::debug;

use crate::records::{RecordEntry, RecordWriter};

/// Per-class event counts gathered while decoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventCounts {
    pub records: u64,
    pub left: u64,
    pub right: u64,
    pub warnings: u64,
    pub wav_bytes: u64,
}

/// Routes decoder output to stdout, the records file and the WAV preview.
///
/// Write failures cannot be returned from [`EventSink::put`]; the first one
/// is kept and surfaced by [`CliSink::check`].
pub struct CliSink<R: Write, V: Write, O: Write> {
    out: Option<O>,
    records: Option<RecordWriter<R>>,
    wav: Option<V>,
    counts: EventCounts,
    error: Option<anyhow::Error>,
}

impl<R: Write, V: Write, O: Write> CliSink<R, V, O> {
    pub fn new(out: Option<O>, records: Option<RecordWriter<R>>, wav: Option<V>) -> Self {
        Self {
            out,
            records,
            wav,
            counts: EventCounts::default(),
            error: None,
        }
    }

    pub fn check(&mut self) -> Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Flushes every output and reports any pending write failure.
    pub fn finish(mut self) -> Result<EventCounts> {
        self.check()?;
        if let Some(records) = self.records.take() {
            let written = records.written();
            records.finish()?;
            debug!("Flushed {written} DATA records");
        }
        if let Some(wav) = self.wav.as_mut() {
            wav.flush()?;
        }
        if let Some(out) = self.out.as_mut() {
            out.flush()?;
        }
        Ok(self.counts)
    }

    fn handle(&mut self, event: OutputEvent) -> Result<()> {
        match event {
            OutputEvent::Data { start, end, record } => {
                self.counts.records += 1;
                if let Some(records) = self.records.as_mut() {
                    records.write(&RecordEntry::new(start, end, &record))?;
                }
            }
            OutputEvent::Annotation {
                start,
                end,
                annotation,
            } => {
                match annotation.class {
                    AnnotationClass::Left => self.counts.left += 1,
                    AnnotationClass::Right => self.counts.right += 1,
                    AnnotationClass::Warning => self.counts.warnings += 1,
                }
                if let (Some(out), Some(text)) = (self.out.as_mut(), annotation.texts.first()) {
                    writeln!(out, "{start}-{end} i2s-1: {}: \"{text}\"", annotation.class.id())?;
                }
            }
            OutputEvent::Binary { data, .. } => {
                self.counts.wav_bytes += data.len() as u64;
                if let Some(wav) = self.wav.as_mut() {
                    wav.write_all(&data)?;
                }
            }
        }
        Ok(())
    }
}

impl<R: Write, V: Write, O: Write> EventSink for CliSink<R, V, O> {
    fn put(&mut self, event: OutputEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.handle(event) {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use i2s::structs::output::{Annotation, BinaryClass, DataRecord};
    use i2s::structs::word::StereoChannel;

    type MemorySink = CliSink<Vec<u8>, Vec<u8>, Vec<u8>>;

    fn left_annotation(start: u64, end: u64) -> OutputEvent {
        OutputEvent::Annotation {
            start,
            end,
            annotation: Annotation {
                class: AnnotationClass::Left,
                texts: vec!["L: aaaa 0000 0000 0000".to_string(), "L".to_string()],
            },
        }
    }

    #[test]
    fn annotations_printed_and_counted() -> Result<()> {
        let mut sink = MemorySink::new(Some(Vec::new()), None, None);
        sink.put(left_annotation(1, 33));
        sink.put(OutputEvent::Annotation {
            start: 33,
            end: 65,
            annotation: Annotation {
                class: AnnotationClass::Warning,
                texts: vec!["Received 12-bit word, expected 16-bit word".to_string()],
            },
        });
        sink.check()?;

        let out = String::from_utf8(sink.out.clone().unwrap_or_default())?;
        assert_eq!(
            out,
            "1-33 i2s-1: left: \"L: aaaa 0000 0000 0000\"\n\
             33-65 i2s-1: warnings: \"Received 12-bit word, expected 16-bit word\"\n"
        );

        let counts = sink.finish()?;
        assert_eq!(counts.left, 1);
        assert_eq!(counts.right, 0);
        assert_eq!(counts.warnings, 1);
        Ok(())
    }

    #[test]
    fn records_and_preview_routed() -> Result<()> {
        let mut sink = MemorySink::new(None, Some(RecordWriter::new(Vec::new())), Some(Vec::new()));
        sink.put(OutputEvent::Data {
            start: 1,
            end: 33,
            record: DataRecord {
                channel: StereoChannel::Right,
                values: [1, 2, 3, 4],
            },
        });
        sink.put(OutputEvent::Binary {
            start: 1,
            end: 33,
            class: BinaryClass::Wav,
            data: vec![0x34, 0x12],
        });

        assert_eq!(sink.wav.as_deref(), Some(&[0x34, 0x12][..]));
        let counts = sink.finish()?;
        assert_eq!(counts.records, 1);
        assert_eq!(counts.wav_bytes, 2);
        Ok(())
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_surfaces_on_check() {
        let mut sink: CliSink<Vec<u8>, Vec<u8>, FailingWriter> =
            CliSink::new(Some(FailingWriter), None, None);
        sink.put(left_annotation(1, 33));
        sink.put(left_annotation(33, 65));

        assert!(sink.check().is_err());
        assert!(sink.check().is_ok());
        assert_eq!(sink.counts.left, 1);
    }
}
