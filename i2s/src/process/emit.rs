use std::io::Write;

use anyhow::Result;
use log::{debug, warn};

use super::decode::DecoderState;
use super::dump::PcmDump;
use crate::structs::options::DecoderOptions;
use crate::structs::output::{
    Annotation, AnnotationClass, BinaryClass, DataRecord, EventSink, OutputEvent,
};
use crate::structs::wav::WavHeader;
use crate::structs::word::CompletedWord;
use crate::utils::byteorder::to_le_vec;
use crate::utils::pack::{PackedWord, pack};

impl DecoderState {
    /// Publishes a completed word.
    ///
    /// Length mismatches against the previous word are always reported. The
    /// length counts every clock edge of the window, even those past a full
    /// word. `DATA` records and channel annotations are only published when
    /// `show_log` is set.
    pub fn emit<S, W>(
        &mut self,
        options: &DecoderOptions,
        word: &CompletedWord,
        sink: &mut S,
        dump: Option<&mut PcmDump<W>>,
    ) -> Result<()>
    where
        S: EventSink + ?Sized,
        W: Write,
    {
        self.samples_received += 1;
        if self.first_sample_index.is_none() {
            self.first_sample_index = Some(word.start);
        }

        let (start, end) = (word.start, word.end);

        if options.wav_preview && !self.wrote_wav_header {
            sink.put(OutputEvent::Binary {
                start: 0,
                end: 0,
                class: BinaryClass::Wav,
                data: WavHeader::default().to_bytes(),
            });
            self.wrote_wav_header = true;
        }

        if options.show_log {
            let label = word.channel.label();
            let digits = options.word_length.hex_digits();
            let values = word
                .values
                .iter()
                .map(|v| format!("{v:0digits$x}"))
                .collect::<Vec<_>>()
                .join(" ");

            sink.put(OutputEvent::Data {
                start,
                end,
                record: DataRecord {
                    channel: word.channel,
                    values: word.values,
                },
            });
            sink.put(OutputEvent::Annotation {
                start,
                end,
                annotation: Annotation {
                    class: word.channel.into(),
                    texts: vec![format!("{label}: {values}"), label.to_string()],
                },
            });
        }

        let length = word.observed_length();
        if let Some(expected) = self.last_word_length.filter(|&len| len != length) {
            let text = format!("Received {length}-bit word, expected {expected}-bit word");
            warn!("{text} (samples {start}..{end})");
            sink.put(OutputEvent::Annotation {
                start,
                end,
                annotation: Annotation {
                    class: AnnotationClass::Warning,
                    texts: vec![text, "Word length mismatch".to_string(), "W".to_string()],
                },
            });
        }
        self.last_word_length = Some(length);

        if word.overrun_bits > 0 {
            debug!(
                "{} extra clock edge(s) ignored in {}-bit word at samples {start}..{end}",
                word.overrun_bits, word.bit_count
            );
        }

        let packed: [PackedWord; 4] = word.values.map(|v| pack(v, options.word_length));

        if options.wav_preview {
            sink.put(OutputEvent::Binary {
                start,
                end,
                class: BinaryClass::Wav,
                data: to_le_vec(&packed[options.wav_line.index()].to_u16()),
            });
        }

        if options.dump_file {
            if let Some(dump) = dump {
                dump.write_word(word.channel, &packed)?;
            }
        }

        Ok(())
    }
}
