use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Result, bail};
use log::{debug, info};

use super::dump::PcmDump;
use crate::structs::options::{DecoderOptions, SampleRatePolicy};
use crate::structs::output::EventSink;
use crate::structs::sample::{DATA_LINES, Sample};
use crate::utils::errors::DecodeError;

/// Decodes captured samples into I²S words.
///
/// Samples must be fed in order of their index. A word is only published
/// once both its opening and closing WS transitions have been seen, so a
/// capture that starts mid-word never yields a truncated first word.
///
/// # Example
///
/// ```rust
/// use i2s::process::decode::Decoder;
/// use i2s::structs::options::DecoderOptions;
/// use i2s::structs::output::OutputEvent;
/// use i2s::structs::sample::Sample;
///
/// let mut decoder = Decoder::<Vec<u8>>::new(DecoderOptions::default());
/// let mut events: Vec<OutputEvent> = Vec::new();
///
/// let idle = Sample::new(true, true, [false; 4]);
/// decoder.decode([(0, idle), (1, idle)], &mut events)?;
///
/// assert!(events.is_empty());
/// assert_eq!(decoder.report(), "I²S: 0 16-bit samples received at ?Hz");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Decoder<W: Write> {
    options: DecoderOptions,
    state: DecoderState,
    samplerate: Option<u64>,
    dump: Option<PcmDump<W>>,
}

impl Decoder<BufWriter<File>> {
    /// Creates a decoder, opening the PCM dump files in `dump_dir` only when
    /// `dump_file` is enabled.
    pub fn create<P: AsRef<Path>>(options: DecoderOptions, dump_dir: P) -> Result<Self> {
        let dump = if options.dump_file {
            Some(PcmDump::create(dump_dir)?)
        } else {
            None
        };
        Ok(Self::with_dump(options, dump))
    }
}

impl<W: Write> Decoder<W> {
    /// Creates a decoder without a PCM dump.
    pub fn new(options: DecoderOptions) -> Self {
        Self::with_dump(options, None)
    }

    /// Creates a decoder writing to an already opened dump.
    ///
    /// The dump is ignored unless `dump_file` is enabled.
    pub fn with_dump(options: DecoderOptions, dump: Option<PcmDump<W>>) -> Self {
        debug!(
            "I²S decoder: {}-bit words, dump_file={}, show_log={}, wav_preview={}",
            options.word_length, options.dump_file, options.show_log, options.wav_preview
        );
        Self {
            options,
            state: DecoderState::default(),
            samplerate: None,
            dump,
        }
    }

    /// Supplies the capture sample rate in Hz.
    pub fn set_samplerate(&mut self, samplerate: u64) {
        self.samplerate = Some(samplerate).filter(|&rate| rate > 0);
    }

    pub fn samplerate(&self) -> Option<u64> {
        self.samplerate
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// Processes one sample.
    ///
    /// Returns `true` when the sample completed a published word.
    pub fn decode_sample<S>(&mut self, index: u64, sample: Sample, sink: &mut S) -> Result<bool>
    where
        S: EventSink + ?Sized,
    {
        if self.options.samplerate_policy == SampleRatePolicy::Required
            && self.samplerate.is_none()
        {
            bail!(DecodeError::MissingSamplerate);
        }

        if let Some(previous) = self.state.last_sample_index {
            if index < previous {
                bail!(DecodeError::NonMonotonicSample {
                    previous,
                    current: index
                });
            }
        }
        self.state.last_sample_index = Some(index);

        if !self.state.rising_edge(sample.sck) {
            return Ok(false);
        }

        let word_length = self.options.word_length;
        let Some(word) = self.state.clock_in(word_length, index, sample.ws, sample.sd) else {
            return Ok(false);
        };

        self.state.emit(&self.options, &word, sink, self.dump.as_mut())?;
        Ok(true)
    }

    /// Processes a sequence of indexed samples.
    ///
    /// Returns the number of words published.
    pub fn decode<I, S>(&mut self, samples: I, sink: &mut S) -> Result<usize>
    where
        I: IntoIterator<Item = (u64, Sample)>,
        S: EventSink + ?Sized,
    {
        let mut words = 0;
        for (index, sample) in samples {
            if self.decode_sample(index, sample, sink)? {
                words += 1;
            }
        }
        Ok(words)
    }

    /// Summary line, e.g. `I²S: 480 16-bit samples received at 48000Hz`.
    pub fn report(&self) -> String {
        let rate = self
            .word_rate()
            .map_or_else(|| "?".to_string(), |rate| rate.to_string());

        format!(
            "I²S: {} {}-bit samples received at {}Hz",
            self.state.samples_received, self.options.word_length, rate
        )
    }

    /// Words per second, if the sample rate is known and at least one
    /// word-select period has elapsed.
    pub fn word_rate(&self) -> Option<u64> {
        let samplerate = self.samplerate?;
        let first = self.state.first_sample_index?;
        let last = self.state.block_start_sample?;
        if last <= first {
            return None;
        }

        let rate = u128::from(self.state.samples_received) * u128::from(samplerate)
            / u128::from(last - first);
        u64::try_from(rate).ok()
    }

    /// Flushes the PCM dump. Words still being assembled are dropped.
    pub fn finish(&mut self) -> Result<()> {
        if self.state.bit_count > 0 {
            debug!(
                "Discarding incomplete word ({} bits) at end of capture",
                self.state.bit_count
            );
        }
        if let Some(dump) = self.dump.as_mut() {
            dump.flush()?;
            info!("PCM dump: {} words per stream side written", dump.words_written());
        }
        info!("{}", self.report());
        Ok(())
    }

    /// Releases the dump writers.
    pub fn into_dump(self) -> Option<PcmDump<W>> {
        self.dump
    }
}

/// Mutable decoding state, exclusively owned by one [`Decoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderState {
    pub prev_clock: bool,
    pub prev_word_select: bool,

    /// Bits held for the current word, never above the word length.
    pub bit_count: u32,
    pub accumulators: [u32; DATA_LINES],
    /// Clock edges seen after the current word was already full.
    pub overrun_bits: u32,

    /// Sample index of the last WS transition; `None` until the first one.
    pub block_start_sample: Option<u64>,
    pub first_sample_index: Option<u64>,
    pub samples_received: u64,
    pub last_word_length: Option<u32>,

    pub wrote_wav_header: bool,
    pub last_sample_index: Option<u64>,
}

impl Default for DecoderState {
    fn default() -> Self {
        Self {
            prev_clock: true,
            prev_word_select: true,
            bit_count: 0,
            accumulators: [0; DATA_LINES],
            overrun_bits: 0,
            block_start_sample: None,
            first_sample_index: None,
            samples_received: 0,
            last_word_length: None,
            wrote_wav_header: false,
            last_sample_index: None,
        }
    }
}
