use log::{debug, trace};

use super::decode::DecoderState;
use crate::structs::options::WordLength;
use crate::structs::sample::DATA_LINES;
use crate::structs::word::{CompletedWord, StereoChannel};

impl DecoderState {
    /// Clocks one bit per data line into the current word.
    ///
    /// Called on every rising edge of the bit clock. The bit clocked in on a
    /// WS flip is the last bit of the word, so the flip both finishes the
    /// word and opens the next one. The very first flip only opens a block.
    ///
    /// Edges beyond `word_length` within one word window contribute zero:
    /// the held word and its bit count stay as they are.
    pub fn clock_in(
        &mut self,
        word_length: WordLength,
        sample_index: u64,
        ws: bool,
        data: [bool; DATA_LINES],
    ) -> Option<CompletedWord> {
        if self.bit_count >= word_length.bits() {
            self.overrun_bits += 1;
        } else {
            for (acc, bit) in self.accumulators.iter_mut().zip(data) {
                *acc = (*acc << 1) | u32::from(bit);
            }
            self.bit_count += 1;
        }

        trace!(
            "edge at {sample_index}: bit {} ws={} data={:?}",
            self.bit_count, ws, data
        );

        if ws == self.prev_word_select {
            return None;
        }

        let completed = self.block_start_sample.map(|start| CompletedWord {
            values: self.accumulators,
            channel: StereoChannel::from_word_select(self.prev_word_select),
            bit_count: self.bit_count,
            overrun_bits: self.overrun_bits,
            start,
            end: sample_index,
        });

        if completed.is_none() {
            debug!("First WS transition at sample {sample_index}, opening block");
        }

        self.accumulators = [0; DATA_LINES];
        self.bit_count = 0;
        self.overrun_bits = 0;
        self.block_start_sample = Some(sample_index);
        self.prev_word_select = ws;

        completed
    }
}
