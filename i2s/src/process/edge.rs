use super::decode::DecoderState;

impl DecoderState {
    /// Returns `true` when `clock` is a rising edge of the bit clock.
    ///
    /// Repeated levels leave the state untouched. Falling edges only update
    /// the stored clock level.
    pub fn rising_edge(&mut self, clock: bool) -> bool {
        if clock == self.prev_clock {
            return false;
        }

        self.prev_clock = clock;
        clock
    }
}
