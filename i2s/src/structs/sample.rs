/// Number of serial data lines on the bus.
pub const DATA_LINES: usize = 4;

/// Logic channel names, in the order the decoder expects them.
pub const CHANNEL_NAMES: [&str; 2 + DATA_LINES] = ["sck", "ws", "sd0", "sd1", "sd2", "sd3"];

/// One captured logic sample of the six bus signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample {
    /// Bit clock.
    pub sck: bool,
    /// Word select.
    pub ws: bool,
    /// Serial data lines `sd0..sd3`.
    pub sd: [bool; DATA_LINES],
}

impl Sample {
    pub fn new(sck: bool, ws: bool, sd: [bool; DATA_LINES]) -> Self {
        Self { sck, ws, sd }
    }

    /// Builds a sample from a packed byte where bit `n` holds channel `n` of
    /// [`CHANNEL_NAMES`].
    pub fn from_bits(bits: u8) -> Self {
        let bit = |n: u8| (bits >> n) & 1 != 0;
        Self {
            sck: bit(0),
            ws: bit(1),
            sd: [bit(2), bit(3), bit(4), bit(5)],
        }
    }
}
