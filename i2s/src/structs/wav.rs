//! Fixed RIFF/WAVE header for the preview stream.
//!
//! The header always describes 2-channel, 16 kHz, 16-bit PCM. Its RIFF and
//! data chunk sizes are fixed placeholders and do not track the amount of
//! preview data that follows.

use i2sdump_macros::ToBytes;

use crate::utils::byteorder::to_le_vec;

pub const WAV_HEADER_LEN: usize = 44;

const PLACEHOLDER_RIFF_SIZE: u32 = 0x8024;
const PLACEHOLDER_DATA_SIZE: u32 = 0xFFFF;

#[derive(Debug, Clone, ToBytes)]
pub struct WavHeader {
    riff: [u8; 4],
    riff_size: u32,
    wave: [u8; 4],
    fmt: [u8; 4],
    fmt_size: u32,
    audio_format: u16,
    channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
    data: [u8; 4],
    data_size: u32,
}

impl Default for WavHeader {
    fn default() -> Self {
        let channels = 2u16;
        let sample_rate = 16_000u32;
        let bits_per_sample = 16u16;
        let block_align = channels * bits_per_sample / 8;

        Self {
            riff: *b"RIFF",
            riff_size: PLACEHOLDER_RIFF_SIZE,
            wave: *b"WAVE",
            fmt: *b"fmt ",
            fmt_size: 16,
            audio_format: 1, // PCM
            channels,
            sample_rate,
            byte_rate: sample_rate * u32::from(block_align),
            block_align,
            bits_per_sample,
            data: *b"data",
            data_size: PLACEHOLDER_DATA_SIZE,
        }
    }
}

impl WavHeader {
    pub fn to_bytes(&self) -> Vec<u8> {
        to_le_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let bytes = WavHeader::default().to_bytes();
        assert_eq!(bytes.len(), WAV_HEADER_LEN);

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[4..8], &[0x24, 0x80, 0x00, 0x00]);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(&bytes[16..20], &[0x10, 0, 0, 0]);
        assert_eq!(&bytes[20..22], &[0x01, 0x00]);
        assert_eq!(&bytes[22..24], &[0x02, 0x00]);
        assert_eq!(&bytes[24..28], &[0x80, 0x3e, 0x00, 0x00]);
        assert_eq!(&bytes[28..32], &[0x00, 0xfa, 0x00, 0x00]);
        assert_eq!(&bytes[32..34], &[0x04, 0x00]);
        assert_eq!(&bytes[34..36], &[0x10, 0x00]);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(&bytes[40..44], &[0xff, 0xff, 0x00, 0x00]);
    }
}
