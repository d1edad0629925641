//! PCM word alignment.
//!
//! Captured words are left-justified into a 16- or 32-bit container so that
//! every supported word length plays back at full scale.

use crate::structs::options::{PackWidth, WordLength};
use crate::utils::byteorder::WriteBytesLe;

/// One serialized PCM word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedWord {
    U16(u16),
    U32(u32),
}

impl PackedWord {
    /// Truncates to the 16 most significant bits, for preview output.
    pub fn to_u16(self) -> u16 {
        match self {
            PackedWord::U16(v) => v,
            PackedWord::U32(v) => (v >> 16) as u16,
        }
    }
}

impl WriteBytesLe for PackedWord {
    fn write_le(&self, dst: &mut Vec<u8>) {
        match self {
            PackedWord::U16(v) => v.write_le(dst),
            PackedWord::U32(v) => v.write_le(dst),
        }
    }
}

/// Aligns a captured word for its configured length.
///
/// Bits above the word length are discarded so that a short word can never
/// spill into the next container.
pub fn pack(value: u32, word_length: WordLength) -> PackedWord {
    let mask = u32::MAX >> (32 - word_length.bits());
    let aligned = (value & mask) << word_length.shift();
    match word_length.pack_width() {
        PackWidth::U16 => PackedWord::U16(aligned as u16),
        PackWidth::U32 => PackedWord::U32(aligned),
    }
}

/// Inverse of [`pack`].
pub fn unpack(word: PackedWord, word_length: WordLength) -> u32 {
    let raw = match word {
        PackedWord::U16(v) => u32::from(v),
        PackedWord::U32(v) => v,
    };
    raw >> word_length.shift()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::byteorder::to_le_vec;

    #[test]
    fn maximal_words_fill_the_high_bits() {
        for wl in WordLength::ALL {
            let max = u32::MAX >> (32 - wl.bits());
            let packed = pack(max, wl);

            let expected_high = match wl.pack_width() {
                PackWidth::U16 => PackedWord::U16(u16::MAX << wl.shift()),
                PackWidth::U32 => PackedWord::U32(u32::MAX << wl.shift()),
            };
            assert_eq!(packed, expected_high, "{wl}-bit");
            assert_eq!(unpack(packed, wl), max, "{wl}-bit");
        }
    }

    #[test]
    fn twelve_bit_word_is_left_justified() {
        assert_eq!(pack(0xABC, WordLength::W12), PackedWord::U16(0xABC0));
        assert_eq!(pack(0x1_2345, WordLength::W20), PackedWord::U32(0x1234_5000));
        assert_eq!(pack(0xAB_CDEF, WordLength::W24), PackedWord::U32(0xABCD_EF00));
    }

    #[test]
    fn serialized_little_endian() {
        assert_eq!(to_le_vec(&pack(0xABC, WordLength::W12)), [0xC0, 0xAB]);
        assert_eq!(
            to_le_vec(&pack(0xAB_CDEF, WordLength::W24)),
            [0x00, 0xEF, 0xCD, 0xAB]
        );
    }

    #[test]
    fn preview_truncation_keeps_top_bits() {
        assert_eq!(pack(0xAB_CDEF, WordLength::W24).to_u16(), 0xABCD);
        assert_eq!(pack(0xABCD, WordLength::W16).to_u16(), 0xABCD);
    }
}
