//! Little-endian byte serialization for fixed-width values.

pub trait WriteBytesLe {
    fn write_le(&self, dst: &mut Vec<u8>);
}

macro_rules! impl_num_le {
    ($($t:ty),+) => { $(
        impl WriteBytesLe for $t { #[inline] fn write_le(&self, dst: &mut Vec<u8>) { dst.extend_from_slice(&self.to_le_bytes()); }}
    )+ }
}

impl_num_le!(u8, u16, u32);

impl<T: WriteBytesLe, const N: usize> WriteBytesLe for [T; N] {
    #[inline]
    fn write_le(&self, dst: &mut Vec<u8>) {
        self.iter().for_each(|item| item.write_le(dst));
    }
}

/// Serializes `value` into a fresh little-endian buffer.
pub fn to_le_vec<T: WriteBytesLe + ?Sized>(value: &T) -> Vec<u8> {
    let mut vec = Vec::new();
    value.write_le(&mut vec);
    vec
}
