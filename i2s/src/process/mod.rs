//! Sample-by-sample I²S decoding.
//!
//! Each captured sample passes through three stages that all work on one
//! [`DecoderState`](decode::DecoderState):
//!
//! 1. **Edge tracking** ([`edge`]): only rising edges of the bit clock carry
//!    data.
//! 2. **Word assembly** ([`assemble`]): one bit per data line is shifted in on
//!    every rising edge; a WS flip completes the word.
//! 3. **Word emission** ([`emit`]): completed words become `DATA` records,
//!    annotations, preview blobs and PCM dump writes ([`dump`]).
//!
//! [`decode::Decoder`] ties the stages together.

pub mod assemble;
pub mod decode;
pub mod dump;
pub mod edge;
pub mod emit;
