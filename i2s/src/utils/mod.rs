//! Utility functions and supporting infrastructure.
//!
//! Provides byte-order serialization, PCM word alignment and the error
//! types shared by the decoding stages.

pub mod byteorder;
pub mod errors;
pub mod pack;
