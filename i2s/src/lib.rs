//! Decoder for 4-line I²S (Integrated Interchip Sound) logic captures.
//!
//! ## Technical Overview
//!
//! An I²S bus carries a bit clock (`sck`), a word-select line (`ws`) and here
//! four serial data lines (`sd0..sd3`) sharing that clock. Data is sampled on
//! the rising clock edge, most significant bit first. A change of `ws`
//! marks the last bit of a word: high selects the left channel, low the
//! right one.
//!
//! ### Word lengths
//!
//! 12, 16, 20, 24 and 32-bit words are supported. Words are dumped as 16-bit
//! (12/16) or 32-bit (20/24/32) little-endian PCM, left-justified so that
//! all lengths play back at full scale.
//!
//! ## Quick Start
//!
//! 1. Configure a [`process::decode::Decoder`] with
//!    [`structs::options::DecoderOptions`]
//! 2. Feed it indexed [`structs::sample::Sample`]s
//! 3. Collect [`structs::output::OutputEvent`]s from any
//!    [`structs::output::EventSink`]
//!
//! ```rust,no_run
//! use i2s::process::decode::Decoder;
//! use i2s::structs::options::DecoderOptions;
//! use i2s::structs::output::OutputEvent;
//! use i2s::structs::sample::Sample;
//!
//! let mut options = DecoderOptions::default();
//! options.set("word_length", "24")?;
//! options.set("dump_file", "yes")?;
//!
//! let mut decoder = Decoder::create(options, "out")?;
//! decoder.set_samplerate(12_000_000);
//!
//! let capture: Vec<u8> = std::fs::read("capture.bin")?;
//! let samples = capture
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &bits)| (i as u64, Sample::from_bits(bits)));
//!
//! let mut events: Vec<OutputEvent> = Vec::new();
//! decoder.decode(samples, &mut events)?;
//! decoder.finish()?;
//!
//! println!("{}", decoder.report());
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Sample-by-sample decoding.
///
/// - **Edge tracking** ([`process::edge`]): bit clock rising edges
/// - **Word assembly** ([`process::assemble`]): bit shifting and WS detection
/// - **Word emission** ([`process::emit`]): records, annotations, PCM
/// - **PCM dump** ([`process::dump`]): per-line raw output streams
/// - **Decoder** ([`process::decode`]): state ownership and reporting
pub mod process;

/// Data types exchanged with the host.
///
/// - **Samples** ([`structs::sample`]): captured logic levels
/// - **Options** ([`structs::options`]): decoder configuration
/// - **Words** ([`structs::word`]): completed stereo words
/// - **Output** ([`structs::output`]): records, annotations and binary blobs
/// - **WAV header** ([`structs::wav`]): preview stream header
pub mod structs;

/// Supporting infrastructure.
///
/// - **Byte order** ([`utils::byteorder`]): little/big-endian serialization
/// - **Packing** ([`utils::pack`]): PCM word alignment
/// - **Errors** ([`utils::errors`]): configuration and decode errors
pub mod utils;
