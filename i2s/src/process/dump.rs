//! Raw PCM dump streams, one per data line and stereo side.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::structs::sample::DATA_LINES;
use crate::structs::word::StereoChannel;
use crate::utils::byteorder::WriteBytesLe;
use crate::utils::pack::PackedWord;

/// File name of the dump for `line` and `channel`, e.g. `ch2L.pcm`.
pub fn dump_file_name(line: usize, channel: StereoChannel) -> String {
    format!("ch{line}{}.pcm", channel.label())
}

/// Eight append-only PCM streams (`ch0L` .. `ch3R`).
///
/// Each stream is a flat sequence of little-endian words without a header.
/// Every word write is flushed so a stream is complete up to the last
/// emitted word even if the process stops early. After a failed write the
/// streams may hold different word counts, so every later write is refused.
pub struct PcmDump<W: Write> {
    streams: [[W; 2]; DATA_LINES],
    words_written: u64,
    scratch: Vec<u8>,
    failed: bool,
}

impl PcmDump<BufWriter<File>> {
    /// Creates (truncating) the eight dump files inside `dir`.
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let open = |line: usize, channel: StereoChannel| -> Result<BufWriter<File>> {
            let path = dir.join(dump_file_name(line, channel));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create PCM dump {}", path.display()))?;
            Ok(BufWriter::new(file))
        };

        let mut streams = Vec::with_capacity(DATA_LINES);
        for line in 0..DATA_LINES {
            streams.push([
                open(line, StereoChannel::Left)?,
                open(line, StereoChannel::Right)?,
            ]);
        }

        info!("Writing PCM dumps to {}", dir.display());
        let streams: [[BufWriter<File>; 2]; DATA_LINES] = streams
            .try_into()
            .map_err(|_| anyhow::anyhow!("PCM dump stream count mismatch"))?;
        Ok(Self::from_writers(streams))
    }
}

impl<W: Write> PcmDump<W> {
    /// Wraps already opened writers, indexed `[line][StereoChannel::index()]`.
    pub fn from_writers(streams: [[W; 2]; DATA_LINES]) -> Self {
        Self {
            streams,
            words_written: 0,
            scratch: Vec::with_capacity(4 * DATA_LINES),
            failed: false,
        }
    }

    /// Appends one packed word per data line to the `channel` streams.
    pub fn write_word(
        &mut self,
        channel: StereoChannel,
        words: &[PackedWord; DATA_LINES],
    ) -> io::Result<()> {
        if self.failed {
            return Err(io::Error::other(
                "PCM dump streams out of sync after an earlier write error",
            ));
        }

        self.scratch.clear();
        let mut ends = [0usize; DATA_LINES];
        for (end, word) in ends.iter_mut().zip(words) {
            word.write_le(&mut self.scratch);
            *end = self.scratch.len();
        }

        let mut begin = 0;
        for (line, end) in self.streams.iter_mut().zip(ends) {
            let stream = &mut line[channel.index()];
            let written = stream
                .write_all(&self.scratch[begin..end])
                .and_then(|()| stream.flush());
            if let Err(err) = written {
                self.failed = true;
                return Err(err);
            }
            begin = end;
        }
        self.words_written += 1;
        Ok(())
    }

    pub fn words_written(&self) -> u64 {
        self.words_written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.streams
            .iter_mut()
            .flatten()
            .try_for_each(|stream| stream.flush())
    }

    pub fn into_inner(self) -> [[W; 2]; DATA_LINES] {
        self.streams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_dump() -> PcmDump<Vec<u8>> {
        PcmDump::from_writers(Default::default())
    }

    #[test]
    fn file_names() {
        assert_eq!(dump_file_name(0, StereoChannel::Left), "ch0L.pcm");
        assert_eq!(dump_file_name(3, StereoChannel::Right), "ch3R.pcm");
    }

    #[test]
    fn words_land_in_their_side_and_line() -> io::Result<()> {
        let mut dump = memory_dump();
        dump.write_word(
            StereoChannel::Left,
            &[
                PackedWord::U16(0x1234),
                PackedWord::U16(0x5678),
                PackedWord::U16(0x9ABC),
                PackedWord::U16(0xDEF0),
            ],
        )?;
        dump.write_word(StereoChannel::Right, &[PackedWord::U32(0xAABBCCDD); DATA_LINES])?;
        assert_eq!(dump.words_written(), 2);

        let streams = dump.into_inner();
        assert_eq!(streams[0][0], [0x34, 0x12]);
        assert_eq!(streams[3][0], [0xF0, 0xDE]);
        for line in &streams {
            assert_eq!(line[1], [0xDD, 0xCC, 0xBB, 0xAA]);
        }
        Ok(())
    }

    /// Accepts writes until its line is told to fail.
    #[derive(Default)]
    struct FlakyStream {
        data: Vec<u8>,
        fail: bool,
    }

    impl Write for FlakyStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail {
                return Err(io::Error::other("device gone"));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_stops_further_writes() {
        let mut streams: [[FlakyStream; 2]; DATA_LINES] = Default::default();
        streams[2][StereoChannel::Left.index()].fail = true;
        let mut dump = PcmDump::from_writers(streams);

        let words = [PackedWord::U16(0x1234); DATA_LINES];
        assert!(dump.write_word(StereoChannel::Left, &words).is_err());
        assert!(dump.write_word(StereoChannel::Right, &words).is_err());
        assert_eq!(dump.words_written(), 0);

        let streams = dump.into_inner();
        let left = StereoChannel::Left.index();
        assert_eq!(streams[0][left].data, [0x34, 0x12]);
        assert_eq!(streams[1][left].data, [0x34, 0x12]);
        assert!(streams[3][left].data.is_empty());
        assert!(streams.iter().all(|line| line[1].data.is_empty()));
    }

    #[test]
    fn create_writes_eight_files() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("i2s-dump-{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;

        let mut dump = PcmDump::create(&dir)?;
        dump.write_word(StereoChannel::Left, &[PackedWord::U16(0xAAAA); DATA_LINES])?;
        drop(dump);

        for line in 0..DATA_LINES {
            let left = std::fs::read(dir.join(dump_file_name(line, StereoChannel::Left)))?;
            let right = std::fs::read(dir.join(dump_file_name(line, StereoChannel::Right)))?;
            assert_eq!(left, [0xAA, 0xAA]);
            assert!(right.is_empty());
        }

        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
