use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Result, bail};
use i2s::structs::sample::{CHANNEL_NAMES, DATA_LINES, Sample};

/// Bit position of each bus signal within one capture byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMap {
    bits: [u8; 2 + DATA_LINES],
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self {
            bits: [0, 1, 2, 3, 4, 5],
        }
    }
}

impl ChannelMap {
    pub fn sample(&self, byte: u8) -> Sample {
        let level = |channel: usize| (byte >> self.bits[channel]) & 1 != 0;
        Sample::new(level(0), level(1), [level(2), level(3), level(4), level(5)])
    }
}

impl FromStr for ChannelMap {
    type Err = anyhow::Error;

    /// Parses `name=bit` pairs such as `sck=3,ws=2`; unnamed channels keep
    /// their default position.
    fn from_str(s: &str) -> Result<Self> {
        let mut map = ChannelMap::default();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((name, bit)) = pair.split_once('=') else {
                bail!("Expected name=bit, got {pair:?}");
            };
            let Some(channel) = CHANNEL_NAMES.iter().position(|&n| n == name.trim()) else {
                bail!(
                    "Unknown channel {:?} (expected one of {})",
                    name.trim(),
                    CHANNEL_NAMES.join(", ")
                );
            };
            let bit: u8 = bit.trim().parse()?;
            if bit > 7 {
                bail!("Bit position for {name} must be 0-7, got {bit}");
            }
            map.bits[channel] = bit;
        }
        Ok(map)
    }
}

impl Display for ChannelMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = CHANNEL_NAMES
            .iter()
            .zip(self.bits)
            .map(|(name, bit)| format!("{name}={bit}"))
            .collect();
        f.write_str(&pairs.join(","))
    }
}

/// Raw logic capture with one byte per sample, from a file or stdin (`-`).
pub struct CaptureReader {
    reader: Box<dyn Read>,
    is_pipe: bool,
    len: Option<u64>,
    channel_map: ChannelMap,
    next_index: u64,
}

impl CaptureReader {
    pub fn new<P: AsRef<Path>>(input_path: P, channel_map: ChannelMap, first_index: u64) -> Result<Self> {
        let path_str = input_path.as_ref().to_string_lossy();
        let is_pipe = path_str == "-";

        let (reader, len): (Box<dyn Read>, _) = if is_pipe {
            (Box::new(io::stdin().lock()), None)
        } else {
            let file = File::open(input_path)?;
            let len = file.metadata().ok().map(|m| m.len());
            (Box::new(BufReader::new(file)), len)
        };

        Ok(Self {
            reader,
            is_pipe,
            len,
            channel_map,
            next_index: first_index,
        })
    }

    #[cfg(test)]
    fn from_reader(reader: impl Read + 'static, channel_map: ChannelMap) -> Self {
        Self {
            reader: Box::new(reader),
            is_pipe: false,
            len: None,
            channel_map,
            next_index: 0,
        }
    }

    pub fn is_pipe(&self) -> bool {
        self.is_pipe
    }

    /// Capture size in samples, when known up front.
    pub fn sample_count(&self) -> Option<u64> {
        self.len
    }

    /// Feeds every sample to `callback` in chunks of `chunk_size` bytes.
    ///
    /// The callback returns `Ok(false)` to stop early. Returns the number of
    /// samples read.
    pub fn for_each_sample<F>(&mut self, chunk_size: usize, mut callback: F) -> Result<u64>
    where
        F: FnMut(u64, Sample) -> Result<bool>,
    {
        let mut buffer = vec![0u8; chunk_size];
        let mut read = 0u64;

        'chunks: loop {
            let bytes_read = match self.reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            for &byte in &buffer[..bytes_read] {
                let index = self.next_index;
                self.next_index += 1;
                read += 1;
                if !callback(index, self.channel_map.sample(byte))? {
                    break 'chunks;
                }
            }
        }

        Ok(read)
    }
}
