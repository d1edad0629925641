use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use i2s::structs::output::DataRecord;

/// One `DATA` packet as written to the records file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecordEntry {
    #[serde(rename = "type")]
    pub packet_type: String,
    pub start: u64,
    pub end: u64,
    pub channel: String,
    pub values: [u32; 4],
}

impl RecordEntry {
    pub fn new(start: u64, end: u64, record: &DataRecord) -> Self {
        Self {
            packet_type: DataRecord::PACKET_TYPE.to_string(),
            start,
            end,
            channel: record.channel.label().to_string(),
            values: record.values,
        }
    }
}

/// Streams records as items of one top-level YAML sequence.
pub struct RecordWriter<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn write(&mut self, entry: &RecordEntry) -> Result<()> {
        let item = serde_yaml_ng::to_string(std::slice::from_ref(entry))?;
        self.writer.write_all(item.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn finish(mut self) -> Result<W> {
        if self.written == 0 {
            self.writer.write_all(b"[]\n")?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}
