//! JSON-lines record writer and reader-side record counting

use crate::output::traits::{OutputResult, RecordSink};
use crate::record::{Record, Role};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Writes one JSON object per line; non-ASCII text is written as-is
pub struct JsonlWriter<W: Write> {
    writer: W,
}

impl JsonlWriter<BufWriter<File>> {
    /// Creates (or truncates) the output file
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonlWriter<W> {
    fn append(&mut self, record: &Record) -> OutputResult<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct StoredMessage {
    role: Role,
    content: String,
}

#[derive(Deserialize)]
struct StoredRecord {
    messages: Vec<StoredMessage>,
}

impl StoredRecord {
    fn is_well_formed(&self) -> bool {
        matches!(
            self.messages.as_slice(),
            [user, assistant]
                if user.role == Role::User
                    && assistant.role == Role::Assistant
                    && !assistant.content.is_empty()
        )
    }
}

/// Tally of lines in an existing records file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordTally {
    /// Lines holding a user/assistant message pair
    pub records: usize,

    /// Non-blank lines that are not valid records
    pub malformed: usize,
}

/// Counts the records in a JSON-lines file; blank lines are ignored
pub fn count_records(path: &Path) -> OutputResult<RecordTally> {
    let reader = BufReader::new(File::open(path)?);
    let mut tally = RecordTally::default();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<StoredRecord>(&line) {
            Ok(stored) if stored.is_well_formed() => tally.records += 1,
            _ => tally.malformed += 1,
        }
    }

    Ok(tally)
}
