//! Record sink trait and output errors

use crate::record::Record;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Append-only destination for emitted records
pub trait RecordSink {
    /// Appends one record
    fn append(&mut self, record: &Record) -> OutputResult<()>;

    /// Flushes buffered records to the underlying target
    fn finish(&mut self) -> OutputResult<()>;

    /// Appends every record in order, then flushes
    ///
    /// Returns the number of records written.
    fn write_all(&mut self, records: &[Record]) -> OutputResult<usize> {
        for record in records {
            self.append(record)?;
        }
        self.finish()?;
        Ok(records.len())
    }
}

impl RecordSink for Vec<Record> {
    fn append(&mut self, record: &Record) -> OutputResult<()> {
        self.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::synthesize;

    #[test]
    fn test_vec_sink_write_all() {
        let records = vec![
            synthesize("A", &["{ a }".repeat(25)], "").unwrap(),
            synthesize("B", &["{ b }".repeat(25)], "").unwrap(),
        ];

        let mut sink: Vec<Record> = Vec::new();
        let written = sink.write_all(&records).unwrap();

        assert_eq!(written, 2);
        assert_eq!(sink, records);
    }
}
