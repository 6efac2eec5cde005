//! NDJSON output for extracted records and split messages.
//!
//! Every [`Record`] goes out as one JSON line, so a stream of passengers or
//! message envelopes can be tailed or fed to a queue line by line.

use std::fmt;
use std::io::{self, Write};

use crate::record::Record;

/// Failure while writing a record stream
#[derive(Debug)]
pub enum SerializationError {
    /// A record could not be encoded as JSON
    Encode {
        record: &'static str,
        source: serde_json::Error,
    },
    /// The sink rejected a write or flush
    Io(io::Error),
}

impl From<io::Error> for SerializationError {
    fn from(err: io::Error) -> Self {
        SerializationError::Io(err)
    }
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationError::Encode { record, source } => {
                write!(f, "Failed to encode {} record: {}", record, source)
            }
            SerializationError::Io(e) => write!(f, "Write failed: {}", e),
        }
    }
}

impl std::error::Error for SerializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializationError::Encode { source, .. } => Some(source),
            SerializationError::Io(e) => Some(e),
        }
    }
}

/// Streams records to a sink, one JSON document per line.
pub struct NdjsonWriter<W: Write> {
    sink: W,
    written: usize,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, written: 0 }
    }

    pub fn write<R: Record>(&mut self, record: &R) -> Result<(), SerializationError> {
        let line = record
            .to_ndjson_line()
            .map_err(|source| SerializationError::Encode {
                record: R::NAME,
                source,
            })?;
        self.sink.write_all(line.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Write every record in order, stopping at the first failure.
    ///
    /// # Returns
    /// Number of records written by this call
    pub fn write_all<'r, R, I>(&mut self, records: I) -> Result<usize, SerializationError>
    where
        R: Record + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        let before = self.written;
        for record in records {
            self.write(record)?;
        }
        Ok(self.written - before)
    }

    /// Records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush the sink and hand it back.
    pub fn finish(mut self) -> Result<W, SerializationError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::MessageEnvelope;
    use crate::record::PassengerRecord;

    fn passenger(last: &str) -> PassengerRecord {
        PassengerRecord {
            last_name: Some(last.to_string()),
            ..Default::default()
        }
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_passengers_one_per_line() {
        let mut writer = NdjsonWriter::new(Vec::new());

        let count = writer
            .write_all(&[passenger("SMITH"), passenger("JONES")])
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(writer.written(), 2);

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let parsed: Vec<PassengerRecord> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(parsed, vec![passenger("SMITH"), passenger("JONES")]);
    }

    #[test]
    fn test_envelopes_keep_order_and_body() {
        let envelopes = MessageEnvelope::wrap_all(
            vec!["SRC'TIF+SMITH'".to_string(), "SRC'TIF+JONES'".to_string()],
            Some("batch.edi"),
        );
        let mut writer = NdjsonWriter::new(Vec::new());
        writer.write_all(&envelopes).unwrap();

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<MessageEnvelope> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].index, 1);
        assert_eq!(lines[1].body, "SRC'TIF+JONES'");
        assert_eq!(lines[0].message_id, envelopes[0].message_id);
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let mut writer = NdjsonWriter::new(ClosedSink);

        let err = writer.write(&passenger("SMITH")).unwrap_err();
        assert!(matches!(err, SerializationError::Io(_)));
        assert_eq!(writer.written(), 0);
        assert!(err.to_string().starts_with("Write failed"));
    }
}
