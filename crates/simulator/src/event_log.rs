//! Event log writer.
//!
//! Records every dispatched event to a file (or any writer) as the
//! simulation runs. Write failures cannot interrupt the engine, so the first
//! one is kept and reported by [`EventLogWriter::finish`].

use crate::config::LogFormat;
use crate::error::SimulatorError;
use oddeven_core::{DispatchObserver, Event, EventKind};
use oddeven_simulation::SimulationConfig;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// One JSON-lines record.
#[derive(Serialize)]
struct JsonRecord<'a> {
    time: f64,
    event: &'a EventKind,
}

/// JSON-lines header.
#[derive(Serialize)]
struct JsonHeader {
    num_processes: u32,
    elements_per_process: usize,
    total_elements: usize,
}

/// Writes a header, then one record per dispatched event.
pub struct EventLogWriter<W: Write> {
    out: W,
    format: LogFormat,
    records: u64,
    error: Option<SimulatorError>,
}

impl EventLogWriter<BufWriter<File>> {
    /// Create (or truncate) the log file at `path` and write its header.
    pub fn create(
        path: impl AsRef<Path>,
        format: LogFormat,
        config: &SimulationConfig,
    ) -> Result<Self, SimulatorError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), format, config)
    }
}

impl<W: Write> EventLogWriter<W> {
    /// Wrap `out` and write the header.
    pub fn new(
        mut out: W,
        format: LogFormat,
        config: &SimulationConfig,
    ) -> Result<Self, SimulatorError> {
        match format {
            LogFormat::Text => {
                writeln!(out, "=== DISCRETE EVENT SIMULATION LOG ===")?;
                writeln!(out, "Number of Processors: {}", config.num_processes)?;
                writeln!(out, "Elements per Processor: {}", config.elements_per_process)?;
                writeln!(out, "Total Elements: {}", config.total_elements())?;
                writeln!(out, "========================================")?;
                writeln!(out)?;
            }
            LogFormat::Json => {
                let header = JsonHeader {
                    num_processes: config.num_processes,
                    elements_per_process: config.elements_per_process,
                    total_elements: config.total_elements(),
                };
                serde_json::to_writer(&mut out, &header)?;
                writeln!(out)?;
            }
        }

        Ok(Self {
            out,
            format,
            records: 0,
            error: None,
        })
    }

    /// Number of event records written.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush and return the writer, or the first error hit while logging.
    pub fn finish(mut self) -> Result<W, SimulatorError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_record(&mut self, event: &Event, now: Duration, record: &str) -> Result<(), SimulatorError> {
        match self.format {
            LogFormat::Text => writeln!(self.out, "{}", record)?,
            LogFormat::Json => {
                let json = JsonRecord {
                    time: now.as_secs_f64(),
                    event: event.kind(),
                };
                serde_json::to_writer(&mut self.out, &json)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> DispatchObserver for EventLogWriter<W> {
    fn on_dispatch(&mut self, event: &Event, now: Duration, record: &str) {
        if self.error.is_some() {
            return;
        }
        match self.write_record(event, now, record) {
            Ok(()) => self.records += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oddeven_core::{describe, Rank, Sender};

    fn send_event() -> Event {
        Event::new(
            Duration::from_secs(4),
            EventKind::Send {
                from: Sender::Process(Rank(1)),
                to: Rank(0),
                payload: vec![2, 9],
                tag: 0,
            },
        )
    }

    #[test]
    fn test_text_log_has_header_and_records() {
        let config = SimulationConfig::new(3, 2);
        let mut log = EventLogWriter::new(Vec::new(), LogFormat::Text, &config).unwrap();

        let event = send_event();
        let record = describe(&event, event.time());
        log.on_dispatch(&event, event.time(), &record);
        assert_eq!(log.records(), 1);

        let text = String::from_utf8(log.finish().unwrap()).unwrap();
        assert!(text.starts_with("=== DISCRETE EVENT SIMULATION LOG ===\n"));
        assert!(text.contains("Number of Processors: 3\n"));
        assert!(text.contains("Total Elements: 6\n"));
        assert!(text.contains("Time: 4, Type: SEND, Src: 1, Dest: 0, Tag: 0\nData: [2, 9]\n"));
    }

    #[test]
    fn test_json_log_lines_parse() {
        let config = SimulationConfig::new(2, 2);
        let mut log = EventLogWriter::new(Vec::new(), LogFormat::Json, &config).unwrap();

        let event = send_event();
        log.on_dispatch(&event, Duration::from_millis(4_500), "");
        let out = String::from_utf8(log.finish().unwrap()).unwrap();

        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["total_elements"], 4);
        assert_eq!(lines[1]["time"], 4.5);
        assert_eq!(lines[1]["event"]["type"], "SEND");
        assert_eq!(lines[1]["event"]["payload"], serde_json::json!([2, 9]));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            // Accept the header, fail once records start.
            if buf.starts_with(b"Time") {
                Err(std::io::Error::other("disk full"))
            } else {
                Ok(buf.len())
            }
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_reported_on_finish() {
        let config = SimulationConfig::new(2, 1);
        let mut log = EventLogWriter::new(FailingWriter, LogFormat::Text, &config).unwrap();

        let event = send_event();
        let record = describe(&event, event.time());
        log.on_dispatch(&event, event.time(), &record);
        log.on_dispatch(&event, event.time(), &record);

        assert_eq!(log.records(), 0);
        assert!(matches!(log.finish(), Err(SimulatorError::Io(_))));
    }
}
