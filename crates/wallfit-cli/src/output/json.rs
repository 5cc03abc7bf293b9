//! JSON output adapters.

use std::io::Write;
use std::sync::Mutex;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use wallfit_core::{DecisionOutput, DecisionRecord, Dimensions};

/// JSON Lines output adapter, one record object per line.
pub struct JsonlOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonlOutput {
    /// Creates a new JSON Lines output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl DecisionOutput for JsonlOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, record: &DecisionRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

/// Report envelope emitted by [`JsonOutput`].
#[derive(Serialize)]
struct Report {
    generated_at: String,
    screen: Dimensions,
    decisions: Vec<DecisionRecord>,
}

/// Batch JSON output adapter.
///
/// Records are buffered and written as one pretty-printed report on flush.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    screen: Dimensions,
    records: Mutex<Vec<DecisionRecord>>,
}

impl JsonOutput {
    /// Creates a new batch JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, screen: Dimensions) -> Self {
        Self {
            writer: Mutex::new(writer),
            screen,
            records: Mutex::new(Vec::new()),
        }
    }
}

impl DecisionOutput for JsonOutput {
    fn write(&self, record: &DecisionRecord) -> Result<()> {
        self.records
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
            .push(record.clone());
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let decisions = std::mem::take(
            &mut *self
                .records
                .lock()
                .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
        );
        let report = Report {
            generated_at: iso_timestamp(),
            screen: self.screen,
            decisions,
        };
        let json = serde_json::to_string_pretty(&report)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wallfit_core::{Decision, PlacementMode, Rgb};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn record(path: &str) -> DecisionRecord {
        DecisionRecord::new(
            path,
            Dimensions::new(800, 600).unwrap(),
            Dimensions::new(1920, 1080).unwrap(),
            Decision {
                mode: PlacementMode::Fit,
                background: Some(Rgb::new(16, 32, 48)),
                trace: vec![],
            },
            false,
        )
    }

    #[test]
    fn test_jsonl_writes_one_object_per_line() {
        let buf = SharedBuf::default();
        let output = JsonlOutput::new(Box::new(buf.clone()));

        output.write(&record("a.png")).unwrap();
        output.write(&record("b.png")).unwrap();
        output.flush().unwrap();

        let text = buf.contents();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["path"], "a.png");
        assert_eq!(first["mode"], "fit");
        assert_eq!(first["background"], "#102030");
        assert_eq!(first["image"]["width"], 800);
    }

    #[test]
    fn test_json_report_is_written_on_flush() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), Dimensions::new(1920, 1080).unwrap());

        output.write(&record("a.png")).unwrap();
        output.write(&record("b.png")).unwrap();
        assert!(buf.contents().is_empty());

        output.flush().unwrap();

        let report: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
        assert!(report["generated_at"].is_string());
        assert_eq!(report["screen"]["width"], 1920);
        assert_eq!(report["decisions"].as_array().unwrap().len(), 2);
        assert_eq!(report["decisions"][1]["path"], "b.png");
    }

    #[test]
    fn test_iso_timestamp_is_rfc3339() {
        let ts = iso_timestamp();
        assert!(ts.contains('T'));
        assert!(ts.len() >= 20);
    }
}
