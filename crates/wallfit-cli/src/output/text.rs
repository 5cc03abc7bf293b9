//! Plain-text output adapter.

use std::io::Write;
use std::sync::Mutex;

use anyhow::Result;

use wallfit_core::{DecisionOutput, DecisionRecord};

/// Column-aligned text output, one record per line.
pub struct TextOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TextOutput {
    /// Creates a new text output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl DecisionOutput for TextOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, record: &DecisionRecord) -> Result<()> {
        // Width specifiers only pad plain strings, so render first.
        let mode = record.mode.to_string();
        let background = record
            .background
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        let image = record.image.to_string();

        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{mode:<6} {background:<7} {image:>11} {}", record.path)?;
        for line in &record.trace {
            writeln!(writer, "    {line}")?;
        }
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
