//! Decision output port for writing decision records.

use crate::domain::DecisionRecord;

/// Port for outputting decision records.
pub trait DecisionOutput: Send + Sync {
    /// Writes a single decision record.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, record: &DecisionRecord) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
