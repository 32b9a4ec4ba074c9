//! Output sinks for rendered units.

mod dir;
mod memory;

pub use dir::DirSink;
pub use memory::MemorySink;

use crate::error::ExportResult;

/// Destination of the units an export produces.
///
/// Sinks are **opaque text stores**. They receive named units and store
/// them; they do not interpret names or content.
///
/// # Invariants
///
/// - `clear` removes every unit a previous run left behind
/// - `write_unit` replaces any unit of the same name
/// - after `finish` returns, every written unit is complete
///
/// # Implementors
///
/// - [`MemorySink`] - For testing
/// - [`DirSink`] - For files on disk
pub trait OutputSink: Send {
    /// Removes all units from the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if existing units cannot be removed.
    fn clear(&mut self) -> ExportResult<()>;

    /// Stores one unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit cannot be written.
    fn write_unit(&mut self, name: &str, text: &str) -> ExportResult<()>;

    /// Completes the run.
    ///
    /// # Errors
    ///
    /// Returns an error if written units cannot be made durable.
    fn finish(&mut self) -> ExportResult<()>;
}
