//! CLI command implementations

pub mod analyze;
pub mod batch;
pub mod generate;
pub mod kinds;

use std::path::Path;

use anyhow::{Context, Result};
use wavecraft_core::GeneratedTable;
use wavecraft_io::{writer_for, TableView};
use wavecraft_spec::OutputFormat;

/// Writes a generated table, forcing `.wav` for previews.
pub(crate) fn write_table(table: &GeneratedTable, format: OutputFormat, path: &Path) -> Result<()> {
    let format = if table.preview { OutputFormat::Wav } else { format };
    let view = TableView::new(
        &table.samples,
        table.num_frames,
        table.samples_per_frame,
        table.sample_rate,
    );
    writer_for(format)
        .write(path, &view)
        .with_context(|| format!("Failed to write {}", path.display()))
}
