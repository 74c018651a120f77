//! Output strategies selected by [`OutputFormat`].

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use log::debug;
use wavecraft_spec::OutputFormat;

use crate::error::IoResult;
use crate::table::TableView;
use crate::wav::write_wav;
use crate::wt::write_wt;

/// Encodes a table into one container format.
pub trait WavetableWriter {
    /// Format produced by this writer.
    fn format(&self) -> OutputFormat;

    /// Encodes `table` into an in-memory file image.
    fn encode(&self, table: &TableView<'_>) -> IoResult<Vec<u8>>;

    /// Encodes `table` and writes it to `path`, replacing any existing file.
    fn write(&self, path: &Path, table: &TableView<'_>) -> IoResult<()> {
        let bytes = self.encode(table)?;
        let mut file = BufWriter::new(File::create(path)?);
        file.write_all(&bytes)?;
        file.flush()?;
        debug!(
            "wrote {} ({} frames x {} samples, {} bytes)",
            path.display(),
            table.num_frames,
            table.samples_per_frame,
            bytes.len()
        );
        Ok(())
    }
}

/// Writes `.wt` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct WtWriter;

impl WavetableWriter for WtWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Wt
    }

    fn encode(&self, table: &TableView<'_>) -> IoResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(crate::wt::WT_HEADER_SIZE + table.samples.len() * 4);
        write_wt(&mut bytes, table)?;
        Ok(bytes)
    }
}

/// Writes mono 16-bit `.wav` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavWriter;

impl WavetableWriter for WavWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Wav
    }

    fn encode(&self, table: &TableView<'_>) -> IoResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(44 + table.samples.len() * 2));
        write_wav(&mut cursor, table)?;
        Ok(cursor.into_inner())
    }
}

/// Returns the writer for `format`.
pub fn writer_for(format: OutputFormat) -> Box<dyn WavetableWriter> {
    match format {
        OutputFormat::Wt => Box::new(WtWriter),
        OutputFormat::Wav => Box::new(WavWriter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_factory_picks_matching_writer() {
        assert_eq!(writer_for(OutputFormat::Wt).format(), OutputFormat::Wt);
        assert_eq!(writer_for(OutputFormat::Wav).format(), OutputFormat::Wav);
    }

    #[test]
    fn test_encodings_start_with_their_magic() {
        let samples = [0.25, -0.25, 0.5, -0.5];
        let view = TableView::new(&samples, 1, 4, 44_100);
        let wt = writer_for(OutputFormat::Wt).encode(&view).unwrap();
        let wav = writer_for(OutputFormat::Wav).encode(&view).unwrap();
        assert_eq!(&wt[0..4], b"vawt");
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(wav.len(), 44 + 4 * 2);
    }
}
