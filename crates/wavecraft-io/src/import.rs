//! Importing `.wt` and `.wav` files for analysis.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, warn};
use wavecraft_spec::OutputFormat;

use crate::error::{IoError, IoResult};
use crate::table::ImportedWavetable;
use crate::wav::read_wav;
use crate::wt::read_wt;

/// Reads a wavetable, choosing the codec from the file extension.
pub fn import_wavetable(path: &Path) -> IoResult<ImportedWavetable> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(OutputFormat::from_extension)
        .ok_or_else(|| IoError::UnknownExtension {
            path: path.to_path_buf(),
        })?;

    let mut reader = BufReader::new(File::open(path)?);
    let mut table = match format {
        OutputFormat::Wt => read_wt(&mut reader)?,
        OutputFormat::Wav => read_wav(reader)?,
    };
    table.source = Some(path.to_path_buf());

    if table.samples.iter().all(|&s| s == 0.0) {
        warn!("{} contains only silence", path.display());
    }
    debug!(
        "imported {} as {} frames x {} samples",
        path.display(),
        table.num_frames,
        table.samples_per_frame
    );
    Ok(table)
}
