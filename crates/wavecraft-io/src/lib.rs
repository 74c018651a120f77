//! Wavecraft wavetable codecs.
//!
//! Writes generated tables as `.wt` (a `vawt` header followed by 32-bit
//! floats) or as mono 16-bit `.wav`, and reads either back for analysis.
//!
//! # Example
//!
//! ```
//! use wavecraft_io::{read_wt, writer_for, TableView};
//! use wavecraft_spec::OutputFormat;
//!
//! let samples: Vec<f64> = (0..256).map(|i| (i as f64 / 128.0) - 1.0).collect();
//! let view = TableView::new(&samples, 2, 128, 44_100);
//! let bytes = writer_for(OutputFormat::Wt).encode(&view).unwrap();
//!
//! let table = read_wt(&mut bytes.as_slice()).unwrap();
//! assert_eq!(table.num_frames, 2);
//! assert_eq!(table.samples_per_frame, 128);
//! ```

pub mod error;
pub mod import;
pub mod table;
pub mod wav;
pub mod writer;
pub mod wt;

pub use error::{IoError, IoResult};
pub use import::import_wavetable;
pub use table::{infer_frame_layout, ImportedWavetable, TableView};
pub use wav::{read_wav, write_wav};
pub use writer::{writer_for, WavWriter, WavetableWriter, WtWriter};
pub use wt::{read_wt, write_wt, WT_HEADER_SIZE, WT_MAGIC, WT_MAX_FRAMES};
