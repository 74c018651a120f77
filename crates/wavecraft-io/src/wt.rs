//! `.wt` wavetable codec.
//!
//! Layout (all little-endian):
//!
//! | offset | size | field             |
//! |--------|------|-------------------|
//! | 0      | 4    | magic `vawt`      |
//! | 4      | 4    | samples per frame |
//! | 8      | 4    | frame count       |
//! | 12     | 4*n  | f32 samples       |

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use wavecraft_spec::{validate_table, SAMPLE_RATE};

use crate::error::{IoError, IoResult};
use crate::table::{ImportedWavetable, TableView};

/// File magic.
pub const WT_MAGIC: &[u8; 4] = b"vawt";

/// Header size in bytes.
pub const WT_HEADER_SIZE: usize = 12;

/// Largest frame count accepted on import.
pub const WT_MAX_FRAMES: u32 = 16_384;

/// Writes `table` as a `.wt` stream.
///
/// The table must pass [`validate_table`]. Samples are clamped to [-1, 1].
pub fn write_wt<W: Write>(writer: &mut W, table: &TableView<'_>) -> IoResult<()> {
    validate_table(table.samples, table.num_frames, table.samples_per_frame)?;

    writer.write_all(WT_MAGIC)?;
    writer.write_u32::<LittleEndian>(table.samples_per_frame as u32)?;
    writer.write_u32::<LittleEndian>(table.num_frames as u32)?;
    for &sample in table.samples {
        writer.write_f32::<LittleEndian>(sample.clamp(-1.0, 1.0) as f32)?;
    }
    Ok(())
}

/// Reads a `.wt` stream.
pub fn read_wt<R: Read>(reader: &mut R) -> IoResult<ImportedWavetable> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != WT_MAGIC {
        return Err(IoError::InvalidMagic { found: magic });
    }

    let samples_per_frame = reader.read_u32::<LittleEndian>()?;
    if samples_per_frame == 0 || !samples_per_frame.is_power_of_two() {
        return Err(IoError::InvalidFrameSize {
            size: samples_per_frame,
        });
    }

    let num_frames = reader.read_u32::<LittleEndian>()?;
    if num_frames == 0 || num_frames > WT_MAX_FRAMES {
        return Err(IoError::InvalidFrameCount { count: num_frames });
    }

    let total = samples_per_frame as usize * num_frames as usize;
    let mut samples = Vec::with_capacity(total);
    for _ in 0..total {
        samples.push(reader.read_f32::<LittleEndian>()? as f64);
    }

    Ok(ImportedWavetable {
        samples,
        num_frames: num_frames as usize,
        samples_per_frame: samples_per_frame as usize,
        sample_rate: SAMPLE_RATE,
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use wavecraft_spec::SpecError;

    fn encode(samples: &[f64], frames: usize, spf: usize) -> IoResult<Vec<u8>> {
        let mut buffer = Vec::new();
        write_wt(&mut buffer, &TableView::new(samples, frames, spf, 44_100))?;
        Ok(buffer)
    }

    #[test]
    fn test_header_layout() {
        let samples = vec![0.5; 8];
        let bytes = encode(&samples, 2, 4).unwrap();
        assert_eq!(bytes.len(), WT_HEADER_SIZE + 8 * 4);
        assert_eq!(&bytes[0..4], b"vawt");
        assert_eq!(&bytes[4..8], &4u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &2u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &0.5f32.to_le_bytes());
    }

    #[test]
    fn test_samples_are_clamped() {
        let bytes = encode(&[2.0, -3.0, 0.25, 0.0], 1, 4).unwrap();
        let table = read_wt(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(table.samples, vec![1.0, -1.0, 0.25, 0.0]);
        assert_eq!(table.sample_rate, 44_100);
    }

    #[test]
    fn test_writer_checks_post_conditions() {
        assert!(matches!(
            encode(&[0.0; 8], 2, 4),
            Err(IoError::Spec(SpecError::AllSamplesZero))
        ));
        assert!(matches!(
            encode(&[0.1; 7], 2, 4),
            Err(IoError::Spec(SpecError::InvalidSampleCount { .. }))
        ));
    }

    #[test]
    fn test_reader_rejects_bad_headers() {
        let mut bad_magic = b"RIFF".to_vec();
        bad_magic.extend_from_slice(&[0; 8]);
        assert!(matches!(
            read_wt(&mut Cursor::new(bad_magic)),
            Err(IoError::InvalidMagic { .. })
        ));

        let mut bad_size = b"vawt".to_vec();
        bad_size.extend_from_slice(&100u32.to_le_bytes());
        bad_size.extend_from_slice(&1u32.to_le_bytes());
        assert!(matches!(
            read_wt(&mut Cursor::new(bad_size)),
            Err(IoError::InvalidFrameSize { size: 100 })
        ));

        let mut too_many = b"vawt".to_vec();
        too_many.extend_from_slice(&4u32.to_le_bytes());
        too_many.extend_from_slice(&20_000u32.to_le_bytes());
        assert!(matches!(
            read_wt(&mut Cursor::new(too_many)),
            Err(IoError::InvalidFrameCount { count: 20_000 })
        ));
    }

    #[test]
    fn test_truncated_body_is_an_io_error() {
        let mut bytes = encode(&[0.5; 8], 2, 4).unwrap();
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(read_wt(&mut Cursor::new(bytes)), Err(IoError::Io(_))));
    }
}
