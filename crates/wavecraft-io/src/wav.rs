//! Mono `.wav` codec backed by `hound`.

use std::io::{Read, Seek, Write};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter as HoundWriter};

use crate::error::{IoError, IoResult};
use crate::table::{infer_frame_layout, ImportedWavetable, TableView};

/// Writes `table` as mono 16-bit PCM at its sample rate.
///
/// Samples are clamped to [-1, 1] and scaled by 32767.
pub fn write_wav<W: Write + Seek>(writer: W, table: &TableView<'_>) -> IoResult<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: table.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut wav = HoundWriter::new(writer, spec)?;
    for &sample in table.samples {
        wav.write_sample((sample.clamp(-1.0, 1.0) * 32767.0) as i16)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Reads a mono 16-bit PCM or 32-bit float `.wav` stream and infers its
/// frame layout.
pub fn read_wav<R: Read>(reader: R) -> IoResult<ImportedWavetable> {
    let wav = WavReader::new(reader)?;
    let spec = wav.spec();
    if spec.channels != 1 {
        return Err(IoError::UnsupportedFormat(format!(
            "{} channels, only mono is supported",
            spec.channels
        )));
    }

    let samples: Vec<f64> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => wav
            .into_samples::<i16>()
            .map(|s| s.map(|v| v as f64 / 32768.0))
            .collect::<Result<Vec<f64>, _>>()?,
        (SampleFormat::Float, 32) => wav
            .into_samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<Result<Vec<f64>, _>>()?,
        (format, bits) => {
            return Err(IoError::UnsupportedFormat(format!(
                "{}-bit {:?} samples",
                bits, format
            )));
        }
    };
    if samples.is_empty() {
        return Err(IoError::UnsupportedFormat("no samples".to_string()));
    }

    let (num_frames, samples_per_frame) = infer_frame_layout(samples.len());
    Ok(ImportedWavetable {
        samples,
        num_frames,
        samples_per_frame,
        sample_rate: spec.sample_rate,
        source: None,
    })
}
