//! Weighted frame combination and start-to-end morphing.
//!
//! [`combine`] never normalizes. Loudness is fixed once per table by
//! [`morph`] so that a quiet frame stays quiet relative to a loud one.

use log::debug;
use wavecraft_spec::{MorphCurve, WaveformKind, WavetableFrame, WeightedWaveform};

use crate::error::{CoreError, CoreResult};
use crate::oscillator::{self, remove_dc, CycleParams};
use crate::table::Wavetable;

/// Sums `weight * generate(kind)` over the frame and removes DC.
///
/// The result is not normalized. An empty frame yields silence.
pub fn combine(frame: &WavetableFrame, params: &CycleParams) -> Vec<f64> {
    let mut out = vec![0.0; params.sample_count];
    for wave in frame {
        let cycle = oscillator::generate(wave.kind, params);
        for (acc, sample) in out.iter_mut().zip(cycle) {
            *acc += sample * wave.weight;
        }
    }
    remove_dc(&mut out);
    out
}

/// Returns the end frame to morph towards.
///
/// A non-empty `explicit_end` is used as is. Otherwise a start frame with
/// several entries is reversed, and a single entry gains an
/// [`WaveformKind::Additive`] partner at half its weight (unless it already
/// is additive).
pub fn implicit_end_frame(start: &WavetableFrame, explicit_end: Option<&WavetableFrame>) -> WavetableFrame {
    if let Some(end) = explicit_end.filter(|f| !f.is_empty()) {
        return end.clone();
    }
    match start.waves.as_slice() {
        [] => WavetableFrame::default(),
        [base] => {
            let mut end = WavetableFrame::new(vec![*base]);
            if base.kind != WaveformKind::Additive {
                end.push(WaveformKind::Additive, base.weight * 0.5);
            }
            end
        }
        _ => start.reversed(),
    }
}

/// Blend recipe at curved morph position `position`.
///
/// Start weights are scaled by `1 - position` and end weights by `position`;
/// end entries whose kind is already present are added to it, and
/// non-positive results are dropped.
pub fn frame_at(start: &WavetableFrame, end: &WavetableFrame, position: f64) -> WavetableFrame {
    let mut waves: Vec<WeightedWaveform> = start
        .iter()
        .map(|w| WeightedWaveform::new(w.kind, w.weight * (1.0 - position)))
        .filter(|w| w.weight > 0.0)
        .collect();

    for wave in end {
        let weight = wave.weight * position;
        if weight <= 0.0 {
            continue;
        }
        match waves.iter_mut().find(|w| w.kind == wave.kind) {
            Some(existing) => existing.weight += weight,
            None => waves.push(WeightedWaveform::new(wave.kind, weight)),
        }
    }
    WavetableFrame::new(waves)
}

/// Linear morph position of frame `index` out of `num_frames`.
///
/// A single-frame table sits at the start.
pub fn linear_position(index: usize, num_frames: usize) -> f64 {
    if num_frames <= 1 {
        0.0
    } else {
        index as f64 / (num_frames - 1) as f64
    }
}

/// Builds `num_frames` cycles morphing from `start` to `end` and applies one
/// global peak normalization across the whole table.
pub fn morph(
    start: &WavetableFrame,
    end: &WavetableFrame,
    num_frames: usize,
    curve: MorphCurve,
    params: &CycleParams,
) -> CoreResult<Wavetable> {
    if num_frames == 0 {
        return Err(CoreError::invalid_param("num_frames", "must be at least 1"));
    }
    debug!(
        "morphing {} -> {} entries over {} frames ({:?})",
        start.len(),
        end.len(),
        num_frames,
        curve
    );

    let frames = (0..num_frames).map(|index| {
        let position = curve.apply(linear_position(index, num_frames));
        combine(&frame_at(start, end, position), params)
    });
    let mut table = Wavetable::from_frames(frames, params.sample_count);
    table.normalize();
    Ok(table)
}
