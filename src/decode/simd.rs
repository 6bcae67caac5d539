//! SIMD objectness pre-filter using the `wide` crate.
//!
//! Objectness is the dominant rejection path and its row is contiguous, so
//! eight slots are compared against the threshold per step. Only lanes that
//! pass go through the scalar class scan in [`decode_slot`].

use crate::candidate::Candidate;
use crate::decode::scalar::decode_slot;
use crate::decode::Rows;
use crate::detect::DetectConfig;
use wide::f32x8;

const LANES: usize = 8;

/// Load 8 f32 values into f32x8.
#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

/// Decodes slots `[start, end)`, appending survivors in slot order.
pub(crate) fn decode_range(
    rows: &Rows<'_>,
    cfg: &DetectConfig,
    start: usize,
    end: usize,
    out: &mut Vec<Candidate>,
) {
    let obj = &rows.obj[start..end];
    let threshold = f32x8::splat(cfg.obj_conf_threshold);
    let simd_end = obj.len() / LANES * LANES;

    let mut base = 0;
    while base < simd_end {
        // NaN lanes compare false and stay rejected.
        let mask = load_f32x8(&obj[base..]).simd_gt(threshold).to_bitmask();
        if mask != 0 {
            for lane in 0..LANES {
                if mask & (1 << lane) != 0 {
                    let index = start + base + lane;
                    if let Some(candidate) = decode_slot(rows, cfg, index, obj[base + lane]) {
                        out.push(candidate);
                    }
                }
            }
        }
        base += LANES;
    }

    // Scalar remainder
    for (offset, &value) in obj[simd_end..].iter().enumerate() {
        if !(value > cfg.obj_conf_threshold) {
            continue;
        }
        if let Some(candidate) = decode_slot(rows, cfg, start + simd_end + offset, value) {
            out.push(candidate);
        }
    }
}
