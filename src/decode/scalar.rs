//! Portable per-slot decode loop.

use crate::bbox::BBox;
use crate::candidate::Candidate;
use crate::decode::Rows;
use crate::detect::DetectConfig;
use crate::util::math::argmax_first;

/// Decodes slots `[start, end)` and appends survivors to `out`.
pub(crate) fn decode_range(
    rows: &Rows<'_>,
    cfg: &DetectConfig,
    start: usize,
    end: usize,
    out: &mut Vec<Candidate>,
) {
    for (offset, &obj) in rows.obj[start..end].iter().enumerate() {
        // Written as a negated `>` so NaN objectness is rejected too.
        if !(obj > cfg.obj_conf_threshold) {
            continue;
        }
        if let Some(candidate) = decode_slot(rows, cfg, start + offset, obj) {
            out.push(candidate);
        }
    }
}

/// Runs the class scan, score and box filters for a slot whose objectness
/// already passed.
#[inline]
pub(crate) fn decode_slot(
    rows: &Rows<'_>,
    cfg: &DetectConfig,
    index: usize,
    obj: f32,
) -> Option<Candidate> {
    let (class_index, class_score) = argmax_first(rows.classes.iter().map(|row| row[index]))?;

    let score = obj * class_score;
    if !(score > cfg.final_score_threshold) {
        return None;
    }

    let bbox = BBox::from_center_size(rows.cx[index], rows.cy[index], rows.w[index], rows.h[index])
        .clamped(cfg.input_size as f32);
    if !(bbox.width() >= cfg.min_box_side && bbox.height() >= cfg.min_box_side) {
        return None;
    }

    Some(Candidate {
        class_index,
        score,
        bbox,
    })
}
