//! Decoding raw detector output into scored candidates.
//!
//! Each candidate slot is handled independently:
//!
//! 1. objectness at or below `obj_conf_threshold` rejects the slot before any
//!    class score is read;
//! 2. the best class is the highest score, lowest index on ties;
//! 3. `objectness * best_class_score` must exceed `final_score_threshold`;
//! 4. the centre/size box is converted to corners and clamped to the input;
//! 5. boxes with a side shorter than `min_box_side` are dropped.
//!
//! Candidates come out in ascending slot order whichever backend runs.

pub(crate) mod scalar;

#[cfg(feature = "simd")]
pub(crate) mod simd;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;

use crate::candidate::Candidate;
use crate::detect::DetectConfig;
use crate::tensor::{TensorView, ATTR_CX, ATTR_CY, ATTR_H, ATTR_OBJ, ATTR_W, BOX_ATTRIBUTES};
use crate::trace;
use crate::util::{YoloPostError, YoloPostResult};

/// Attribute rows of a validated tensor, resolved once per call.
pub(crate) struct Rows<'a> {
    pub(crate) cx: &'a [f32],
    pub(crate) cy: &'a [f32],
    pub(crate) w: &'a [f32],
    pub(crate) h: &'a [f32],
    pub(crate) obj: &'a [f32],
    pub(crate) classes: Vec<&'a [f32]>,
}

impl<'a> Rows<'a> {
    fn resolve(view: TensorView<'a>, num_classes: usize) -> YoloPostResult<Self> {
        let expected = BOX_ATTRIBUTES + num_classes;
        if view.attributes() != expected {
            return Err(YoloPostError::ShapeMismatch {
                expected,
                got: view.attributes(),
            });
        }
        let row = |attr: usize| {
            view.attribute(attr).ok_or(YoloPostError::ShapeMismatch {
                expected,
                got: view.attributes(),
            })
        };
        let classes = (BOX_ATTRIBUTES..expected)
            .map(&row)
            .collect::<YoloPostResult<Vec<_>>>()?;
        Ok(Self {
            cx: row(ATTR_CX)?,
            cy: row(ATTR_CY)?,
            w: row(ATTR_W)?,
            h: row(ATTR_H)?,
            obj: row(ATTR_OBJ)?,
            classes,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.obj.len()
    }
}

/// Decodes every candidate slot of `view` that passes the filters in `cfg`.
///
/// Fails with [`YoloPostError::ShapeMismatch`] when the attribute count is not
/// `5 + cfg.num_classes`; nothing is decoded in that case. A tensor with zero
/// candidate slots decodes to an empty list.
pub fn decode(view: TensorView<'_>, cfg: &DetectConfig) -> YoloPostResult<Vec<Candidate>> {
    let _stage = trace::decode_span(view.attributes(), view.candidates());

    let rows = Rows::resolve(view, cfg.num_classes)?;
    let out = run_backend(&rows, cfg);

    trace::decode_done(out.len());
    Ok(out)
}

#[cfg(feature = "rayon")]
fn run_backend(rows: &Rows<'_>, cfg: &DetectConfig) -> Vec<Candidate> {
    if cfg.parallel {
        self::rayon::decode_par(rows, cfg)
    } else {
        decode_sequential(rows, cfg)
    }
}

#[cfg(not(feature = "rayon"))]
fn run_backend(rows: &Rows<'_>, cfg: &DetectConfig) -> Vec<Candidate> {
    decode_sequential(rows, cfg)
}

/// Decodes slots `[start, end)` on the current thread.
pub(crate) fn decode_sequential_range(
    rows: &Rows<'_>,
    cfg: &DetectConfig,
    start: usize,
    end: usize,
    out: &mut Vec<Candidate>,
) {
    #[cfg(feature = "simd")]
    simd::decode_range(rows, cfg, start, end, out);
    #[cfg(not(feature = "simd"))]
    scalar::decode_range(rows, cfg, start, end, out);
}

fn decode_sequential(rows: &Rows<'_>, cfg: &DetectConfig) -> Vec<Candidate> {
    let mut out = Vec::new();
    decode_sequential_range(rows, cfg, 0, rows.len(), &mut out);
    out
}

/// Decodes with the portable scalar loop regardless of enabled features.
///
/// Reference output for the accelerated backends.
pub fn decode_scalar(view: TensorView<'_>, cfg: &DetectConfig) -> YoloPostResult<Vec<Candidate>> {
    let rows = Rows::resolve(view, cfg.num_classes)?;
    let mut out = Vec::new();
    scalar::decode_range(&rows, cfg, 0, rows.len(), &mut out);
    Ok(out)
}
