//! Detector configuration and the decode → suppress pipeline.
//!
//! [`Detector`] validates a [`DetectConfig`] once and then turns each raw
//! output tensor into a final, score-ordered detection list. It holds no
//! per-call state, so one detector can serve any number of frames.

mod engine;

pub use engine::InferenceEngine;

use crate::candidate::nms::suppress;
use crate::candidate::{Candidate, Detection};
use crate::decode::decode;
use crate::tensor::{RawTensor, TensorView, BOX_ATTRIBUTES};
use crate::util::{YoloPostError, YoloPostResult};

/// Number of colour planes in the detector input.
pub const INPUT_CHANNELS: usize = 3;

/// Thresholds and geometry for decoding and suppression.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectConfig {
    /// Square model input side in pixels; boxes are clamped to `[0, input_size]`.
    pub input_size: u32,
    /// Number of class-score rows after the five box attributes.
    pub num_classes: usize,
    /// Objectness must exceed this value.
    pub obj_conf_threshold: f32,
    /// `objectness * best_class_score` must exceed this value.
    pub final_score_threshold: f32,
    /// Minimum width and height of a kept box, in pixels.
    pub min_box_side: f32,
    /// Suppression removes boxes whose IoU with a kept box exceeds this value.
    pub iou_threshold: f32,
    /// Decode on the rayon pool when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            input_size: 640,
            num_classes: 9,
            obj_conf_threshold: 0.6,
            final_score_threshold: 0.65,
            min_box_side: 30.0,
            iou_threshold: 0.6,
            parallel: false,
        }
    }
}

impl DetectConfig {
    /// Checks that every field is in range.
    pub fn validate(&self) -> YoloPostResult<()> {
        if self.input_size == 0 {
            return Err(YoloPostError::InvalidConfig {
                reason: "input_size must be positive",
            });
        }
        if self.num_classes == 0 {
            return Err(YoloPostError::InvalidConfig {
                reason: "num_classes must be positive",
            });
        }
        if self.checked_input_len().is_none() {
            return Err(YoloPostError::InvalidConfig {
                reason: "input_size too large for the input buffer",
            });
        }
        if !self.obj_conf_threshold.is_finite() {
            return Err(YoloPostError::InvalidConfig {
                reason: "obj_conf_threshold must be finite",
            });
        }
        if !self.final_score_threshold.is_finite() {
            return Err(YoloPostError::InvalidConfig {
                reason: "final_score_threshold must be finite",
            });
        }
        if !self.min_box_side.is_finite() || self.min_box_side < 0.0 {
            return Err(YoloPostError::InvalidConfig {
                reason: "min_box_side must be finite and non-negative",
            });
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(YoloPostError::InvalidConfig {
                reason: "iou_threshold must be in [0, 1]",
            });
        }
        Ok(())
    }

    /// Attribute rows expected in the raw tensor (`5 + num_classes`).
    pub fn attributes(&self) -> usize {
        BOX_ATTRIBUTES + self.num_classes
    }

    /// Length of the planar RGB input buffer (`3 * input_size²`).
    ///
    /// Saturates at `usize::MAX` for sizes that [`DetectConfig::validate`]
    /// rejects.
    pub fn input_len(&self) -> usize {
        self.checked_input_len().unwrap_or(usize::MAX)
    }

    fn checked_input_len(&self) -> Option<usize> {
        let side = usize::try_from(self.input_size).ok()?;
        side.checked_mul(side)?.checked_mul(INPUT_CHANNELS)
    }
}

/// Post-processor for one model configuration.
#[derive(Clone, Debug)]
pub struct Detector {
    config: DetectConfig,
}

impl Detector {
    /// Creates a detector after validating `config`.
    pub fn new(config: DetectConfig) -> YoloPostResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the detector configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Decodes a raw tensor into unsuppressed candidates.
    pub fn decode(&self, view: TensorView<'_>) -> YoloPostResult<Vec<Candidate>> {
        decode(view, &self.config)
    }

    /// Decodes and suppresses a raw tensor.
    ///
    /// Suppression is class-agnostic: an overlapping box of another class is
    /// removed as well. Use [`crate::suppress_per_class`] on the output of
    /// [`Detector::decode`] for per-class behaviour.
    pub fn detect(&self, view: TensorView<'_>) -> YoloPostResult<Vec<Detection>> {
        let candidates = self.decode(view)?;
        Ok(suppress(candidates, self.config.iou_threshold))
    }

    /// Convenience wrapper over [`Detector::detect`] for owned tensors.
    pub fn detect_tensor(&self, tensor: &RawTensor) -> YoloPostResult<Vec<Detection>> {
        self.detect(tensor.view())
    }

    /// Runs `engine` on a preprocessed input buffer and post-processes its output.
    ///
    /// `input` must hold `3 * input_size²` planar values; the engine is not
    /// called otherwise.
    pub fn run<E: InferenceEngine>(
        &self,
        engine: &mut E,
        input: &[f32],
    ) -> YoloPostResult<Vec<Detection>> {
        let needed = self.config.input_len();
        if input.len() != needed {
            return Err(YoloPostError::BufferSizeMismatch {
                needed,
                got: input.len(),
            });
        }
        let tensor = engine
            .infer(input)
            .map_err(|err| YoloPostError::Inference {
                reason: err.to_string(),
            })?;
        self.detect_tensor(&tensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = DetectConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.attributes(), 14);
        assert_eq!(cfg.input_len(), 3 * 640 * 640);
    }

    #[test]
    fn rejects_out_of_range_iou() {
        let cfg = DetectConfig {
            iou_threshold: 1.5,
            ..DetectConfig::default()
        };
        assert_eq!(
            Detector::new(cfg).err(),
            Some(YoloPostError::InvalidConfig {
                reason: "iou_threshold must be in [0, 1]",
            })
        );
    }

    #[test]
    fn rejects_input_size_overflowing_buffer_len() {
        let cfg = DetectConfig {
            input_size: u32::MAX,
            ..DetectConfig::default()
        };
        assert_eq!(cfg.input_len(), usize::MAX);
        assert_eq!(
            cfg.validate(),
            Err(YoloPostError::InvalidConfig {
                reason: "input_size too large for the input buffer",
            })
        );
    }

    #[test]
    fn rejects_nan_threshold() {
        let cfg = DetectConfig {
            obj_conf_threshold: f32::NAN,
            ..DetectConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
