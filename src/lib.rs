//! yolopost turns raw YOLO-style detector output into final detections.
//!
//! The pipeline has two stages. The decoder reads an attribute-major
//! `(5 + C, N)` tensor, rejects weak or tiny candidates and converts boxes to
//! clamped corners. Greedy class-agnostic non-maximum suppression then removes
//! overlapping boxes and returns detections ordered by score.
//!
//! Optional features: `rayon` (parallel decode), `simd` (vectorized
//! objectness filter), `image-io` (input preprocessing) and `tracing`.

pub mod bbox;
mod candidate;
pub mod decode;
pub mod detect;
pub mod lowlevel;
pub mod present;
#[cfg(feature = "image-io")]
pub mod preprocess;
pub mod tensor;
mod trace;
pub mod util;

pub use bbox::{iou, BBox};
pub use candidate::nms::{suppress, suppress_per_class};
pub use candidate::{Candidate, Detection};
pub use decode::decode;
pub use detect::{DetectConfig, Detector, InferenceEngine};
pub use present::{caption, DisplayScale, LabelTable, UNKNOWN_LABEL};
pub use tensor::io::{load_tensor_f32le, tensor_from_f32le, write_tensor_f32le};
pub use tensor::{RawTensor, TensorView};
pub use util::{YoloPostError, YoloPostResult};
