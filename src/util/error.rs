//! Error types for yolopost.

use thiserror::Error;

/// Result alias for yolopost operations.
pub type Result<T> = std::result::Result<T, YoloPostError>;

/// Errors that can occur while post-processing detector output.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum YoloPostError {
    /// The tensor attribute count does not match `5 + num_classes`.
    #[error("shape mismatch: expected {expected} attributes, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    /// The flat buffer length is inconsistent with the declared shape.
    #[error("buffer size mismatch: needed {needed} values, got {got}")]
    BufferSizeMismatch { needed: usize, got: usize },
    /// The tensor has no attribute rows.
    #[error("invalid dimensions: {attributes} attributes x {candidates} candidates")]
    InvalidDimensions { attributes: usize, candidates: usize },
    /// The reported tensor shape cannot be mapped to `(A, N)`.
    #[error("unsupported tensor shape {shape:?}")]
    UnsupportedShape { shape: Vec<usize> },
    /// A detector configuration field is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
    /// The inference engine failed to produce an output tensor.
    #[error("inference failed: {reason}")]
    Inference { reason: String },
    /// Reading or writing a raw tensor dump failed.
    #[error("tensor io error: {reason}")]
    TensorIo { reason: String },
    /// Reading a label file failed.
    #[error("label io error: {reason}")]
    LabelIo { reason: String },
    /// Loading or decoding an input image failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
