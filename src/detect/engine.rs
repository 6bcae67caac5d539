//! Seam to the model runtime.

use crate::tensor::RawTensor;

/// Model runtime that turns a preprocessed image into a raw output tensor.
///
/// Implement this for whatever executes the network (ONNX Runtime, Tract,
/// an NPU SDK). Shape checks on the returned tensor happen in the decoder,
/// so implementations only need to report the shape the runtime gives them,
/// e.g. via [`RawTensor::from_shape`].
///
/// ```ignore
/// struct OrtEngine { session: ort::Session }
///
/// impl InferenceEngine for OrtEngine {
///     type Error = ort::Error;
///
///     fn infer(&mut self, input: &[f32]) -> Result<RawTensor, Self::Error> {
///         // run the session and copy the first output
///         todo!()
///     }
/// }
/// ```
pub trait InferenceEngine {
    /// Error reported by the runtime.
    type Error: std::fmt::Display;

    /// Runs the model on a planar `3 x input_size x input_size` buffer.
    fn infer(&mut self, input: &[f32]) -> Result<RawTensor, Self::Error>;
}
