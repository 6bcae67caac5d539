//! Raw little-endian `f32` tensor dumps.
//!
//! The format is the bare buffer with no header, as written by most runtimes
//! when an output tensor is saved for offline inspection. The attribute count
//! comes from the caller; the candidate count is inferred from the length.

use crate::tensor::RawTensor;
use crate::util::{YoloPostError, YoloPostResult};
use std::fs;
use std::path::Path;

const F32_BYTES: usize = std::mem::size_of::<f32>();

/// Parses an attribute-major tensor from little-endian bytes.
pub fn tensor_from_f32le(bytes: &[u8], attributes: usize) -> YoloPostResult<RawTensor> {
    if bytes.len() % F32_BYTES != 0 {
        return Err(YoloPostError::TensorIo {
            reason: format!("byte length {} is not a multiple of 4", bytes.len()),
        });
    }
    if attributes == 0 {
        return Err(YoloPostError::InvalidDimensions {
            attributes,
            candidates: 0,
        });
    }
    let values: Vec<f32> = bytes
        .chunks_exact(F32_BYTES)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    if values.len() % attributes != 0 {
        return Err(YoloPostError::TensorIo {
            reason: format!(
                "{} values cannot be split into {} attribute rows",
                values.len(),
                attributes
            ),
        });
    }
    let candidates = values.len() / attributes;
    RawTensor::new(values, attributes, candidates)
}

/// Loads an attribute-major tensor dump from disk.
pub fn load_tensor_f32le<P: AsRef<Path>>(path: P, attributes: usize) -> YoloPostResult<RawTensor> {
    let bytes = fs::read(path.as_ref()).map_err(|err| YoloPostError::TensorIo {
        reason: format!("{}: {err}", path.as_ref().display()),
    })?;
    tensor_from_f32le(&bytes, attributes)
}

/// Writes a tensor as a raw little-endian dump.
pub fn write_tensor_f32le<P: AsRef<Path>>(path: P, tensor: &RawTensor) -> YoloPostResult<()> {
    let mut bytes = Vec::with_capacity(tensor.data().len() * F32_BYTES);
    for value in tensor.data() {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    fs::write(path.as_ref(), bytes).map_err(|err| YoloPostError::TensorIo {
        reason: format!("{}: {err}", path.as_ref().display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_truncated_values() {
        let err = tensor_from_f32le(&[0u8; 6], 6).unwrap_err();
        assert!(matches!(err, YoloPostError::TensorIo { .. }));
    }

    #[test]
    fn rejects_partial_attribute_rows() {
        let bytes: Vec<u8> = [1.0f32; 7].iter().flat_map(|v| v.to_le_bytes()).collect();
        let err = tensor_from_f32le(&bytes, 6).unwrap_err();
        assert!(matches!(err, YoloPostError::TensorIo { .. }));
    }

    #[test]
    fn infers_candidate_count() {
        let bytes: Vec<u8> = (0..12)
            .flat_map(|v| (v as f32).to_le_bytes())
            .collect();
        let tensor = tensor_from_f32le(&bytes, 6).unwrap();
        assert_eq!(tensor.shape(), (6, 2));
        assert_eq!(tensor.view().get(5, 1), Some(11.0));
    }
}
