//! Raw detector output tensors.
//!
//! Detector heads emit a flat `f32` buffer shaped `(A, N)` in attribute-major
//! order: attribute `a` of candidate `i` lives at offset `a * N + i`, so each
//! attribute is a contiguous row of length `N`. Rows 0..4 hold the box centre
//! and size, row 4 the objectness and rows `5..A` the per-class scores.
//!
//! `RawTensor` owns its buffer, `TensorView` borrows one. Both validate the
//! shape once at construction so the decoder can index rows without checks.

use crate::util::{YoloPostError, YoloPostResult};

pub mod io;

/// Number of leading attributes before the class scores (`cx, cy, w, h, obj`).
pub const BOX_ATTRIBUTES: usize = 5;

/// Attribute row of the box centre x coordinate.
pub const ATTR_CX: usize = 0;
/// Attribute row of the box centre y coordinate.
pub const ATTR_CY: usize = 1;
/// Attribute row of the box width.
pub const ATTR_W: usize = 2;
/// Attribute row of the box height.
pub const ATTR_H: usize = 3;
/// Attribute row of the objectness confidence.
pub const ATTR_OBJ: usize = 4;

/// Borrowed attribute-major tensor view.
#[derive(Copy, Clone, Debug)]
pub struct TensorView<'a> {
    data: &'a [f32],
    attributes: usize,
    candidates: usize,
}

impl<'a> TensorView<'a> {
    /// Creates a view over `attributes * candidates` values.
    pub fn from_slice(
        data: &'a [f32],
        attributes: usize,
        candidates: usize,
    ) -> YoloPostResult<Self> {
        let needed = required_len(attributes, candidates)?;
        if data.len() != needed {
            return Err(YoloPostError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            attributes,
            candidates,
        })
    }

    /// Returns the attribute count `A`.
    pub fn attributes(&self) -> usize {
        self.attributes
    }

    /// Returns the candidate slot count `N`.
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// Returns the number of class-score rows (`A - 5`), or 0 for short tensors.
    pub fn num_classes(&self) -> usize {
        self.attributes.saturating_sub(BOX_ATTRIBUTES)
    }

    /// Returns the backing slice.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Returns the contiguous row for attribute `attr`.
    pub fn attribute(&self, attr: usize) -> Option<&'a [f32]> {
        if attr >= self.attributes {
            return None;
        }
        let start = attr * self.candidates;
        self.data.get(start..start + self.candidates)
    }

    /// Returns the value of attribute `attr` for candidate `index`.
    pub fn get(&self, attr: usize, index: usize) -> Option<f32> {
        if attr >= self.attributes || index >= self.candidates {
            return None;
        }
        self.data.get(attr * self.candidates + index).copied()
    }

    /// Copies out every attribute of a single candidate.
    pub fn column(&self, index: usize) -> Option<Vec<f32>> {
        if index >= self.candidates {
            return None;
        }
        Some(
            (0..self.attributes)
                .map(|attr| self.data[attr * self.candidates + index])
                .collect(),
        )
    }
}

/// Owned attribute-major tensor.
#[derive(Clone, Debug, PartialEq)]
pub struct RawTensor {
    data: Vec<f32>,
    attributes: usize,
    candidates: usize,
}

impl RawTensor {
    /// Takes ownership of an attribute-major buffer shaped `(attributes, candidates)`.
    pub fn new(data: Vec<f32>, attributes: usize, candidates: usize) -> YoloPostResult<Self> {
        TensorView::from_slice(&data, attributes, candidates)?;
        Ok(Self {
            data,
            attributes,
            candidates,
        })
    }

    /// Builds a tensor from an engine-reported shape.
    ///
    /// Accepts `[A, N]` and the batched `[1, A, N]`; every other rank or a
    /// batch size other than one is rejected.
    pub fn from_shape(data: Vec<f32>, shape: &[usize]) -> YoloPostResult<Self> {
        match *shape {
            [attributes, candidates] | [1, attributes, candidates] => {
                Self::new(data, attributes, candidates)
            }
            _ => Err(YoloPostError::UnsupportedShape {
                shape: shape.to_vec(),
            }),
        }
    }

    /// Transposes a candidate-major `(N, A)` buffer into attribute-major order.
    pub fn from_candidate_major(
        data: &[f32],
        candidates: usize,
        attributes: usize,
    ) -> YoloPostResult<Self> {
        let needed = required_len(attributes, candidates)?;
        if data.len() != needed {
            return Err(YoloPostError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        let mut out = vec![0.0f32; needed];
        for (index, row) in data.chunks_exact(attributes).enumerate() {
            for (attr, &value) in row.iter().enumerate() {
                out[attr * candidates + index] = value;
            }
        }
        Ok(Self {
            data: out,
            attributes,
            candidates,
        })
    }

    /// Returns the attribute count `A`.
    pub fn attributes(&self) -> usize {
        self.attributes
    }

    /// Returns the candidate slot count `N`.
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// Returns the flat attribute-major buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the `(A, N)` shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.attributes, self.candidates)
    }

    /// Returns a borrowed view of the tensor.
    pub fn view(&self) -> TensorView<'_> {
        TensorView {
            data: &self.data,
            attributes: self.attributes,
            candidates: self.candidates,
        }
    }

    /// Consumes the tensor and returns its buffer.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}

fn required_len(attributes: usize, candidates: usize) -> YoloPostResult<usize> {
    if attributes == 0 {
        return Err(YoloPostError::InvalidDimensions {
            attributes,
            candidates,
        });
    }
    attributes
        .checked_mul(candidates)
        .ok_or(YoloPostError::InvalidDimensions {
            attributes,
            candidates,
        })
}
