//! Python bindings for the yolopost post-processing library.
//!
//! This module exposes the detector pipeline to Python via PyO3.

use numpy::{PyReadonlyArrayDyn, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use yolopost::{
    BBox, DetectConfig as RustDetectConfig, Detection as RustDetection,
    Detector as RustDetector, TensorView, YoloPostError,
};

/// Convert a YoloPostError to a Python exception.
fn to_py_err(err: YoloPostError) -> PyErr {
    match err {
        YoloPostError::Inference { .. }
        | YoloPostError::TensorIo { .. }
        | YoloPostError::LabelIo { .. }
        | YoloPostError::ImageIo { .. } => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

type Ltrb = (f32, f32, f32, f32);

fn bbox_from_ltrb((left, top, right, bottom): Ltrb) -> BBox {
    BBox::new(left, top, right, bottom)
}

/// Final detection in model input pixel space.
#[pyclass]
#[derive(Clone)]
pub struct Detection {
    /// Index of the winning class.
    #[pyo3(get)]
    pub class_index: usize,
    /// Objectness times best class score.
    #[pyo3(get)]
    pub score: f32,
    #[pyo3(get)]
    pub left: f32,
    #[pyo3(get)]
    pub top: f32,
    #[pyo3(get)]
    pub right: f32,
    #[pyo3(get)]
    pub bottom: f32,
}

#[pymethods]
impl Detection {
    #[new]
    fn new(class_index: usize, score: f32, bbox: Ltrb) -> Self {
        RustDetection::new(class_index, score, bbox_from_ltrb(bbox)).into()
    }

    /// Box edges as `(left, top, right, bottom)`.
    #[getter]
    fn bbox(&self) -> Ltrb {
        (self.left, self.top, self.right, self.bottom)
    }

    fn __repr__(&self) -> String {
        format!(
            "Detection(class_index={}, score={:.4}, bbox=({:.1}, {:.1}, {:.1}, {:.1}))",
            self.class_index, self.score, self.left, self.top, self.right, self.bottom
        )
    }
}

impl From<RustDetection> for Detection {
    fn from(d: RustDetection) -> Self {
        Self {
            class_index: d.class_index,
            score: d.score,
            left: d.bbox.left,
            top: d.bbox.top,
            right: d.bbox.right,
            bottom: d.bbox.bottom,
        }
    }
}

impl From<&Detection> for RustDetection {
    fn from(d: &Detection) -> Self {
        RustDetection::new(
            d.class_index,
            d.score,
            BBox::new(d.left, d.top, d.right, d.bottom),
        )
    }
}

/// Thresholds and geometry for decoding and suppression.
#[pyclass]
#[derive(Clone)]
pub struct DetectConfig {
    inner: RustDetectConfig,
}

#[pymethods]
impl DetectConfig {
    /// Create a new DetectConfig.
    ///
    /// Args:
    ///     input_size: Square model input side in pixels (default: 640)
    ///     num_classes: Number of class-score rows (default: 9)
    ///     obj_conf_threshold: Objectness must exceed this (default: 0.6)
    ///     final_score_threshold: Objectness x class score must exceed this (default: 0.65)
    ///     min_box_side: Minimum box width and height (default: 30.0)
    ///     iou_threshold: Suppression IoU threshold (default: 0.6)
    ///     parallel: Decode on the rayon pool (default: False)
    #[new]
    #[pyo3(signature = (
        input_size = 640,
        num_classes = 9,
        obj_conf_threshold = 0.6,
        final_score_threshold = 0.65,
        min_box_side = 30.0,
        iou_threshold = 0.6,
        parallel = false
    ))]
    fn new(
        input_size: u32,
        num_classes: usize,
        obj_conf_threshold: f32,
        final_score_threshold: f32,
        min_box_side: f32,
        iou_threshold: f32,
        parallel: bool,
    ) -> PyResult<Self> {
        let inner = RustDetectConfig {
            input_size,
            num_classes,
            obj_conf_threshold,
            final_score_threshold,
            min_box_side,
            iou_threshold,
            parallel,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Validate the configuration.
    fn validate(&self) -> PyResult<()> {
        self.inner.validate().map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!(
            "DetectConfig(input_size={}, num_classes={}, obj_conf_threshold={}, final_score_threshold={}, min_box_side={}, iou_threshold={}, parallel={})",
            self.inner.input_size,
            self.inner.num_classes,
            self.inner.obj_conf_threshold,
            self.inner.final_score_threshold,
            self.inner.min_box_side,
            self.inner.iou_threshold,
            self.inner.parallel
        )
    }
}

/// Decode and suppress raw detector output.
#[pyclass]
pub struct Detector {
    inner: RustDetector,
}

#[pymethods]
impl Detector {
    /// Create a detector.
    ///
    /// Args:
    ///     config: DetectConfig (default: DetectConfig())
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<DetectConfig>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        let inner = RustDetector::new(cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Run decode and suppression on a raw output tensor.
    ///
    /// Args:
    ///     tensor: float32 numpy array shaped (5 + C, N) or (1, 5 + C, N)
    ///
    /// Returns:
    ///     List of Detection objects, sorted by score (best first)
    fn detect(&self, tensor: PyReadonlyArrayDyn<'_, f32>) -> PyResult<Vec<Detection>> {
        let (attributes, candidates) = match *tensor.shape() {
            [attributes, candidates] | [1, attributes, candidates] => (attributes, candidates),
            ref shape => {
                return Err(PyValueError::new_err(format!(
                    "tensor must be shaped (A, N) or (1, A, N), got {shape:?}"
                )))
            }
        };
        let data = tensor.as_slice()?;
        let view = TensorView::from_slice(data, attributes, candidates).map_err(to_py_err)?;
        let detections = self.inner.detect(view).map_err(to_py_err)?;
        Ok(detections.into_iter().map(Detection::from).collect())
    }

    fn __repr__(&self) -> String {
        format!(
            "Detector(input_size={}, num_classes={})",
            self.inner.config().input_size,
            self.inner.config().num_classes
        )
    }
}

/// Intersection-over-union of two `(left, top, right, bottom)` boxes.
#[pyfunction]
fn iou(a: Ltrb, b: Ltrb) -> f32 {
    yolopost::iou(&bbox_from_ltrb(a), &bbox_from_ltrb(b))
}

/// Greedy class-agnostic non-maximum suppression.
///
/// Args:
///     detections: list of Detection
///     iou_threshold: boxes overlapping a kept box above this are removed
///     per_class: only suppress boxes of the same class (default: False)
#[pyfunction]
#[pyo3(signature = (detections, iou_threshold, per_class = false))]
fn suppress(detections: Vec<Detection>, iou_threshold: f32, per_class: bool) -> Vec<Detection> {
    let candidates: Vec<RustDetection> = detections.iter().map(RustDetection::from).collect();
    let kept = if per_class {
        yolopost::suppress_per_class(candidates, iou_threshold)
    } else {
        yolopost::suppress(candidates, iou_threshold)
    };
    kept.into_iter().map(Detection::from).collect()
}

/// Python module for yolopost.
#[pymodule]
fn _yolopost(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Detection>()?;
    m.add_class::<DetectConfig>()?;
    m.add_class::<Detector>()?;
    m.add_function(wrap_pyfunction!(iou, m)?)?;
    m.add_function(wrap_pyfunction!(suppress, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
