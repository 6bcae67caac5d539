use yolopost::{
    BBox, DetectConfig, Detector, LabelTable, RawTensor, TensorView, YoloPostError,
    UNKNOWN_LABEL,
};

#[test]
fn tensor_view_rejects_wrong_buffer_length() {
    let data = [0.0f32; 13];
    let err = TensorView::from_slice(&data, 7, 2).err().unwrap();
    assert_eq!(err, YoloPostError::BufferSizeMismatch { needed: 14, got: 13 });
}

#[test]
fn tensor_rejects_zero_attributes() {
    let err = RawTensor::new(Vec::new(), 0, 5).err().unwrap();
    assert_eq!(
        err,
        YoloPostError::InvalidDimensions {
            attributes: 0,
            candidates: 5,
        }
    );
}

#[test]
fn from_shape_accepts_plain_and_batched_shapes() {
    let plain = RawTensor::from_shape(vec![0.0; 14], &[7, 2]).unwrap();
    assert_eq!(plain.shape(), (7, 2));

    let batched = RawTensor::from_shape(vec![0.0; 14], &[1, 7, 2]).unwrap();
    assert_eq!(batched.shape(), (7, 2));
}

#[test]
fn from_shape_rejects_other_ranks_and_batches() {
    let err = RawTensor::from_shape(vec![0.0; 28], &[2, 7, 2]).err().unwrap();
    assert_eq!(
        err,
        YoloPostError::UnsupportedShape {
            shape: vec![2, 7, 2],
        }
    );

    let err = RawTensor::from_shape(vec![0.0; 14], &[14]).err().unwrap();
    assert_eq!(err, YoloPostError::UnsupportedShape { shape: vec![14] });
}

#[test]
fn candidate_major_export_is_transposed() {
    let candidate_major: Vec<f32> = (0..21).map(|v| v as f32).collect();
    let tensor = RawTensor::from_candidate_major(&candidate_major, 3, 7).unwrap();
    let view = tensor.view();
    assert_eq!(view.attribute(0).unwrap(), &[0.0, 7.0, 14.0]);
    assert_eq!(view.attribute(6).unwrap(), &[6.0, 13.0, 20.0]);
}

#[test]
fn detector_rejects_invalid_configs() {
    let cases = [
        (
            DetectConfig {
                input_size: 0,
                ..DetectConfig::default()
            },
            "input_size must be positive",
        ),
        (
            DetectConfig {
                num_classes: 0,
                ..DetectConfig::default()
            },
            "num_classes must be positive",
        ),
        (
            DetectConfig {
                min_box_side: -1.0,
                ..DetectConfig::default()
            },
            "min_box_side must be finite and non-negative",
        ),
        (
            DetectConfig {
                iou_threshold: -0.1,
                ..DetectConfig::default()
            },
            "iou_threshold must be in [0, 1]",
        ),
    ];
    for (cfg, reason) in cases {
        assert_eq!(
            Detector::new(cfg).err(),
            Some(YoloPostError::InvalidConfig { reason })
        );
    }
}

#[test]
fn iou_properties() {
    let a = BBox::new(10.0, 10.0, 60.0, 40.0);
    let b = BBox::new(30.0, 20.0, 90.0, 80.0);
    let far = BBox::new(200.0, 200.0, 250.0, 260.0);

    assert_eq!(a.iou(&a), 1.0);
    assert_eq!(a.iou(&far), 0.0);
    assert_eq!(a.iou(&b), b.iou(&a));
    let v = a.iou(&b);
    assert!(v > 0.0 && v < 1.0);
}

#[test]
fn label_table_falls_back_for_unknown_indices() {
    let labels = LabelTable::from_lines("helmet\nvest\n");
    assert_eq!(labels.label(0), "helmet");
    assert_eq!(labels.label(1), "vest");
    assert_eq!(labels.label(9), UNKNOWN_LABEL);
}
