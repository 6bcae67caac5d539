use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yolopost::{iou, suppress, suppress_per_class, BBox, Detection};

fn det(class_index: usize, score: f32, bbox: BBox) -> Detection {
    Detection::new(class_index, score, bbox)
}

fn random_detections(rng: &mut StdRng, count: usize) -> Vec<Detection> {
    (0..count)
        .map(|_| {
            let cx = rng.random_range(0.0..640.0f32);
            let cy = rng.random_range(0.0..640.0f32);
            let w = rng.random_range(30.0..200.0f32);
            let h = rng.random_range(30.0..200.0f32);
            // Coarse scores so ties actually occur.
            let score = rng.random_range(66..100) as f32 / 100.0;
            let class_index = rng.random_range(0..4);
            det(
                class_index,
                score,
                BBox::from_center_size(cx, cy, w, h).clamped(640.0),
            )
        })
        .collect()
}

#[test]
fn overlapping_lower_score_is_removed() {
    let high = det(2, 0.9, BBox::new(100.0, 100.0, 200.0, 200.0));
    let low = det(2, 0.8, BBox::new(110.0, 105.0, 210.0, 205.0));
    assert!(iou(&high.bbox, &low.bbox) > 0.5);

    let kept = suppress(vec![low, high], 0.5);
    assert_eq!(kept, vec![high]);
}

#[test]
fn equal_scores_without_overlap_keep_input_order() {
    let first = det(1, 0.7, BBox::new(0.0, 0.0, 50.0, 50.0));
    let second = det(0, 0.7, BBox::new(300.0, 300.0, 350.0, 350.0));
    assert_eq!(suppress(vec![first, second], 0.5), vec![first, second]);
    assert_eq!(suppress(vec![second, first], 0.5), vec![second, first]);
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(suppress(Vec::new(), 0.6).is_empty());
    assert!(suppress_per_class(Vec::new(), 0.6).is_empty());
}

#[test]
fn different_classes_suppress_each_other() {
    let person = det(0, 0.9, BBox::new(100.0, 100.0, 200.0, 200.0));
    let helmet = det(5, 0.85, BBox::new(100.0, 100.0, 200.0, 190.0));
    assert_eq!(suppress(vec![person, helmet], 0.6), vec![person]);
    assert_eq!(
        suppress_per_class(vec![person, helmet], 0.6),
        vec![person, helmet]
    );
}

#[test]
fn output_is_score_descending_and_pairwise_below_threshold() {
    let mut rng = StdRng::seed_from_u64(7);
    for &threshold in &[0.3f32, 0.5, 0.7] {
        let kept = suppress(random_detections(&mut rng, 200), threshold);
        assert!(!kept.is_empty());
        for pair in kept.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for (i, a) in kept.iter().enumerate() {
            for b in &kept[i + 1..] {
                assert!(iou(&a.bbox, &b.bbox) <= threshold);
            }
        }
    }
}

#[test]
fn suppression_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10 {
        let once = suppress(random_detections(&mut rng, 120), 0.6);
        let twice = suppress(once.clone(), 0.6);
        assert_eq!(once, twice);
    }
}

#[test]
fn every_removed_box_overlaps_a_kept_box() {
    let mut rng = StdRng::seed_from_u64(1234);
    let input = random_detections(&mut rng, 150);
    let kept = suppress(input.clone(), 0.5);
    for candidate in &input {
        if kept.contains(candidate) {
            continue;
        }
        assert!(kept
            .iter()
            .any(|k| k.score >= candidate.score && iou(&k.bbox, &candidate.bbox) > 0.5));
    }
}
