//! Numeric helpers shared by the decode backends.

/// Returns the index and value of the largest element.
///
/// The first occurrence wins ties, and NaN values never win. Returns `None`
/// when the input is empty or contains only NaN.
pub(crate) fn argmax_first<I>(values: I) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = f32>,
{
    let mut best: Option<(usize, f32)> = None;
    for (idx, value) in values.into_iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((idx, value)),
        }
    }
    best
}

/// Clamps a coordinate to `[0, extent]`, passing NaN through unchanged.
#[inline]
pub(crate) fn clamp_coord(value: f32, extent: f32) -> f32 {
    value.clamp(0.0, extent)
}

#[cfg(test)]
mod tests {
    use super::{argmax_first, clamp_coord};

    #[test]
    fn argmax_prefers_first_of_equal_values() {
        assert_eq!(argmax_first([0.2, 0.7, 0.7, 0.1]), Some((1, 0.7)));
    }

    #[test]
    fn argmax_skips_nan() {
        assert_eq!(argmax_first([f32::NAN, 0.3, f32::NAN]), Some((1, 0.3)));
        assert_eq!(argmax_first([f32::NAN]), None);
        assert_eq!(argmax_first(std::iter::empty()), None);
    }

    #[test]
    fn argmax_accepts_negative_scores() {
        assert_eq!(argmax_first([-3.0, -1.0, -2.0]), Some((1, -1.0)));
    }

    #[test]
    fn clamp_coord_limits_to_extent() {
        assert_eq!(clamp_coord(-5.0, 640.0), 0.0);
        assert_eq!(clamp_coord(700.0, 640.0), 640.0);
        assert_eq!(clamp_coord(12.5, 640.0), 12.5);
        assert!(clamp_coord(f32::NAN, 640.0).is_nan());
    }
}
