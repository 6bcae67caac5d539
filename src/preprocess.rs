//! Image preprocessing via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Produces the planar
//! `3 x size x size` buffer, scaled to `[0, 1]`, that detector runtimes take
//! as input.

use crate::util::{YoloPostError, YoloPostResult};
use image::imageops::FilterType;
use image::RgbImage;
use std::path::Path;

/// Plane order of the produced buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Resizes `img` to `input_size x input_size` and writes planar normalized values.
pub fn planar_from_rgb(img: &RgbImage, input_size: u32, order: ChannelOrder) -> Vec<f32> {
    let resized = if img.width() == input_size && img.height() == input_size {
        img.clone()
    } else {
        image::imageops::resize(img, input_size, input_size, FilterType::Triangle)
    };

    let plane = (input_size as usize) * (input_size as usize);
    let mut out = vec![0.0f32; 3 * plane];
    let (first, last) = match order {
        ChannelOrder::Rgb => (0, 2),
        ChannelOrder::Bgr => (2, 0),
    };
    for (idx, pixel) in resized.pixels().enumerate() {
        let [r, g, b] = pixel.0;
        out[first * plane + idx] = r as f32 / 255.0;
        out[plane + idx] = g as f32 / 255.0;
        out[last * plane + idx] = b as f32 / 255.0;
    }
    out
}

/// Opens an image file and converts it into a detector input buffer.
pub fn load_input<P: AsRef<Path>>(
    path: P,
    input_size: u32,
    order: ChannelOrder,
) -> YoloPostResult<Vec<f32>> {
    if input_size == 0 {
        return Err(YoloPostError::InvalidConfig {
            reason: "input_size must be positive",
        });
    }
    let img = image::open(path).map_err(|err| YoloPostError::ImageIo {
        reason: err.to_string(),
    })?;
    Ok(planar_from_rgb(&img.to_rgb8(), input_size, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn planes_follow_channel_order() {
        let img = RgbImage::from_pixel(2, 2, Rgb([255, 0, 51]));
        let rgb = planar_from_rgb(&img, 2, ChannelOrder::Rgb);
        assert_eq!(rgb.len(), 12);
        assert_eq!(&rgb[0..4], &[1.0; 4]);
        assert_eq!(&rgb[4..8], &[0.0; 4]);
        assert!((rgb[8] - 0.2).abs() < 1e-6);

        let bgr = planar_from_rgb(&img, 2, ChannelOrder::Bgr);
        assert!((bgr[0] - 0.2).abs() < 1e-6);
        assert_eq!(&bgr[8..12], &[1.0; 4]);
    }

    #[test]
    fn resizes_to_input_size() {
        let img = RgbImage::from_pixel(7, 3, Rgb([10, 20, 30]));
        let out = planar_from_rgb(&img, 4, ChannelOrder::Rgb);
        assert_eq!(out.len(), 3 * 16);
    }
}
