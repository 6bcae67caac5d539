//! Presentation-side helpers: label lookup and display scaling.
//!
//! Nothing in the decode or suppression path depends on this module. Overlay
//! and export code inject a [`LabelTable`] and a [`DisplayScale`] where they
//! need them.

use crate::bbox::BBox;
use crate::candidate::Detection;
use crate::util::{YoloPostError, YoloPostResult};
use std::fs;
use std::path::Path;

/// Label returned for class indices outside the table.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Read-only class-name table indexed by class index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Creates a table from an ordered list of names.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses one label per line; line `i` is the label of class `i`.
    ///
    /// Trailing whitespace (including `\r`) is trimmed. Blank lines keep
    /// their slot so later labels do not shift.
    pub fn from_lines(text: &str) -> Self {
        Self::new(text.lines().map(str::trim_end))
    }

    /// Loads a `labels.txt`-style file.
    pub fn load<P: AsRef<Path>>(path: P) -> YoloPostResult<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(|err| YoloPostError::LabelIo {
            reason: format!("{}: {err}", path.as_ref().display()),
        })?;
        Ok(Self::from_lines(&text))
    }

    /// Returns the label for `index`, or [`UNKNOWN_LABEL`] when out of range.
    pub fn label(&self, index: usize) -> &str {
        self.labels
            .get(index)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Maps boxes from the square model input to a destination image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayScale {
    /// Horizontal factor, `display_width / input_size`.
    pub sx: f32,
    /// Vertical factor, `display_height / input_size`.
    pub sy: f32,
}

impl DisplayScale {
    /// Computes independent X/Y factors for a `display_width x display_height` target.
    pub fn new(input_size: u32, display_width: u32, display_height: u32) -> YoloPostResult<Self> {
        if input_size == 0 {
            return Err(YoloPostError::InvalidConfig {
                reason: "input_size must be positive",
            });
        }
        let side = input_size as f32;
        Ok(Self {
            sx: display_width as f32 / side,
            sy: display_height as f32 / side,
        })
    }

    /// Scales a model-space box into display space.
    pub fn scale_box(&self, bbox: &BBox) -> BBox {
        bbox.scaled(self.sx, self.sy)
    }
}

/// Overlay caption such as `"helmet 0.87"`.
pub fn caption(detection: &Detection, labels: &LabelTable) -> String {
    format!(
        "{} {:.2}",
        labels.label(detection.class_index),
        detection.score
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lines_trims_line_endings() {
        let table = LabelTable::from_lines("cat \r\ndog\r\nbird\n");
        assert_eq!(table.len(), 3);
        assert_eq!(table.label(0), "cat");
        assert_eq!(table.label(1), "dog");
        assert_eq!(table.label(2), "bird");
    }

    #[test]
    fn blank_line_keeps_class_positions() {
        let table = LabelTable::from_lines("person\n\nhelmet\n");
        assert_eq!(table.len(), 3);
        assert_eq!(table.label(0), "person");
        assert_eq!(table.label(1), "");
        assert_eq!(table.label(2), "helmet");
        assert_eq!(table.label(3), UNKNOWN_LABEL);
    }

    #[test]
    fn out_of_range_label_falls_back() {
        let table = LabelTable::new(["cat"]);
        assert_eq!(table.label(1), UNKNOWN_LABEL);
        assert_eq!(LabelTable::default().label(0), UNKNOWN_LABEL);
    }

    #[test]
    fn caption_uses_two_decimals() {
        let table = LabelTable::new(["cat"]);
        let det = Detection::new(0, 0.876, BBox::default());
        assert_eq!(caption(&det, &table), "cat 0.88");
    }

    #[test]
    fn scale_uses_independent_axes() {
        let scale = DisplayScale::new(640, 1280, 320).unwrap();
        let b = scale.scale_box(&BBox::new(100.0, 100.0, 200.0, 300.0));
        assert_eq!(b.to_ltrb(), [200.0, 50.0, 400.0, 150.0]);
    }
}
