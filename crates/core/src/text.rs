//! Text measurement, truncation and horizontal placement inside a block.

use crate::layout::Alignment;
use unicode_width::UnicodeWidthStr;

/// Appended to text that had to be cut to fit its block.
pub const ELLIPSIS: &str = "...";

/// Rendered width of a string in pixels for the bar's font face.
pub trait TextMeasure: Send + Sync {
    fn measure(&self, text: &str) -> i32;
}

/// Measurement for a monospace face: terminal cell width times a fixed advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMeasure {
    pub advance: i32,
}

impl MonospaceMeasure {
    pub fn new(advance: i32) -> Self {
        Self { advance }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str) -> i32 {
        let cells = i32::try_from(text.width()).unwrap_or(i32::MAX);
        cells.saturating_mul(self.advance)
    }
}

/// Clip `text` so that its measured width is strictly below `quota`.
///
/// Text that already fits is returned unchanged. Otherwise trailing characters
/// are dropped one at a time, the ellipsis appended, and the first candidate
/// that fits wins. Returns an empty string when not even the bare ellipsis fits.
pub fn truncate(measure: &dyn TextMeasure, text: &str, quota: i32) -> String {
    if measure.measure(text) < quota {
        return text.to_string();
    }

    let mut cut = text.len();
    while let Some((idx, _)) = text[..cut].char_indices().next_back() {
        cut = idx;
        let candidate = format!("{}{ELLIPSIS}", &text[..cut]);
        if measure.measure(&candidate) < quota {
            return candidate;
        }
    }

    String::new()
}

/// X coordinate of a text run of width `tw` inside a block placed at `xoff`.
pub fn text_x(align: Alignment, xoff: i32, width: i32, pad: i32, tw: i32) -> i32 {
    match align {
        Alignment::Left => xoff + pad,
        Alignment::Center => xoff + (width / 2 - tw / 2),
        Alignment::Right => xoff + width - tw,
    }
}
