//! Slide geometry in EMU (English Metric Units).

/// EMU per inch.
pub const EMU_PER_INCH: u64 = 914_400;

/// Widescreen 16:9 slide, 16in wide.
pub const SLIDE_WIDTH: u64 = 16 * EMU_PER_INCH;

/// Widescreen 16:9 slide, 9in tall.
pub const SLIDE_HEIGHT: u64 = 9 * EMU_PER_INCH;

/// Total inset taken off each axis of the caption box (2in per side horizontally).
const CAPTION_INSET: u64 = 4 * EMU_PER_INCH;

/// Caption font size in hundredths of a point (48pt).
pub const CAPTION_FONT_SIZE: u32 = 4800;

/// Notes page size used by PowerPoint's default portrait notes.
pub const NOTES_WIDTH: u64 = 6_858_000;
pub const NOTES_HEIGHT: u64 = 9_144_000;

/// Position and extent of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u64,
    pub y: u64,
    pub cx: u64,
    pub cy: u64,
}

impl Rect {
    /// The whole slide canvas.
    pub fn full_slide() -> Self {
        Self {
            x: 0,
            y: 0,
            cx: SLIDE_WIDTH,
            cy: SLIDE_HEIGHT,
        }
    }

    /// Caption text box: 2in in from the left and right edges, vertically
    /// centered on the slide.
    pub fn caption_box() -> Self {
        Self {
            x: CAPTION_INSET / 2,
            y: (SLIDE_HEIGHT - CAPTION_INSET) / 2,
            cx: SLIDE_WIDTH - CAPTION_INSET,
            cy: SLIDE_HEIGHT - CAPTION_INSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_is_sixteen_by_nine() {
        assert_eq!(SLIDE_WIDTH * 9, SLIDE_HEIGHT * 16);
        assert_eq!(SLIDE_WIDTH, 14_630_400);
        assert_eq!(SLIDE_HEIGHT, 8_229_600);
    }

    #[test]
    fn test_caption_box_is_centered() {
        let caption = Rect::caption_box();
        assert_eq!(caption.x, 2 * EMU_PER_INCH);
        assert_eq!(caption.x * 2 + caption.cx, SLIDE_WIDTH);
        assert_eq!(caption.y, 5 * EMU_PER_INCH / 2);
        assert!(caption.y + caption.cy <= SLIDE_HEIGHT);
    }
}
