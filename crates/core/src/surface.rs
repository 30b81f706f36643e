//! Drawing contract between the core and the display, plus a retained
//! display-list implementation of it.

use crate::color::Color;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }
}

/// What the scheduler paints onto.
pub trait Surface: Send {
    /// Fill `rect` with a solid colour, covering whatever was there.
    fn fill(&mut self, rect: Rect, color: Color) -> Result<()>;

    /// Draw a text run with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) -> Result<()>;

    /// Push the composed buffer to the visible window.
    fn flush(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Fill { rect: Rect, color: Color },
    Text { x: i32, y: i32, text: String, color: Color },
}

/// Retained list of draw operations covering the whole bar.
///
/// Filling a rectangle drops every earlier operation anchored inside it, so
/// repainting a block replaces its previous frame instead of stacking on it.
/// A fill spanning the full bar height owns its columns outright: text
/// anchored there is dropped whatever its `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub width: i32,
    pub height: i32,
    pub ops: Vec<DrawOp>,
}

impl Scene {
    pub fn new(width: i32, height: i32, background: Color) -> Self {
        Self {
            width,
            height,
            ops: vec![DrawOp::Fill {
                rect: Rect::new(0, 0, width, height),
                color: background,
            }],
        }
    }

    /// Text runs currently in the scene, left to right.
    pub fn texts(&self) -> Vec<(i32, &str)> {
        let mut texts: Vec<(i32, &str)> = self
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, text, .. } => Some((*x, text.as_str())),
                DrawOp::Fill { .. } => None,
            })
            .collect();
        texts.sort_by_key(|(x, _)| *x);
        texts
    }

    /// Top-most fill colour covering `(x, y)`.
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::Fill { rect, color } if rect.contains_point(x, y) => Some(*color),
            _ => None,
        })
    }
}

impl Surface for Scene {
    fn fill(&mut self, rect: Rect, color: Color) -> Result<()> {
        let full_height = rect.y <= 0 && rect.bottom() >= self.height;
        self.ops.retain(|op| match op {
            DrawOp::Fill { rect: r, .. } => !rect.contains_rect(r),
            DrawOp::Text { x, .. } if full_height => *x < rect.x || *x >= rect.right(),
            DrawOp::Text { x, y, .. } => !rect.contains_point(*x, *y),
        });
        self.ops.push(DrawOp::Fill { rect, color });
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn fill_replaces_covered_ops() {
        let mut scene = Scene::new(100, 20, Color::DEFAULT_BG);
        scene.fill(Rect::new(10, 0, 30, 20), RED).unwrap();
        scene.draw_text(12, 2, "old", Color::DEFAULT_FG).unwrap();

        scene.fill(Rect::new(10, 0, 30, 20), BLUE).unwrap();
        scene.draw_text(12, 2, "new", Color::DEFAULT_FG).unwrap();

        assert_eq!(scene.texts(), vec![(12, "new")]);
        assert_eq!(scene.color_at(15, 5), Some(BLUE));
        assert_eq!(scene.color_at(50, 5), Some(Color::DEFAULT_BG));
        // Background fill, one block fill, one text.
        assert_eq!(scene.ops.len(), 3);
    }

    #[test]
    fn neighbours_survive_a_fill() {
        let mut scene = Scene::new(100, 20, Color::DEFAULT_BG);
        scene.fill(Rect::new(0, 0, 50, 20), RED).unwrap();
        scene.draw_text(60, 2, "right", Color::DEFAULT_FG).unwrap();
        scene.fill(Rect::new(0, 0, 50, 20), BLUE).unwrap();
        assert_eq!(scene.texts(), vec![(60, "right")]);
    }

    #[test]
    fn full_height_fill_clears_text_outside_the_bar() {
        let mut scene = Scene::new(100, 26, Color::DEFAULT_BG);
        for (y, text) in [(26, "below"), (-2, "above")] {
            scene.fill(Rect::new(0, 0, 50, 26), RED).unwrap();
            scene.draw_text(10, y, text, Color::DEFAULT_FG).unwrap();
        }
        assert_eq!(scene.texts(), vec![(10, "above")]);

        // A partial-height fill only covers what is anchored inside it.
        scene.fill(Rect::new(0, 0, 50, 10), BLUE).unwrap();
        assert_eq!(scene.texts(), vec![(10, "above")]);
    }
}
