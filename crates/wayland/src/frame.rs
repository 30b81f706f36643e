//! Bridge between the redraw scheduler and the iced window.
//!
//! The scheduler paints into a [`Scene`]; every flush publishes a snapshot on
//! a `watch` channel, and the window draws the latest snapshot on a canvas.

use bar_core::{Color, DrawOp, Rect, Result, Scene, Surface};
use iced::widget::canvas;
use iced::{mouse, Font, Pixels, Point, Rectangle, Renderer, Size, Theme};
use std::sync::Arc;
use tokio::sync::watch;

/// The scheduler's surface: a retained scene published on every flush.
pub struct FrameSurface {
    scene: Scene,
    frames: watch::Sender<Arc<Scene>>,
}

impl FrameSurface {
    /// A blank scene and the receiver that observes its flushes.
    pub fn new(width: i32, height: i32, background: Color) -> (Self, watch::Receiver<Arc<Scene>>) {
        let scene = Scene::new(width, height, background);
        let (frames, rx) = watch::channel(Arc::new(scene.clone()));
        (Self { scene, frames }, rx)
    }
}

impl Surface for FrameSurface {
    fn fill(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.scene.fill(rect, color)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) -> Result<()> {
        self.scene.draw_text(x, y, text, color)
    }

    fn flush(&mut self) -> Result<()> {
        // Nobody watching only means the window is gone.
        self.frames.send_replace(Arc::new(self.scene.clone()));
        Ok(())
    }
}

pub fn to_iced(color: Color) -> iced::Color {
    iced::Color::from_rgb8(color.r, color.g, color.b)
}

/// Canvas program that replays a scene.
#[derive(Debug, Clone)]
pub struct SceneView {
    pub scene: Arc<Scene>,
    pub font_size: f32,
}

impl<Message> canvas::Program<Message> for SceneView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        for op in &self.scene.ops {
            match op {
                DrawOp::Fill { rect, color } => frame.fill_rectangle(
                    Point::new(rect.x as f32, rect.y as f32),
                    Size::new(rect.width as f32, rect.height as f32),
                    to_iced(*color),
                ),
                DrawOp::Text { x, y, text, color } => frame.fill_text(canvas::Text {
                    content: text.clone(),
                    position: Point::new(*x as f32, *y as f32),
                    color: to_iced(*color),
                    size: Pixels(self.font_size),
                    font: Font::MONOSPACE,
                    ..canvas::Text::default()
                }),
            }
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_publishes_snapshot() {
        let (mut surface, mut rx) = FrameSurface::new(200, 26, Color::DEFAULT_BG);
        assert!(!rx.has_changed().unwrap());

        surface
            .fill(Rect::new(0, 0, 50, 26), Color::rgb(0x53, 0x94, 0xc9))
            .unwrap();
        surface.draw_text(10, 4, "1", Color::DEFAULT_FG).unwrap();
        // Nothing is visible until the flush.
        assert!(!rx.has_changed().unwrap());

        surface.flush().unwrap();
        assert!(rx.has_changed().unwrap());
        let scene = rx.borrow_and_update().clone();
        assert_eq!(scene.texts(), vec![(10, "1")]);
        assert_eq!(scene.color_at(5, 5), Some(Color::rgb(0x53, 0x94, 0xc9)));
        assert_eq!(scene.color_at(100, 5), Some(Color::DEFAULT_BG));
    }

    #[test]
    fn colour_conversion() {
        let c = to_iced(Color::rgb(255, 0, 0));
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 0.0, 0.0, 1.0));
    }
}
