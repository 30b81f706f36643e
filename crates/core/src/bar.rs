use crate::block::{Block, Content};
use crate::color::Color;
use crate::error::Result;
use crate::group::Group;
use crate::layout::{place, Placement};
use crate::surface::{Rect, Surface};
use crate::text::{text_x, truncate, TextMeasure};
use std::fmt;
use std::sync::Arc;

/// Display capabilities and defaults shared by painting and hit-testing.
/// Built once at startup and handed to the [`Bar`].
#[derive(Clone)]
pub struct Context {
    pub measure: Arc<dyn TextMeasure>,
    pub background: Color,
    pub foreground: Color,
    /// Top edge of every text run, in bar coordinates.
    pub text_y: i32,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("background", &self.background)
            .field("foreground", &self.foreground)
            .field("text_y", &self.text_y)
            .finish_non_exhaustive()
    }
}

/// Top-level owner of every group and block.
#[derive(Debug)]
pub struct Bar {
    width: i32,
    height: i32,
    ctx: Context,
    groups: Vec<Group>,
}

impl Bar {
    /// Compose the bar. Every block starts dirty so the first sweep paints it.
    pub fn new(width: i32, height: i32, ctx: Context, groups: Vec<Group>) -> Self {
        let bar = Self {
            width,
            height,
            ctx,
            groups,
        };
        for placement in bar.placements() {
            placement.block.mark_dirty();
        }
        bar
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn placements(&self) -> impl Iterator<Item = Placement<'_>> + '_ {
        place(self.width, &self.groups)
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.placements().map(|p| p.block).find(|b| b.id() == id)
    }

    /// The text actually drawn for `text` inside `block`.
    pub fn fit_text(&self, block: &Block, text: &str) -> String {
        let quota = block.width() - 2 * block.text_pad();
        truncate(self.ctx.measure.as_ref(), text, quota)
    }

    /// Paint one block from a content snapshot.
    pub fn paint(
        &self,
        surface: &mut dyn Surface,
        placement: Placement<'_>,
        content: &Content,
    ) -> Result<()> {
        let block = placement.block;
        let region = Rect::new(placement.x, 0, block.width(), self.height);

        surface.fill(region, content.bg.unwrap_or(self.ctx.background))?;
        if let Some(accent) = block.accent() {
            let strip = Rect::new(placement.x, 0, accent.width.min(block.width()), self.height);
            surface.fill(strip, accent.color)?;
        }

        let text = self.fit_text(block, &content.text);
        if text.is_empty() {
            return Ok(());
        }

        let tw = self.ctx.measure.measure(&text);
        let tx = text_x(
            block.text_align(),
            placement.x,
            block.width(),
            block.text_pad(),
            tw,
        );
        let fg = content.fg.unwrap_or(self.ctx.foreground);
        surface.draw_text(tx, self.ctx.text_y, &text, fg)
    }
}
