use crate::action::{Action, ActionTable, Button};
use crate::color::Color;
use crate::layout::Alignment;
use crate::popup::PopupSlot;
use crate::redraw::RedrawSender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mutable part of a block, written by its adapter and read by the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub text: String,
    /// `None` falls back to the bar's default foreground.
    pub fg: Option<Color>,
    /// `None` falls back to the bar's default background.
    pub bg: Option<Color>,
    pub dirty: bool,
}

/// A fixed-colour strip at the left edge of a block, e.g. behind a status glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accent {
    pub width: i32,
    pub color: Color,
}

/// Which part of a block accepts clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitZone {
    /// The whole `[offset, offset + width)` interval.
    #[default]
    Whole,
    /// Only the trailing text run plus `pad` pixels before it.
    TrailingText { pad: i32 },
}

/// One fixed-width, clickable segment of the bar.
#[derive(Debug)]
pub struct Block {
    id: String,
    width: i32,
    text_pad: i32,
    text_align: Alignment,
    accent: Option<Accent>,
    hit_zone: HitZone,
    actions: ActionTable,
    popup: Arc<PopupSlot>,
    content: Arc<Mutex<Content>>,
}

impl Block {
    pub fn new(id: impl Into<String>, width: i32) -> Self {
        Self {
            id: id.into(),
            width,
            text_pad: 0,
            text_align: Alignment::Center,
            accent: None,
            hit_zone: HitZone::Whole,
            actions: ActionTable::default(),
            popup: Arc::new(PopupSlot::new()),
            content: Arc::new(Mutex::new(Content::default())),
        }
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.text_align = align;
        self
    }

    pub fn with_pad(mut self, pad: i32) -> Self {
        self.text_pad = pad;
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.lock().text = text.into();
        self
    }

    pub fn with_bg(self, bg: Color) -> Self {
        self.lock().bg = Some(bg);
        self
    }

    pub fn with_fg(self, fg: Color) -> Self {
        self.lock().fg = Some(fg);
        self
    }

    pub fn with_accent(mut self, accent: Accent) -> Self {
        self.accent = Some(accent);
        self
    }

    pub fn with_hit_zone(mut self, zone: HitZone) -> Self {
        self.hit_zone = zone;
        self
    }

    /// Bind `action` to `button`, replacing any previous binding.
    pub fn on(mut self, button: Button, action: impl Action + 'static) -> Self {
        self.actions.set(button, action);
        self
    }

    pub fn on_click(self, action: impl Action + 'static) -> Self {
        self.on(Button::Left, action)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn text_pad(&self) -> i32 {
        self.text_pad
    }

    pub fn text_align(&self) -> Alignment {
        self.text_align
    }

    pub fn accent(&self) -> Option<Accent> {
        self.accent
    }

    pub fn hit_zone(&self) -> HitZone {
        self.hit_zone
    }

    pub fn action(&self, button: Button) -> Option<Arc<dyn Action>> {
        self.actions.get(button)
    }

    pub fn popup(&self) -> Arc<PopupSlot> {
        self.popup.clone()
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    pub(crate) fn mark_dirty(&self) {
        self.lock().dirty = true;
    }

    /// Snapshot the content and clear the dirty flag, or `None` when clean.
    pub(crate) fn take_dirty(&self) -> Option<Content> {
        let mut content = self.lock();
        if !content.dirty {
            return None;
        }
        content.dirty = false;
        Some(content.clone())
    }

    /// Writer handle for the adapter that feeds this block.
    pub fn handle(&self, redraw: RedrawSender) -> BlockHandle {
        BlockHandle {
            id: self.id.clone(),
            content: self.content.clone(),
            popup: self.popup.clone(),
            redraw,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Content> {
        self.content.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Adapter-side access to a block: mutate content, then ask for a redraw.
#[derive(Debug, Clone)]
pub struct BlockHandle {
    id: String,
    content: Arc<Mutex<Content>>,
    popup: Arc<PopupSlot>,
    redraw: RedrawSender,
}

impl BlockHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn popup(&self) -> Arc<PopupSlot> {
        self.popup.clone()
    }

    /// Replace the text. Marks the block dirty and returns `true` only if it changed.
    pub fn set_text(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        let mut content = self.lock();
        if content.text == text {
            return false;
        }
        content.text = text;
        content.dirty = true;
        true
    }

    /// Replace the background. Marks the block dirty and returns `true` only if it changed.
    pub fn set_bg(&self, bg: Option<Color>) -> bool {
        let mut content = self.lock();
        if content.bg == bg {
            return false;
        }
        content.bg = bg;
        content.dirty = true;
        true
    }

    /// Replace the foreground. Marks the block dirty and returns `true` only if it changed.
    pub fn set_fg(&self, fg: Option<Color>) -> bool {
        let mut content = self.lock();
        if content.fg == fg {
            return false;
        }
        content.fg = fg;
        content.dirty = true;
        true
    }

    /// Mark dirty and wake the scheduler.
    pub async fn redraw(&self) -> bool {
        self.lock().dirty = true;
        self.redraw.signal(&self.id).await
    }

    /// `set_text` followed by a redraw when the text actually changed.
    pub async fn update(&self, text: impl Into<String>) -> bool {
        if self.set_text(text) {
            self.redraw().await;
            return true;
        }
        false
    }

    fn lock(&self) -> MutexGuard<'_, Content> {
        self.content.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
