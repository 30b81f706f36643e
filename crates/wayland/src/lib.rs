//! Wayland layer-shell dock for `blockbar`.
//!
//! Owns the iced application loop. One subscription composes the bar from
//! the configuration, starts the block adapters, the redraw scheduler and the
//! click dispatcher, then forwards every flushed frame to the window.

pub mod frame;

use bar_blocks::compose;
use bar_config::{default_path, load as load_config, BarConfig, Position, ThemeConfig};
use bar_core::{
    redraw, Bar, Button, Color, Context, Dispatcher, MonospaceMeasure, PointerEvent, Scene,
    Scheduler,
};
use frame::{to_iced, FrameSurface, SceneView};
use futures::channel::mpsc::Sender;
use iced::{
    futures::SinkExt,
    mouse::ScrollDelta,
    widget::{canvas, mouse_area},
    Element, Length, Point, Subscription, Task,
};
use iced_layershell::{
    build_pattern::application,
    reexport::{Anchor, Layer},
    settings::{LayerShellSettings, Settings},
    to_layer_message,
};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Queued clicks waiting for the dispatcher.
const POINTER_QUEUE: usize = 16;

/// Accumulated smooth-scroll distance that counts as one wheel step.
const SCROLL_STEP_PX: f32 = 20.0;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Start the Wayland bar.  Never returns under normal operation.
pub fn run() -> iced_layershell::Result {
    let config = config();
    let width = config.global.width.max(1) as u32;
    let height = config.global.height.max(1) as u32;

    application(BarWindow::new, BarWindow::namespace, BarWindow::update, BarWindow::view)
        .subscription(BarWindow::subscription)
        .style(BarWindow::style)
        .settings(Settings {
            layer_settings: LayerShellSettings {
                size: Some((width, height)),
                exclusive_zone: height as i32,
                anchor: position_to_anchor(config.global.position),
                layer: Layer::Top,
                ..Default::default()
            },
            ..Default::default()
        })
        .run()
}

/// The configuration, read once per process and shared by the window and
/// the bar task. Falls back to defaults when it is unusable.
fn config() -> &'static BarConfig {
    static CONFIG: OnceLock<BarConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        load_config(default_path()).unwrap_or_else(|e| {
            warn!("{e}; using default configuration");
            BarConfig::default()
        })
    })
}

// ── Message ───────────────────────────────────────────────────────────────────

#[to_layer_message]
#[derive(Debug, Clone)]
pub enum Message {
    /// The bar is running; clicks go to this dispatcher queue.
    Attached(mpsc::Sender<PointerEvent>),
    /// The scheduler flushed a new frame.
    Frame(Arc<Scene>),
    CursorMoved(Point),
    Pressed(Button),
    Scrolled(ScrollDelta),
}

// ── State ─────────────────────────────────────────────────────────────────────

struct BarWindow {
    scene: Arc<Scene>,
    background: Color,
    foreground: Color,
    font_size: f32,
    cursor_x: f32,
    scrolled_px: f32,
    pointer: Option<mpsc::Sender<PointerEvent>>,
}

impl BarWindow {
    fn new() -> (Self, Task<Message>) {
        let config = config();
        let ctx = context(&config.theme);
        let window = Self {
            scene: Arc::new(Scene::new(
                config.global.width,
                config.global.height,
                ctx.background,
            )),
            background: ctx.background,
            foreground: ctx.foreground,
            font_size: config.theme.font_size,
            cursor_x: 0.0,
            scrolled_px: 0.0,
            pointer: None,
        };
        (window, Task::none())
    }

    fn namespace() -> String {
        String::from("blockbar")
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Attached(pointer) => {
                self.pointer = Some(pointer);
            }
            Message::Frame(scene) => {
                self.scene = scene;
            }
            Message::CursorMoved(p) => {
                self.cursor_x = p.x;
            }
            Message::Pressed(button) => self.press(button),
            Message::Scrolled(delta) => {
                if let Some(button) = scroll_button(delta, &mut self.scrolled_px) {
                    self.press(button);
                }
            }
            // Layer-shell injected variants handled by backend in iced-layershell 0.15.
            _ => {}
        }
        Task::none()
    }

    fn press(&self, button: Button) {
        let Some(pointer) = &self.pointer else {
            return;
        };
        let event = PointerEvent {
            x: self.cursor_x.floor() as i32,
            button,
        };
        if let Err(e) = pointer.try_send(event) {
            warn!("Dropping {button} click: {e}");
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let scene = canvas(SceneView {
            scene: self.scene.clone(),
            font_size: self.font_size,
        })
        .width(Length::Fill)
        .height(Length::Fill);

        mouse_area(scene)
            .on_move(Message::CursorMoved)
            .on_press(Message::Pressed(Button::Left))
            .on_middle_press(Message::Pressed(Button::Middle))
            .on_right_press(Message::Pressed(Button::Right))
            .on_scroll(Message::Scrolled)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        Subscription::run(bar_stream)
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: to_iced(self.background),
            text_color: to_iced(self.foreground),
        }
    }
}

// ── Subscription stream ───────────────────────────────────────────────────────

/// Composes the bar and runs it: adapters, scheduler and dispatcher are
/// spawned here, then every published frame is forwarded to the window.
fn bar_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(4, |mut sender: Sender<Message>| async move {
        let config = config();
        let ctx = context(&config.theme);
        let (redraw_tx, redraw_rx) = redraw::channel();

        let composition = match compose(config, &ctx, &redraw_tx) {
            Ok(c) => c,
            Err(e) => {
                error!("Cannot compose bar: {e}");
                // Leave the window blank rather than crash.
                loop {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                }
            }
        };
        // Adapters hold the remaining senders; the scheduler stops with them.
        drop(redraw_tx);

        let (groups, adapters) = composition.spawn();
        let bar = Arc::new(Bar::new(
            config.global.width,
            config.global.height,
            ctx.clone(),
            groups,
        ));
        info!(adapters = adapters.len(), "blockbar running");

        let (surface, mut frames) =
            FrameSurface::new(config.global.width, config.global.height, ctx.background);
        tokio::spawn(Scheduler::new(bar.clone(), redraw_rx, surface).run());

        let (pointer_tx, pointer_rx) = mpsc::channel(POINTER_QUEUE);
        tokio::spawn(Dispatcher::new(bar).run(pointer_rx));

        if sender.send(Message::Attached(pointer_tx)).await.is_err() {
            return;
        }

        while frames.changed().await.is_ok() {
            let scene = frames.borrow_and_update().clone();
            if sender.send(Message::Frame(scene)).await.is_err() {
                break;
            }
        }
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Measurement and palette shared by painting and hit-testing.
fn context(theme: &ThemeConfig) -> Context {
    let colour = |hex: &str, fallback: Color| {
        hex.parse().unwrap_or_else(|e| {
            warn!("{e}; using {fallback}");
            fallback
        })
    };
    Context {
        measure: Arc::new(MonospaceMeasure::new(theme.glyph_width)),
        background: colour(&theme.background, Color::DEFAULT_BG),
        foreground: colour(&theme.foreground, Color::DEFAULT_FG),
        text_y: theme.text_y,
    }
}

/// Wheel button for a scroll delta, if it amounts to a vertical step.
///
/// Pixel deltas accumulate in `pending` until they cover [`SCROLL_STEP_PX`];
/// horizontal-only scrolling maps to nothing.
fn scroll_button(delta: ScrollDelta, pending: &mut f32) -> Option<Button> {
    let y = match delta {
        ScrollDelta::Lines { y, .. } => y,
        ScrollDelta::Pixels { y, .. } => {
            *pending += y;
            if pending.abs() < SCROLL_STEP_PX {
                return None;
            }
            std::mem::take(pending)
        }
    };
    if y > 0.0 {
        Some(Button::ScrollUp)
    } else if y < 0.0 {
        Some(Button::ScrollDown)
    } else {
        None
    }
}

fn position_to_anchor(pos: Position) -> Anchor {
    match pos {
        Position::Top    => Anchor::Top    | Anchor::Left | Anchor::Right,
        Position::Bottom => Anchor::Bottom | Anchor::Left | Anchor::Right,
    }
}
