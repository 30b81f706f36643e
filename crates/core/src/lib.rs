//! Block/group model, layout, redraw scheduling and click dispatch for the bar.

pub mod action;
pub mod bar;
pub mod block;
pub mod color;
pub mod error;
pub mod group;
pub mod input;
pub mod layout;
pub mod popup;
pub mod redraw;
pub mod scheduler;
pub mod surface;
pub mod text;

pub use action::{Action, ActionTable, Button};
pub use bar::{Bar, Context};
pub use block::{Accent, Block, BlockHandle, Content, HitZone};
pub use color::Color;
pub use error::{BarError, Result};
pub use group::Group;
pub use input::{Dispatch, Dispatcher, PointerEvent};
pub use layout::{group_origin, place, Alignment, Placement};
pub use popup::{Popup, PopupSlot};
pub use redraw::{RedrawReceiver, RedrawSender};
pub use scheduler::{Scheduler, SchedulerState};
pub use surface::{DrawOp, Rect, Scene, Surface};
pub use text::{MonospaceMeasure, TextMeasure, ELLIPSIS};
